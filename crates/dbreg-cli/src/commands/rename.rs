//! The rename commands.

use colored::Colorize;
use dbreg_core::{DbItem, DbManager};

use crate::error::{CliError, Result};

use super::find_item;

/// Run the rename-list command
pub fn run_rename_list(
    manager: &DbManager,
    current_name: &str,
    new_name: &str,
    local: bool,
) -> Result<()> {
    let item = find_item(
        manager,
        &format!("list '{current_name}'"),
        |item| match item {
            DbItem::LocalList(list) => local && list.list_name == current_name,
            DbItem::RemoteUserDefinedList(list) => !local && list.list_name == current_name,
            _ => false,
        },
    )?;

    manager.rename_list(&item, new_name)?;
    println!("Renamed {} to {}", current_name.cyan(), new_name.cyan());
    Ok(())
}

/// Run the rename-db command
pub fn run_rename_db(
    manager: &DbManager,
    current_name: &str,
    new_name: &str,
    list: Option<&str>,
) -> Result<()> {
    let item = find_item(
        manager,
        &format!("database '{current_name}'"),
        |item| matches!(
            item,
            DbItem::LocalDatabase(db)
                if db.database_name == current_name && db.parent_list_name.as_deref() == list
        ),
    )?;
    let DbItem::LocalDatabase(db) = &item else {
        return Err(CliError::user(format!(
            "'{current_name}' is not a local database"
        )));
    };

    manager.rename_local_db(db, new_name)?;
    println!("Renamed {} to {}", current_name.green(), new_name.green());
    Ok(())
}
