//! The select command family.

use colored::Colorize;
use dbreg_core::{DbItem, DbManager};

use crate::cli::SelectAction;
use crate::error::Result;

use super::find_item;

/// Run a select subcommand
pub fn run_select(manager: &DbManager, action: SelectAction) -> Result<()> {
    let item = match action {
        SelectAction::Clear => {
            manager.clear_selected_db_item()?;
            println!("Cleared the selection");
            return Ok(());
        }
        SelectAction::Repo { nwo, list } => find_item(
            manager,
            &format!("repository '{nwo}'"),
            |item| matches!(
                item,
                DbItem::RemoteRepo(repo)
                    if repo.repo_full_name == nwo && repo.parent_list_name.as_deref() == list.as_deref()
            ),
        )?,
        SelectAction::Owner { name } => find_item(
            manager,
            &format!("owner '{name}'"),
            |item| matches!(item, DbItem::RemoteOwner(owner) if owner.owner_name == name),
        )?,
        SelectAction::List { name, local } => find_item(
            manager,
            &format!("list '{name}'"),
            |item| match item {
                DbItem::LocalList(list) => local && list.list_name == name,
                DbItem::RemoteUserDefinedList(list) => !local && list.list_name == name,
                DbItem::RemoteSystemDefinedList(list) => !local && list.list_name == name,
                _ => false,
            },
        )?,
        SelectAction::Db { name, list } => find_item(
            manager,
            &format!("database '{name}'"),
            |item| matches!(
                item,
                DbItem::LocalDatabase(db)
                    if db.database_name == name && db.parent_list_name.as_deref() == list.as_deref()
            ),
        )?,
    };

    manager.set_selected_db_item(&item)?;
    println!("Selected {}", item.display_name().green());
    Ok(())
}
