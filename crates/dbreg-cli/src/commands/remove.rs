//! The remove command family.

use colored::Colorize;
use dbreg_core::{DbItem, DbManager};

use crate::cli::RemoveAction;
use crate::error::Result;

use super::find_item;

/// Run a remove subcommand
pub fn run_remove(manager: &DbManager, action: RemoveAction) -> Result<()> {
    let item = match action {
        RemoveAction::Repo { nwo, list } => find_item(
            manager,
            &format!("repository '{nwo}'"),
            |item| matches!(
                item,
                DbItem::RemoteRepo(repo)
                    if repo.repo_full_name == nwo && repo.parent_list_name.as_deref() == list.as_deref()
            ),
        )?,
        RemoveAction::Owner { name } => find_item(
            manager,
            &format!("owner '{name}'"),
            |item| matches!(item, DbItem::RemoteOwner(owner) if owner.owner_name == name),
        )?,
        RemoveAction::List { name, local } => find_item(
            manager,
            &format!("list '{name}'"),
            |item| match item {
                DbItem::LocalList(list) => local && list.list_name == name,
                DbItem::RemoteUserDefinedList(list) => !local && list.list_name == name,
                _ => false,
            },
        )?,
        RemoveAction::Db { name, list } => find_item(
            manager,
            &format!("database '{name}'"),
            |item| matches!(
                item,
                DbItem::LocalDatabase(db)
                    if db.database_name == name && db.parent_list_name.as_deref() == list.as_deref()
            ),
        )?,
    };

    manager.remove_db_item(&item)?;
    println!("Removed {}", item.display_name().green());
    Ok(())
}
