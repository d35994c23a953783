//! The expand and collapse commands.

use colored::Colorize;
use dbreg_core::{DbItem, DbManager};

use crate::cli::ExpandTarget;
use crate::error::Result;

use super::find_item;

/// Run the expand or collapse command
pub fn run_expand(manager: &DbManager, target: ExpandTarget, is_expanded: bool) -> Result<()> {
    let item = match target {
        ExpandTarget::Remote => find_item(manager, "remote root", |item| {
            matches!(item, DbItem::RootRemote(_))
        })?,
        ExpandTarget::Local => find_item(manager, "local root", |item| {
            matches!(item, DbItem::RootLocal(_))
        })?,
        ExpandTarget::List { name, local } => find_item(
            manager,
            &format!("list '{name}'"),
            |item| match item {
                DbItem::LocalList(list) => local && list.list_name == name,
                DbItem::RemoteUserDefinedList(list) => !local && list.list_name == name,
                _ => false,
            },
        )?,
    };

    manager.update_expanded_state(&item, is_expanded)?;
    let verb = if is_expanded { "Expanded" } else { "Collapsed" };
    println!("{verb} {}", item.display_name().cyan());
    Ok(())
}
