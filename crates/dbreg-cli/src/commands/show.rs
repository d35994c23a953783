//! The show command: renders the registry tree.

use colored::Colorize;
use dbreg_core::{DbItem, DbManager};
use serde_json::json;

use crate::error::Result;

/// Run the show command
pub fn run_show(manager: &DbManager, json: bool) -> Result<()> {
    let items = manager.get_db_items()?;

    if json {
        let rendered: Vec<_> = items.iter().map(item_to_json).collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
        return Ok(());
    }

    for item in &items {
        print_item(item, 0);
    }
    Ok(())
}

fn print_item(item: &DbItem, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if item.selected() {
        " *".green().bold().to_string()
    } else {
        String::new()
    };

    match item {
        DbItem::RootLocal(root) => {
            println!("{indent}{}", item.display_name().bold());
            for child in &root.children {
                print_item(child, depth + 1);
            }
        }
        DbItem::RootRemote(root) => {
            println!("{indent}{}", item.display_name().bold());
            for child in &root.children {
                print_item(child, depth + 1);
            }
        }
        DbItem::LocalList(list) => {
            println!("{indent}{}{marker}", list.list_name.cyan());
            for db in &list.databases {
                print_item(&DbItem::LocalDatabase(db.clone()), depth + 1);
            }
        }
        DbItem::LocalDatabase(db) => {
            println!(
                "{indent}{}{marker} {} ({})",
                db.database_name.green(),
                db.language,
                db.storage_path.dimmed()
            );
        }
        DbItem::RemoteSystemDefinedList(list) => {
            println!(
                "{indent}{}{marker} {}",
                list.list_display_name.cyan(),
                list.list_description.dimmed()
            );
        }
        DbItem::RemoteUserDefinedList(list) => {
            println!("{indent}{}{marker}", list.list_name.cyan());
            for repo in &list.repos {
                print_item(&DbItem::RemoteRepo(repo.clone()), depth + 1);
            }
        }
        DbItem::RemoteOwner(owner) => {
            println!("{indent}{}{marker}", owner.owner_name.green());
        }
        DbItem::RemoteRepo(repo) => {
            println!("{indent}{}{marker}", repo.repo_full_name.green());
        }
    }
}

fn item_to_json(item: &DbItem) -> serde_json::Value {
    let base = json!({
        "kind": format!("{:?}", item.kind()),
        "name": item.display_name(),
        "selected": item.selected(),
    });

    let children: Vec<serde_json::Value> = match item {
        DbItem::RootLocal(root) => root.children.iter().map(item_to_json).collect(),
        DbItem::RootRemote(root) => root.children.iter().map(item_to_json).collect(),
        DbItem::LocalList(list) => list
            .databases
            .iter()
            .map(|db| item_to_json(&DbItem::LocalDatabase(db.clone())))
            .collect(),
        DbItem::RemoteUserDefinedList(list) => list
            .repos
            .iter()
            .map(|repo| item_to_json(&DbItem::RemoteRepo(repo.clone())))
            .collect(),
        _ => Vec::new(),
    };

    let mut value = base;
    if !children.is_empty() {
        value["children"] = json!(children);
    }
    value
}
