//! The add command family.

use colored::Colorize;
use dbreg_core::{DbManager, ListKind};

use crate::cli::AddAction;
use crate::error::Result;

/// Run an add subcommand
pub fn run_add(manager: &DbManager, action: AddAction) -> Result<()> {
    match action {
        AddAction::Repo { nwo, list } => {
            manager.add_new_remote_repo(&nwo, list.as_deref())?;
            match list {
                Some(list) => println!("Added {} to list {}", nwo.green(), list.cyan()),
                None => println!("Added {}", nwo.green()),
            }
        }
        AddAction::Owner { name } => {
            manager.add_new_remote_owner(&name)?;
            println!("Added owner {}", name.green());
        }
        AddAction::List { name, local } => {
            let kind = if local {
                ListKind::Local
            } else {
                ListKind::Remote
            };
            manager.add_new_list(kind, &name)?;
            println!("Added list {}", name.cyan());
        }
        AddAction::Db {
            name,
            language,
            storage_path,
            list,
        } => {
            manager.add_new_local_db(&name, &language, &storage_path, list.as_deref())?;
            println!("Added database {} ({language})", name.green());
        }
    }
    Ok(())
}
