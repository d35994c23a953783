//! Command implementations

mod add;
mod expand;
mod remove;
mod rename;
mod select;
mod show;

pub use add::run_add;
pub use expand::run_expand;
pub use remove::run_remove;
pub use rename::{run_rename_db, run_rename_list};
pub use select::run_select;
pub use show::run_show;

use std::path::PathBuf;
use std::sync::Arc;

use dbreg_config::DbConfigStore;
use dbreg_core::{DbItem, DbManager, TreeViewOptions, flatten_db_items};

use crate::error::{CliError, Result};

/// Resolves the directory holding the registry file.
pub fn registry_dir(override_dir: Option<PathBuf>) -> Result<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir),
        None => dirs::config_dir()
            .map(|dir| dir.join("dbreg"))
            .ok_or_else(|| {
                CliError::user(
                    "Could not determine the platform config directory; pass --config-dir",
                )
            }),
    }
}

/// Opens the registry at the given directory, creating the file on first
/// use.
pub fn open_manager(config_dir: Option<PathBuf>, options: TreeViewOptions) -> Result<DbManager> {
    let dir = registry_dir(config_dir)?;
    let store = Arc::new(DbConfigStore::new(dir));
    store.initialize()?;
    Ok(DbManager::with_options(store, options))
}

/// Finds the first tree node matching the predicate, or fails with the
/// given user-facing description.
pub(crate) fn find_item(
    manager: &DbManager,
    description: &str,
    predicate: impl Fn(&DbItem) -> bool,
) -> Result<DbItem> {
    let items = manager.get_db_items()?;
    flatten_db_items(&items)
        .into_iter()
        .find(|item| predicate(item))
        .ok_or_else(|| CliError::user(format!("No {description} found in the registry")))
}
