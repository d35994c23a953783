//! The registry facade.
//!
//! [`DbManager`] composes the config store with the item model. It holds no
//! derived state of its own: every read re-derives the tree from the
//! store's current snapshot, and every mutation goes through the store's
//! typed API so the document on disk stays the single source of truth.

use std::path::Path;
use std::sync::Arc;

use dbreg_config::{DbConfig, DbConfigStore};
use tracing::debug;

use crate::error::{Error, Result};
use crate::expansion::{
    clean_nonexistent_expanded_items, map_db_item_to_expanded, update_expanded_item,
};
use crate::item::{DbItem, LocalDatabaseDbItem};
use crate::selection;
use crate::tree::{TreeViewOptions, create_local_tree, create_remote_tree};

/// Which half of the registry a new list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Local,
    Remote,
}

/// High-level API over the registry: derived tree reads plus mutations
/// addressed by tree node.
pub struct DbManager {
    store: Arc<DbConfigStore>,
    options: TreeViewOptions,
}

impl DbManager {
    pub fn new(store: Arc<DbConfigStore>) -> Self {
        Self::with_options(store, TreeViewOptions::default())
    }

    pub fn with_options(store: Arc<DbConfigStore>, options: TreeViewOptions) -> Self {
        Self { store, options }
    }

    pub fn config_path(&self) -> &Path {
        self.store.config_path()
    }

    /// Registers a callback fired whenever the underlying document changes,
    /// from this process or from an external edit.
    pub fn on_did_change_config(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.store.on_did_change_config(callback);
    }

    // ---- derived reads ----------------------------------------------------

    /// Builds both root trees from the current document: remote first, then
    /// local.
    pub fn get_db_items(&self) -> Result<Vec<DbItem>> {
        let config = self.config()?;
        Ok(self.build_trees(&config))
    }

    /// Finds the currently selected node, if the document names one that
    /// still exists.
    pub fn get_selected_db_item(&self) -> Result<Option<DbItem>> {
        let items = self.get_db_items()?;
        Ok(selection::get_selected_db_item(&items))
    }

    // ---- additions --------------------------------------------------------

    pub fn add_new_remote_repo(&self, nwo: &str, parent_list_name: Option<&str>) -> Result<()> {
        self.store.add_remote_repo(nwo, parent_list_name)?;
        Ok(())
    }

    /// Adds several repositories to a list in one write; names the list
    /// already contains are skipped.
    pub fn add_new_remote_repos_to_list(
        &self,
        nwos: &[String],
        parent_list_name: &str,
    ) -> Result<()> {
        self.store.add_remote_repos_to_list(nwos, parent_list_name)?;
        Ok(())
    }

    pub fn add_new_remote_owner(&self, owner: &str) -> Result<()> {
        self.store.add_remote_owner(owner)?;
        Ok(())
    }

    pub fn add_new_list(&self, kind: ListKind, list_name: &str) -> Result<()> {
        match kind {
            ListKind::Local => self.store.add_local_list(list_name)?,
            ListKind::Remote => self.store.add_remote_list(list_name)?,
        }
        Ok(())
    }

    pub fn add_new_local_db(
        &self,
        name: &str,
        language: &str,
        storage_path: &str,
        parent_list_name: Option<&str>,
    ) -> Result<()> {
        self.store
            .add_local_db(name, language, storage_path, parent_list_name)?;
        Ok(())
    }

    // ---- renames ----------------------------------------------------------

    /// Renames a user-defined list. The stored selection and expanded state
    /// follow the new name.
    pub fn rename_list(&self, item: &DbItem, new_name: &str) -> Result<()> {
        match item {
            DbItem::LocalList(list) => {
                self.store.rename_local_list(&list.list_name, new_name)?;
            }
            DbItem::RemoteUserDefinedList(list) => {
                self.store.rename_remote_list(&list.list_name, new_name)?;
            }
            other => return Err(Error::NotRenameable { kind: other.kind() }),
        }
        Ok(())
    }

    pub fn rename_local_db(&self, item: &LocalDatabaseDbItem, new_name: &str) -> Result<()> {
        self.store.rename_local_db(
            &item.database_name,
            new_name,
            item.parent_list_name.as_deref(),
        )?;
        Ok(())
    }

    // ---- removals ---------------------------------------------------------

    /// Removes the persisted entry behind a tree node. Removing an item the
    /// selection points at clears the selection.
    pub fn remove_db_item(&self, item: &DbItem) -> Result<()> {
        match item {
            DbItem::LocalList(list) => self.store.remove_local_list(&list.list_name)?,
            DbItem::RemoteUserDefinedList(list) => {
                self.store.remove_remote_list(&list.list_name)?;
            }
            DbItem::LocalDatabase(db) => self
                .store
                .remove_local_db(&db.database_name, db.parent_list_name.as_deref())?,
            DbItem::RemoteRepo(repo) => self
                .store
                .remove_remote_repo(&repo.repo_full_name, repo.parent_list_name.as_deref())?,
            DbItem::RemoteOwner(owner) => self.store.remove_remote_owner(&owner.owner_name)?,
            other => return Err(Error::NotRemovable { kind: other.kind() }),
        }
        Ok(())
    }

    // ---- selection and expansion ------------------------------------------

    /// Persists the given node as the selection. Roots are not selectable;
    /// selecting one is a logged no-op.
    pub fn set_selected_db_item(&self, item: &DbItem) -> Result<()> {
        match selection::map_db_item_to_selected(item) {
            Some(selected) => {
                self.store.set_selected_db_item(selected)?;
                Ok(())
            }
            None => {
                debug!("Ignoring selection of non-selectable item {:?}", item.kind());
                Ok(())
            }
        }
    }

    pub fn clear_selected_db_item(&self) -> Result<()> {
        self.store.clear_selected_db_item()?;
        Ok(())
    }

    /// Records a container's expand/collapse toggle and, in the same write,
    /// prunes expanded entries whose containers no longer exist. Toggling a
    /// non-collapsible node is a logged no-op.
    pub fn update_expanded_state(&self, item: &DbItem, is_expanded: bool) -> Result<()> {
        let Some(entry) = map_db_item_to_expanded(item) else {
            debug!(
                "Ignoring expanded-state change for non-collapsible item {:?}",
                item.kind()
            );
            return Ok(());
        };

        let config = self.config()?;
        let updated = update_expanded_item(&config.expanded, &entry, is_expanded);
        let items = self.build_trees(&config);
        let cleaned = clean_nonexistent_expanded_items(&updated, &items);
        self.store.set_expanded_items(cleaned)?;
        Ok(())
    }

    // ---- existence checks -------------------------------------------------

    pub fn does_list_exist(&self, kind: ListKind, list_name: &str) -> bool {
        match kind {
            ListKind::Local => self.store.does_local_list_exist(list_name),
            ListKind::Remote => self.store.does_remote_list_exist(list_name),
        }
    }

    pub fn does_remote_owner_exist(&self, owner: &str) -> bool {
        self.store.does_remote_owner_exist(owner)
    }

    pub fn does_remote_db_exist(&self, nwo: &str, list_name: Option<&str>) -> bool {
        self.store.does_remote_db_exist(nwo, list_name)
    }

    pub fn does_local_db_exist(&self, name: &str, list_name: Option<&str>) -> bool {
        self.store.does_local_db_exist(name, list_name)
    }

    // ---- internals --------------------------------------------------------

    fn config(&self) -> Result<DbConfig> {
        self.store
            .get_config()
            .map_err(|errors| Error::InvalidConfig { errors })
    }

    fn build_trees(&self, config: &DbConfig) -> Vec<DbItem> {
        vec![
            DbItem::RootRemote(create_remote_tree(config, &config.expanded, &self.options)),
            DbItem::RootLocal(create_local_tree(config, &config.expanded)),
        ]
    }
}
