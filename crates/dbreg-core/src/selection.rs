//! Selection resolution over the derived tree.
//!
//! The document persists the selection as a name path; the tree marks the
//! matching node's `selected` flag. These helpers map in both directions:
//! finding the concrete selected node in a built tree, and projecting a
//! tree node back into the persistable name path.

use dbreg_config::SelectedDbItem;

use crate::item::DbItem;

/// Finds the selected node in the given trees.
///
/// A user-defined list and one of its leaves can both carry the selected
/// flag when the leaf's name path matches the list's; the leaf wins so
/// consumers always land on the most specific node.
pub fn get_selected_db_item(items: &[DbItem]) -> Option<DbItem> {
    for item in items {
        match item {
            DbItem::RootLocal(root) => {
                if let Some(found) = get_selected_db_item(&root.children) {
                    return Some(found);
                }
            }
            DbItem::RootRemote(root) => {
                if let Some(found) = get_selected_db_item(&root.children) {
                    return Some(found);
                }
            }
            DbItem::LocalList(list) => {
                if let Some(db) = list.databases.iter().find(|db| db.selected) {
                    return Some(DbItem::LocalDatabase(db.clone()));
                }
                if list.selected {
                    return Some(item.clone());
                }
            }
            DbItem::RemoteUserDefinedList(list) => {
                if let Some(repo) = list.repos.iter().find(|repo| repo.selected) {
                    return Some(DbItem::RemoteRepo(repo.clone()));
                }
                if list.selected {
                    return Some(item.clone());
                }
            }
            _ => {
                if item.selected() {
                    return Some(item.clone());
                }
            }
        }
    }
    None
}

/// Projects a tree node into the name path the document persists as the
/// selection. Roots are not selectable and yield `None`.
pub fn map_db_item_to_selected(item: &DbItem) -> Option<SelectedDbItem> {
    match item {
        DbItem::RootLocal(_) | DbItem::RootRemote(_) => None,
        DbItem::LocalList(list) => Some(SelectedDbItem::LocalUserDefinedList {
            list_name: list.list_name.clone(),
        }),
        DbItem::LocalDatabase(db) => Some(SelectedDbItem::LocalDatabase {
            database_name: db.database_name.clone(),
            list_name: db.parent_list_name.clone(),
        }),
        DbItem::RemoteSystemDefinedList(list) => Some(SelectedDbItem::RemoteSystemDefinedList {
            list_name: list.list_name.clone(),
        }),
        DbItem::RemoteUserDefinedList(list) => Some(SelectedDbItem::RemoteUserDefinedList {
            list_name: list.list_name.clone(),
        }),
        DbItem::RemoteOwner(owner) => Some(SelectedDbItem::RemoteOwner {
            owner_name: owner.owner_name.clone(),
        }),
        DbItem::RemoteRepo(repo) => Some(SelectedDbItem::RemoteRepository {
            repository_name: repo.repo_full_name.clone(),
            list_name: repo.parent_list_name.clone(),
        }),
    }
}
