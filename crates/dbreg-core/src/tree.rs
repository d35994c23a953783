//! Tree construction from a validated config document.
//!
//! Children are built in a fixed order: synthesized system-defined lists,
//! then owners, then user-defined lists, then loose leaves. Every node's
//! `selected` flag is resolved against `config.selected` by name path, and
//! every container's `expanded` flag by membership in the expanded list.

use dbreg_config::{DbConfig, ExpandedDbItem, LocalDatabase, SelectedDbItem};

use crate::item::{
    DbItem, LocalDatabaseDbItem, LocalListDbItem, RemoteOwnerDbItem, RemoteRepoDbItem,
    RemoteSystemDefinedListDbItem, RemoteUserDefinedListDbItem, RootLocalDbItem, RootRemoteDbItem,
};

/// Sizes of the synthesized "Top N" lists, in display order.
pub const SYSTEM_DEFINED_LIST_SIZES: [u32; 3] = [10, 100, 1000];

/// Name of the system-defined list of the given size, as stored in the
/// `selected` name path.
pub fn system_defined_list_name(size: u32) -> String {
    format!("top_{size}")
}

/// Consumer-facing knobs for tree construction.
#[derive(Debug, Clone)]
pub struct TreeViewOptions {
    /// Whether the synthesized "Top N" lists appear in the remote tree.
    pub show_system_defined_lists: bool,
}

impl Default for TreeViewOptions {
    fn default() -> Self {
        Self {
            show_system_defined_lists: true,
        }
    }
}

/// Builds the remote half of the tree.
pub fn create_remote_tree(
    config: &DbConfig,
    expanded: &[ExpandedDbItem],
    options: &TreeViewOptions,
) -> RootRemoteDbItem {
    let selected = config.selected.as_ref();
    let mut children = Vec::new();

    if options.show_system_defined_lists {
        for size in SYSTEM_DEFINED_LIST_SIZES {
            children.push(DbItem::RemoteSystemDefinedList(
                create_system_defined_list(size, selected),
            ));
        }
    }

    for owner in &config.databases.remote.owners {
        children.push(DbItem::RemoteOwner(RemoteOwnerDbItem {
            selected: matches!(
                selected,
                Some(SelectedDbItem::RemoteOwner { owner_name }) if owner_name == owner
            ),
            owner_name: owner.clone(),
        }));
    }

    for list in &config.databases.remote.repository_lists {
        let repos = list
            .repositories
            .iter()
            .map(|nwo| create_remote_repo(nwo, Some(&list.name), selected))
            .collect();

        children.push(DbItem::RemoteUserDefinedList(RemoteUserDefinedListDbItem {
            selected: matches!(
                selected,
                Some(SelectedDbItem::RemoteUserDefinedList { list_name }) if list_name == &list.name
            ),
            expanded: expanded.contains(&ExpandedDbItem::RemoteUserDefinedList {
                list_name: list.name.clone(),
            }),
            list_name: list.name.clone(),
            repos,
        }));
    }

    for nwo in &config.databases.remote.repositories {
        children.push(DbItem::RemoteRepo(create_remote_repo(nwo, None, selected)));
    }

    RootRemoteDbItem {
        expanded: expanded.contains(&ExpandedDbItem::RootRemote),
        children,
    }
}

/// Builds the local half of the tree.
pub fn create_local_tree(config: &DbConfig, expanded: &[ExpandedDbItem]) -> RootLocalDbItem {
    let selected = config.selected.as_ref();
    let mut children = Vec::new();

    for list in &config.databases.local.lists {
        let databases = list
            .databases
            .iter()
            .map(|db| create_local_database(db, Some(&list.name), selected))
            .collect();

        children.push(DbItem::LocalList(LocalListDbItem {
            selected: matches!(
                selected,
                Some(SelectedDbItem::LocalUserDefinedList { list_name }) if list_name == &list.name
            ),
            expanded: expanded.contains(&ExpandedDbItem::LocalUserDefinedList {
                list_name: list.name.clone(),
            }),
            list_name: list.name.clone(),
            databases,
        }));
    }

    for db in &config.databases.local.databases {
        children.push(DbItem::LocalDatabase(create_local_database(
            db, None, selected,
        )));
    }

    RootLocalDbItem {
        expanded: expanded.contains(&ExpandedDbItem::RootLocal),
        children,
    }
}

fn create_system_defined_list(
    size: u32,
    selected: Option<&SelectedDbItem>,
) -> RemoteSystemDefinedListDbItem {
    let name = system_defined_list_name(size);
    RemoteSystemDefinedListDbItem {
        selected: matches!(
            selected,
            Some(SelectedDbItem::RemoteSystemDefinedList { list_name }) if list_name == &name
        ),
        list_name: name,
        list_display_name: format!("Top {size} repositories"),
        list_description: format!("Top {size} repositories of a language"),
    }
}

fn create_remote_repo(
    nwo: &str,
    parent_list_name: Option<&str>,
    selected: Option<&SelectedDbItem>,
) -> RemoteRepoDbItem {
    RemoteRepoDbItem {
        selected: matches!(
            selected,
            Some(SelectedDbItem::RemoteRepository {
                repository_name,
                list_name,
            }) if repository_name == nwo && list_name.as_deref() == parent_list_name
        ),
        repo_full_name: nwo.to_string(),
        parent_list_name: parent_list_name.map(str::to_string),
    }
}

fn create_local_database(
    db: &LocalDatabase,
    parent_list_name: Option<&str>,
    selected: Option<&SelectedDbItem>,
) -> LocalDatabaseDbItem {
    LocalDatabaseDbItem {
        selected: matches!(
            selected,
            Some(SelectedDbItem::LocalDatabase {
                database_name,
                list_name,
            }) if database_name == &db.name && list_name.as_deref() == parent_list_name
        ),
        database_name: db.name.clone(),
        date_added: db.date_added,
        language: db.language.clone(),
        storage_path: db.storage_path.clone(),
        parent_list_name: parent_list_name.map(str::to_string),
    }
}
