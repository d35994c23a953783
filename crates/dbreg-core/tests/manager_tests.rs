//! End-to-end tests for the registry facade against a real config file.

use std::fs;
use std::sync::Arc;

use dbreg_config::{DB_CONFIG_FILE_NAME, DbConfigStore, ExpandedDbItem, SelectedDbItem};
use dbreg_core::{DbItem, DbItemKind, DbManager, Error, ListKind, TreeViewOptions};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn new_manager(dir: &TempDir) -> DbManager {
    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    DbManager::new(store)
}

fn remote_children(manager: &DbManager) -> Vec<DbItem> {
    let items = manager.get_db_items().unwrap();
    let DbItem::RootRemote(root) = &items[0] else {
        panic!("expected the remote root first");
    };
    root.children.clone()
}

fn local_children(manager: &DbManager) -> Vec<DbItem> {
    let items = manager.get_db_items().unwrap();
    let DbItem::RootLocal(root) = &items[1] else {
        panic!("expected the local root second");
    };
    root.children.clone()
}

#[test]
fn fresh_registry_shows_roots_and_system_defined_lists() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);

    let items = manager.get_db_items().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind(), DbItemKind::RootRemote);
    assert_eq!(items[1].kind(), DbItemKind::RootLocal);
    let remote = remote_children(&manager);
    assert_eq!(remote.len(), 3);
    assert!(
        remote
            .iter()
            .all(|c| c.kind() == DbItemKind::RemoteSystemDefinedList)
    );
    assert!(local_children(&manager).is_empty());
}

#[test]
fn system_defined_lists_can_be_hidden() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    let manager = DbManager::with_options(
        store,
        TreeViewOptions {
            show_system_defined_lists: false,
        },
    );

    assert!(remote_children(&manager).is_empty());
}

#[test]
fn added_list_and_repos_show_up_in_the_tree() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);

    manager.add_new_list(ListKind::Remote, "my-list").unwrap();
    manager
        .add_new_remote_repo("owner1/repo1", Some("my-list"))
        .unwrap();
    manager.add_new_remote_repo("owner2/repo1", None).unwrap();
    manager.add_new_remote_owner("owner3").unwrap();

    let remote = remote_children(&manager);
    // 3 system lists + owner + user list + loose repo
    assert_eq!(remote.len(), 6);
    let DbItem::RemoteUserDefinedList(list) = &remote[4] else {
        panic!("expected the user list after the owner");
    };
    assert_eq!(list.list_name, "my-list");
    assert_eq!(list.repos.len(), 1);
    assert_eq!(list.repos[0].repo_full_name, "owner1/repo1");
    assert_eq!(list.repos[0].parent_list_name, Some("my-list".to_string()));
}

#[test]
fn bulk_add_skips_repos_the_list_already_has() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_list(ListKind::Remote, "my-list").unwrap();
    manager
        .add_new_remote_repo("owner1/repo1", Some("my-list"))
        .unwrap();

    manager
        .add_new_remote_repos_to_list(
            &["owner1/repo1".to_string(), "owner1/repo2".to_string()],
            "my-list",
        )
        .unwrap();

    let remote = remote_children(&manager);
    let DbItem::RemoteUserDefinedList(list) = &remote[3] else {
        panic!("expected the user list");
    };
    let names: Vec<_> = list.repos.iter().map(|r| r.repo_full_name.as_str()).collect();
    assert_eq!(names, vec!["owner1/repo1", "owner1/repo2"]);
}

#[test]
fn local_databases_carry_their_metadata() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);

    manager.add_new_list(ListKind::Local, "local-list").unwrap();
    manager
        .add_new_local_db("db1", "javascript", "/storage/db1", Some("local-list"))
        .unwrap();

    let local = local_children(&manager);
    let DbItem::LocalList(list) = &local[0] else {
        panic!("expected the local list");
    };
    let db = &list.databases[0];
    assert_eq!(db.database_name, "db1");
    assert_eq!(db.language, "javascript");
    assert_eq!(db.storage_path, "/storage/db1");
    assert!(db.date_added > 0);
    assert_eq!(db.parent_list_name, Some("local-list".to_string()));
}

#[test]
fn selection_round_trips_through_the_tree() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_list(ListKind::Remote, "my-list").unwrap();
    manager
        .add_new_remote_repo("owner1/repo1", Some("my-list"))
        .unwrap();

    let remote = remote_children(&manager);
    let DbItem::RemoteUserDefinedList(list) = &remote[3] else {
        panic!("expected the user list");
    };
    manager
        .set_selected_db_item(&DbItem::RemoteRepo(list.repos[0].clone()))
        .unwrap();

    let selected = manager.get_selected_db_item().unwrap();
    let Some(DbItem::RemoteRepo(repo)) = selected else {
        panic!("expected the repo to be selected");
    };
    assert!(repo.selected);
    assert_eq!(repo.repo_full_name, "owner1/repo1");
    assert_eq!(repo.parent_list_name, Some("my-list".to_string()));
}

#[test]
fn selecting_a_root_is_ignored() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);

    let items = manager.get_db_items().unwrap();
    manager.set_selected_db_item(&items[0]).unwrap();

    assert_eq!(manager.get_selected_db_item().unwrap(), None);
}

#[test]
fn removing_the_selected_item_clears_the_selection() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_remote_owner("owner1").unwrap();

    let remote = remote_children(&manager);
    let owner = remote[3].clone();
    manager.set_selected_db_item(&owner).unwrap();
    assert!(manager.get_selected_db_item().unwrap().is_some());

    manager.remove_db_item(&owner).unwrap();

    assert_eq!(manager.get_selected_db_item().unwrap(), None);
    assert!(!manager.does_remote_owner_exist("owner1"));
}

#[test]
fn renaming_a_list_keeps_selection_and_expansion() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_list(ListKind::Remote, "old-name").unwrap();

    let remote = remote_children(&manager);
    let list = remote[3].clone();
    manager.set_selected_db_item(&list).unwrap();
    manager.update_expanded_state(&list, true).unwrap();

    manager.rename_list(&list, "new-name").unwrap();

    let remote = remote_children(&manager);
    let DbItem::RemoteUserDefinedList(renamed) = &remote[3] else {
        panic!("expected the renamed list");
    };
    assert_eq!(renamed.list_name, "new-name");
    assert!(renamed.selected);
    assert!(renamed.expanded);
}

#[test]
fn renaming_a_non_list_item_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_remote_owner("owner1").unwrap();

    let remote = remote_children(&manager);
    let owner = remote[3].clone();

    let result = manager.rename_list(&owner, "other");
    assert!(matches!(
        result,
        Err(Error::NotRenameable {
            kind: DbItemKind::RemoteOwner
        })
    ));
}

#[test]
fn removing_a_system_defined_list_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);

    let remote = remote_children(&manager);
    let result = manager.remove_db_item(&remote[0]);

    assert!(matches!(
        result,
        Err(Error::NotRemovable {
            kind: DbItemKind::RemoteSystemDefinedList
        })
    ));
}

#[test]
fn rename_local_db_follows_the_parent_list() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    manager.add_new_list(ListKind::Local, "list-1").unwrap();
    manager
        .add_new_local_db("db1", "python", "/storage/db1", Some("list-1"))
        .unwrap();

    let local = local_children(&manager);
    let DbItem::LocalList(list) = &local[0] else {
        panic!("expected the local list");
    };
    manager.rename_local_db(&list.databases[0], "db2").unwrap();

    let local = local_children(&manager);
    let DbItem::LocalList(list) = &local[0] else {
        panic!("expected the local list");
    };
    assert_eq!(list.databases[0].database_name, "db2");
    assert!(manager.does_local_db_exist("db2", Some("list-1")));
    assert!(!manager.does_local_db_exist("db1", Some("list-1")));
}

#[test]
fn update_expanded_state_prunes_entries_for_deleted_containers() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    let manager = DbManager::new(Arc::clone(&store));
    manager.add_new_list(ListKind::Remote, "my-list").unwrap();

    let remote = remote_children(&manager);
    let list = remote[3].clone();
    manager.update_expanded_state(&list, true).unwrap();
    // Deleting through the store leaves no stale expanded entry behind
    // because the transform drops it with the list.
    store.remove_remote_list("my-list").unwrap();
    store
        .set_expanded_items(vec![
            ExpandedDbItem::RemoteUserDefinedList {
                list_name: "my-list".to_string(),
            },
            ExpandedDbItem::RootRemote,
        ])
        .unwrap();

    let items = manager.get_db_items().unwrap();
    manager.update_expanded_state(&items[1], true).unwrap();

    let config = store.get_config().unwrap();
    assert_eq!(
        config.expanded,
        vec![ExpandedDbItem::RootRemote, ExpandedDbItem::RootLocal]
    );
}

#[test]
fn invalid_file_surfaces_from_derived_reads() {
    let dir = TempDir::new().unwrap();
    let manager = new_manager(&dir);
    // Bypass the store to corrupt the file, then wait for the watcher to
    // pick the edit up.
    let path = dir.path().join(DB_CONFIG_FILE_NAME);
    fs::write(&path, "{ not json").unwrap();

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        match manager.get_db_items() {
            Err(Error::InvalidConfig { .. }) => break,
            _ if std::time::Instant::now() < deadline => {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            other => panic!("expected the invalid file to surface, got {other:?}"),
        }
    }
}

#[test]
fn selection_set_through_the_store_is_visible_in_the_tree() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    store.add_remote_owner("owner1").unwrap();
    store
        .set_selected_db_item(SelectedDbItem::RemoteOwner {
            owner_name: "owner1".to_string(),
        })
        .unwrap();
    let manager = DbManager::new(store);

    let selected = manager.get_selected_db_item().unwrap();

    let Some(DbItem::RemoteOwner(owner)) = selected else {
        panic!("expected the owner to be selected");
    };
    assert_eq!(owner.owner_name, "owner1");
}
