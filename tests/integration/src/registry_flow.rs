//! End-to-end flow over the whole stack: store, document on disk, item
//! model and facade together.

use std::fs;
use std::sync::Arc;

use dbreg_config::{DB_CONFIG_FILE_NAME, DbConfigStore};
use dbreg_core::{DbItem, DbManager, ListKind};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn read_raw_config(dir: &TempDir) -> Value {
    let text = fs::read_to_string(dir.path().join(DB_CONFIG_FILE_NAME)).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn full_registry_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    let manager = DbManager::new(Arc::clone(&store));

    // Initialization materializes an empty document.
    let raw = read_raw_config(&dir);
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["databases"]["remote"]["repositoryLists"], Value::Array(vec![]));
    assert_eq!(raw.get("selected"), None);

    // Build up a registry.
    manager.add_new_list(ListKind::Remote, "my-list").unwrap();
    manager
        .add_new_remote_repo("owner1/repo1", Some("my-list"))
        .unwrap();
    manager.add_new_remote_repo("owner2/repo2", None).unwrap();
    manager.add_new_list(ListKind::Local, "local-list").unwrap();
    manager
        .add_new_local_db("db1", "javascript", "/storage/db1", Some("local-list"))
        .unwrap();

    let raw = read_raw_config(&dir);
    assert_eq!(raw["databases"]["remote"]["repositoryLists"][0]["name"], "my-list");
    assert_eq!(
        raw["databases"]["remote"]["repositoryLists"][0]["repositories"][0],
        "owner1/repo1"
    );
    assert_eq!(raw["databases"]["remote"]["repositories"][0], "owner2/repo2");
    assert_eq!(raw["databases"]["local"]["lists"][0]["databases"][0]["name"], "db1");

    // Select the repo inside the list and expand its containers.
    let items = manager.get_db_items().unwrap();
    let DbItem::RootRemote(remote) = &items[0] else {
        panic!("expected the remote root first");
    };
    let DbItem::RemoteUserDefinedList(list) = &remote.children[3] else {
        panic!("expected the user list after the system lists");
    };
    manager
        .set_selected_db_item(&DbItem::RemoteRepo(list.repos[0].clone()))
        .unwrap();
    manager.update_expanded_state(&items[0], true).unwrap();
    manager
        .update_expanded_state(&remote.children[3], true)
        .unwrap();

    let raw = read_raw_config(&dir);
    assert_eq!(raw["selected"]["kind"], "remoteRepository");
    assert_eq!(raw["selected"]["repositoryName"], "owner1/repo1");
    assert_eq!(raw["selected"]["listName"], "my-list");
    assert_eq!(raw["expanded"][0]["kind"], "rootRemote");
    assert_eq!(raw["expanded"][1]["kind"], "remoteUserDefinedList");

    // Renaming the list drags the selection and expansion along.
    let items = manager.get_db_items().unwrap();
    let DbItem::RootRemote(remote) = &items[0] else {
        panic!("expected the remote root first");
    };
    manager
        .rename_list(&remote.children[3], "renamed-list")
        .unwrap();

    let raw = read_raw_config(&dir);
    assert_eq!(raw["selected"]["listName"], "renamed-list");
    assert_eq!(raw["expanded"][1]["listName"], "renamed-list");

    // Removing the list clears both.
    let items = manager.get_db_items().unwrap();
    let DbItem::RootRemote(remote) = &items[0] else {
        panic!("expected the remote root first");
    };
    manager.remove_db_item(&remote.children[3]).unwrap();

    let raw = read_raw_config(&dir);
    assert_eq!(raw.get("selected"), None);
    assert_eq!(raw["expanded"][0]["kind"], "rootRemote");
    assert_eq!(raw["expanded"].as_array().unwrap().len(), 1);
    assert_eq!(manager.get_selected_db_item().unwrap(), None);
}

#[test]
fn document_written_by_one_store_loads_in_another() {
    let dir = TempDir::new().unwrap();
    {
        let store = DbConfigStore::new(dir.path());
        store.initialize().unwrap();
        store.add_remote_owner("owner1").unwrap();
        store.add_local_list("list-1").unwrap();
        store.dispose();
    }

    let store = Arc::new(DbConfigStore::new(dir.path()));
    store.initialize().unwrap();
    let manager = DbManager::new(store);

    assert!(manager.does_remote_owner_exist("owner1"));
    assert!(manager.does_list_exist(ListKind::Local, "list-1"));
}

#[test]
fn atomic_write_leaves_no_temp_files_behind() {
    let dir = TempDir::new().unwrap();
    let store = DbConfigStore::new(dir.path());
    store.initialize().unwrap();
    store.add_remote_owner("owner1").unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(entries, vec![DB_CONFIG_FILE_NAME.to_string()]);
}
