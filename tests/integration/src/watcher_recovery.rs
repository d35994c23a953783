//! External edits to the config file: pickup, invalidation and recovery.

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use dbreg_config::{ConfigErrorSink, DB_CONFIG_FILE_NAME, DbConfigStore};
use tempfile::TempDir;

struct FlagSink(Arc<AtomicBool>);

impl ConfigErrorSink for FlagSink {
    fn set_config_error(&self, has_error: bool) {
        self.0.store(has_error, Ordering::SeqCst);
    }
}

const POLL_TIMEOUT: Duration = Duration::from_secs(5);

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + POLL_TIMEOUT;
    while !condition() {
        assert!(
            Instant::now() < deadline,
            "condition not reached within {POLL_TIMEOUT:?}"
        );
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn external_edit_is_picked_up() {
    let dir = TempDir::new().unwrap();
    let store = DbConfigStore::new(dir.path());
    store.initialize().unwrap();

    let content = r#"{
  "version": 1,
  "databases": {
    "remote": { "repositoryLists": [], "owners": ["external-owner"], "repositories": [] },
    "local": { "lists": [], "databases": [] }
  }
}"#;
    fs::write(dir.path().join(DB_CONFIG_FILE_NAME), content).unwrap();

    wait_until(|| store.does_remote_owner_exist("external-owner"));
}

#[test]
fn invalid_edit_flips_the_error_flag_and_a_fix_recovers() {
    let dir = TempDir::new().unwrap();
    let has_error = Arc::new(AtomicBool::new(false));
    let store = DbConfigStore::with_error_sink(
        dir.path(),
        Box::new(FlagSink(Arc::clone(&has_error))),
    );
    store.initialize().unwrap();
    assert!(!has_error.load(Ordering::SeqCst));

    let path = dir.path().join(DB_CONFIG_FILE_NAME);
    fs::write(&path, "{ \"version\": 1 }").unwrap();
    wait_until(|| has_error.load(Ordering::SeqCst));
    assert!(store.get_config().is_err());

    let fixed = r#"{
  "version": 1,
  "databases": {
    "remote": { "repositoryLists": [], "owners": [], "repositories": [] },
    "local": { "lists": [], "databases": [] }
  }
}"#;
    fs::write(&path, fixed).unwrap();
    wait_until(|| !has_error.load(Ordering::SeqCst));
    assert!(store.get_config().is_ok());
}

#[test]
fn change_callback_fires_for_external_edits() {
    let dir = TempDir::new().unwrap();
    let store = DbConfigStore::new(dir.path());
    store.initialize().unwrap();

    let changed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&changed);
    store.on_did_change_config(move || flag.store(true, Ordering::SeqCst));

    let content = r#"{
  "version": 1,
  "databases": {
    "remote": { "repositoryLists": [], "owners": [], "repositories": ["owner1/repo1"] },
    "local": { "lists": [], "databases": [] }
  }
}"#;
    fs::write(dir.path().join(DB_CONFIG_FILE_NAME), content).unwrap();

    wait_until(|| changed.load(Ordering::SeqCst));
}

#[test]
fn dispose_stops_observing_external_edits() {
    let dir = TempDir::new().unwrap();
    let store = DbConfigStore::new(dir.path());
    store.initialize().unwrap();
    store.dispose();

    let content = r#"{
  "version": 1,
  "databases": {
    "remote": { "repositoryLists": [], "owners": ["late-owner"], "repositories": [] },
    "local": { "lists": [], "databases": [] }
  }
}"#;
    fs::write(dir.path().join(DB_CONFIG_FILE_NAME), content).unwrap();
    std::thread::sleep(Duration::from_millis(500));

    assert!(!store.does_remote_owner_exist("late-owner"));
}
