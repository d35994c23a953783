//! The config store: on-disk lifecycle of the registry document.
//!
//! The store owns the canonical document and its file. It loads (or creates)
//! the document on `initialize`, watches the file for external edits, and
//! exposes a typed mutation API that computes the next document value,
//! persists it atomically and replaces the in-memory snapshot wholesale.
//!
//! Read-side failures (unreadable, unparsable or invalid files) never fail
//! the process: the store flips into an unavailable state, reports the
//! error list from `get_config`, and pushes a boolean error flag to the
//! injected [`ConfigErrorSink`]. Write-side failures propagate to the
//! mutating caller, leaving the in-memory state at its pre-mutation value.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{DebouncedEvent, Debouncer, FileIdMap, new_debouncer};
use tracing::{debug, error, warn};

use crate::document::{
    DB_CONFIG_FILE_NAME, DbConfig, ExpandedDbItem, LocalDatabase, LocalList,
    RemoteRepositoryList, SelectedDbItem,
};
use crate::error::{Error, Result};
use crate::transform;
use crate::validator::{DbConfigValidationError, validate};

/// Debounce window for file change events.
const WATCH_DEBOUNCE: Duration = Duration::from_millis(100);

/// Injected capability for surfacing the "config has error" status to an
/// external UI context. The store does not own the UI; it only reports.
pub trait ConfigErrorSink: Send + Sync {
    fn set_config_error(&self, has_error: bool);
}

/// Sink for embedders that have no error surface.
pub struct NoopErrorSink;

impl ConfigErrorSink for NoopErrorSink {
    fn set_config_error(&self, _has_error: bool) {}
}

type ChangeCallback = Box<dyn Fn() + Send + Sync>;

enum StoreState {
    Uninitialized,
    Loaded(DbConfig),
    Invalid(Vec<DbConfigValidationError>),
}

/// State shared between the store handle and the watcher callback.
struct Shared {
    config_path: PathBuf,
    state: Mutex<StoreState>,
    subscribers: Mutex<Vec<ChangeCallback>>,
    error_sink: Box<dyn ConfigErrorSink>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-reads the file and replaces the snapshot wholesale. Serialised on
    /// the state mutex, so only one reload runs at a time; reloading after a
    /// self-write is redundant but harmless.
    fn reload(&self) {
        let loaded = {
            let mut state = self.lock_state();
            match self.read_document() {
                Ok(config) => {
                    *state = StoreState::Loaded(config);
                    true
                }
                Err(errors) => {
                    warn!(
                        "Config at {} is invalid: {} error(s)",
                        self.config_path.display(),
                        errors.len()
                    );
                    *state = StoreState::Invalid(errors);
                    false
                }
            }
        };

        self.error_sink.set_config_error(!loaded);
        if loaded {
            self.notify_changed();
        }
    }

    fn read_document(&self) -> std::result::Result<DbConfig, Vec<DbConfigValidationError>> {
        let text = dbreg_fs::read_text(&self.config_path).map_err(|e| {
            vec![DbConfigValidationError::InvalidConfig(format!(
                "Failed to read config file: {e}"
            ))]
        })?;

        let raw: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            vec![DbConfigValidationError::InvalidConfig(format!(
                "Failed to parse config file: {e}"
            ))]
        })?;

        let errors = validate(&raw);
        if !errors.is_empty() {
            return Err(errors);
        }

        serde_json::from_value(raw).map_err(|e| {
            vec![DbConfigValidationError::InvalidConfig(format!(
                "Failed to decode config file: {e}"
            ))]
        })
    }

    /// Persists the document with 2-space indentation; the file is
    /// user-editable.
    fn write_document(&self, config: &DbConfig) -> Result<()> {
        let mut content = serde_json::to_string_pretty(config)?;
        content.push('\n');
        dbreg_fs::write_atomic(&self.config_path, content.as_bytes())?;
        Ok(())
    }

    fn notify_changed(&self) {
        let subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for callback in subscribers.iter() {
            callback();
        }
    }
}

/// Durable store for the registry document.
///
/// Constructed once at process start and passed by reference to every
/// collaborator; `initialize()`/`dispose()` bracket the active session.
pub struct DbConfigStore {
    shared: Arc<Shared>,
    debouncer: Mutex<Option<Debouncer<RecommendedWatcher, FileIdMap>>>,
}

impl DbConfigStore {
    /// Creates a store for `<storage_dir>/workspace-databases.json` with no
    /// error surface.
    pub fn new(storage_dir: impl AsRef<Path>) -> Self {
        Self::with_error_sink(storage_dir, Box::new(NoopErrorSink))
    }

    pub fn with_error_sink(storage_dir: impl AsRef<Path>, error_sink: Box<dyn ConfigErrorSink>) -> Self {
        Self {
            shared: Arc::new(Shared {
                config_path: storage_dir.as_ref().join(DB_CONFIG_FILE_NAME),
                state: Mutex::new(StoreState::Uninitialized),
                subscribers: Mutex::new(Vec::new()),
                error_sink,
            }),
            debouncer: Mutex::new(None),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.shared.config_path
    }

    /// Creates the file with an empty document if it does not exist, loads
    /// it, and starts watching for external edits.
    pub fn initialize(&self) -> Result<()> {
        if !self.shared.config_path.exists() {
            debug!(
                "No config file at {}, creating an empty one",
                self.shared.config_path.display()
            );
            self.shared.write_document(&DbConfig::empty())?;
        }

        self.shared.reload();
        self.start_watching()?;
        Ok(())
    }

    /// Returns a deep-cloned snapshot of the current document, or the
    /// accumulated validation errors when no valid document is available.
    pub fn get_config(&self) -> std::result::Result<DbConfig, Vec<DbConfigValidationError>> {
        match &*self.shared.lock_state() {
            StoreState::Loaded(config) => Ok(config.clone()),
            StoreState::Invalid(errors) => Err(errors.clone()),
            StoreState::Uninitialized => Err(vec![DbConfigValidationError::InvalidConfig(
                "Config store has not been initialized".to_string(),
            )]),
        }
    }

    /// Registers a callback fired after every successful load or mutation.
    /// Self-written changes may be observed more than once (the watcher
    /// reload also fires); delivery is at-least-once.
    pub fn on_did_change_config(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    /// Stops watching the config file. In-memory state is kept but no
    /// further external edits are observed.
    pub fn dispose(&self) {
        let debouncer = self
            .debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if debouncer.is_some() {
            debug!("Stopped config file watcher");
        }
    }

    // ---- mutation API -----------------------------------------------------

    pub fn set_selected_db_item(&self, selected: SelectedDbItem) -> Result<()> {
        self.modify(move |config| {
            let mut next = config.clone();
            next.selected = Some(selected);
            Ok(next)
        })
    }

    pub fn clear_selected_db_item(&self) -> Result<()> {
        self.modify(|config| {
            let mut next = config.clone();
            next.selected = None;
            Ok(next)
        })
    }

    /// Adds an expanded-state entry; adding an already-present entry is a
    /// no-op (the expanded list is a set).
    pub fn add_expanded_item(&self, item: ExpandedDbItem) -> Result<()> {
        self.modify(move |config| {
            let mut next = config.clone();
            if !next.expanded.contains(&item) {
                next.expanded.push(item);
            }
            Ok(next)
        })
    }

    /// Removes an expanded-state entry; removing an absent entry is a no-op.
    pub fn remove_expanded_item(&self, item: &ExpandedDbItem) -> Result<()> {
        self.modify(|config| {
            let mut next = config.clone();
            next.expanded.retain(|e| e != item);
            Ok(next)
        })
    }

    /// Replaces the whole expanded list, used when pruning entries whose
    /// containers no longer exist.
    pub fn set_expanded_items(&self, items: Vec<ExpandedDbItem>) -> Result<()> {
        self.modify(move |config| {
            let mut next = config.clone();
            next.expanded = items;
            Ok(next)
        })
    }

    pub fn add_remote_repo(&self, nwo: &str, parent_list_name: Option<&str>) -> Result<()> {
        self.modify(|config| {
            if config.has_remote_repo(nwo, parent_list_name) {
                return Err(Error::RemoteRepoAlreadyExists {
                    name: nwo.to_string(),
                });
            }

            let mut next = config.clone();
            match parent_list_name {
                Some(list_name) => {
                    let list = next
                        .databases
                        .remote
                        .repository_lists
                        .iter_mut()
                        .find(|l| l.name == list_name)
                        .ok_or_else(|| Error::RemoteListNotFound {
                            name: list_name.to_string(),
                        })?;
                    list.repositories.push(nwo.to_string());
                }
                None => next.databases.remote.repositories.push(nwo.to_string()),
            }
            Ok(next)
        })
    }

    /// Adds several repositories to a list in one write, skipping names the
    /// list already contains.
    pub fn add_remote_repos_to_list(&self, nwos: &[String], parent_list_name: &str) -> Result<()> {
        self.modify(|config| {
            let mut next = config.clone();
            let list = next
                .databases
                .remote
                .repository_lists
                .iter_mut()
                .find(|l| l.name == parent_list_name)
                .ok_or_else(|| Error::RemoteListNotFound {
                    name: parent_list_name.to_string(),
                })?;
            for nwo in nwos {
                if !list.repositories.contains(nwo) {
                    list.repositories.push(nwo.clone());
                }
            }
            Ok(next)
        })
    }

    pub fn add_remote_owner(&self, owner: &str) -> Result<()> {
        self.modify(|config| {
            if config.has_remote_owner(owner) {
                return Err(Error::RemoteOwnerAlreadyExists {
                    name: owner.to_string(),
                });
            }

            let mut next = config.clone();
            next.databases.remote.owners.push(owner.to_string());
            Ok(next)
        })
    }

    pub fn add_remote_list(&self, list_name: &str) -> Result<()> {
        self.modify(|config| {
            if config.find_remote_list(list_name).is_some() {
                return Err(Error::RemoteListAlreadyExists {
                    name: list_name.to_string(),
                });
            }

            let mut next = config.clone();
            next.databases
                .remote
                .repository_lists
                .push(RemoteRepositoryList {
                    name: list_name.to_string(),
                    repositories: Vec::new(),
                });
            Ok(next)
        })
    }

    pub fn add_local_list(&self, list_name: &str) -> Result<()> {
        self.modify(|config| {
            if config.find_local_list(list_name).is_some() {
                return Err(Error::LocalListAlreadyExists {
                    name: list_name.to_string(),
                });
            }

            let mut next = config.clone();
            next.databases.local.lists.push(LocalList {
                name: list_name.to_string(),
                databases: Vec::new(),
            });
            Ok(next)
        })
    }

    pub fn add_local_db(
        &self,
        name: &str,
        language: &str,
        storage_path: &str,
        parent_list_name: Option<&str>,
    ) -> Result<()> {
        self.modify(|config| {
            if config.find_local_db(name, parent_list_name).is_some() {
                return Err(Error::LocalDatabaseAlreadyExists {
                    name: name.to_string(),
                });
            }

            let database = LocalDatabase {
                name: name.to_string(),
                date_added: chrono::Utc::now().timestamp_millis(),
                language: language.to_string(),
                storage_path: storage_path.to_string(),
            };

            let mut next = config.clone();
            match parent_list_name {
                Some(list_name) => {
                    let list = next
                        .databases
                        .local
                        .lists
                        .iter_mut()
                        .find(|l| l.name == list_name)
                        .ok_or_else(|| Error::LocalListNotFound {
                            name: list_name.to_string(),
                        })?;
                    list.databases.push(database);
                }
                None => next.databases.local.databases.push(database),
            }
            Ok(next)
        })
    }

    /// Renames a remote list. Rejected before anything is written when the
    /// new name is taken by a sibling.
    pub fn rename_remote_list(&self, current_name: &str, new_name: &str) -> Result<()> {
        self.modify(|config| {
            if current_name != new_name && config.find_remote_list(new_name).is_some() {
                return Err(Error::RemoteListAlreadyExists {
                    name: new_name.to_string(),
                });
            }
            transform::rename_remote_list(config, current_name, new_name)
        })
    }

    pub fn rename_local_list(&self, current_name: &str, new_name: &str) -> Result<()> {
        self.modify(|config| {
            if current_name != new_name && config.find_local_list(new_name).is_some() {
                return Err(Error::LocalListAlreadyExists {
                    name: new_name.to_string(),
                });
            }
            transform::rename_local_list(config, current_name, new_name)
        })
    }

    pub fn rename_local_db(
        &self,
        current_name: &str,
        new_name: &str,
        parent_list_name: Option<&str>,
    ) -> Result<()> {
        self.modify(|config| {
            if current_name != new_name
                && config.find_local_db(new_name, parent_list_name).is_some()
            {
                return Err(Error::LocalDatabaseAlreadyExists {
                    name: new_name.to_string(),
                });
            }
            transform::rename_local_db(config, current_name, new_name, parent_list_name)
        })
    }

    pub fn remove_remote_list(&self, list_name: &str) -> Result<()> {
        self.modify(|config| Ok(transform::remove_remote_list(config, list_name)))
    }

    pub fn remove_local_list(&self, list_name: &str) -> Result<()> {
        self.modify(|config| Ok(transform::remove_local_list(config, list_name)))
    }

    pub fn remove_local_db(&self, database_name: &str, parent_list_name: Option<&str>) -> Result<()> {
        self.modify(|config| {
            Ok(transform::remove_local_db(
                config,
                database_name,
                parent_list_name,
            ))
        })
    }

    pub fn remove_remote_repo(&self, nwo: &str, parent_list_name: Option<&str>) -> Result<()> {
        self.modify(|config| Ok(transform::remove_remote_repo(config, nwo, parent_list_name)))
    }

    pub fn remove_remote_owner(&self, owner: &str) -> Result<()> {
        self.modify(|config| Ok(transform::remove_remote_owner(config, owner)))
    }

    // ---- existence checks -------------------------------------------------

    pub fn does_remote_list_exist(&self, list_name: &str) -> bool {
        self.with_loaded(|c| c.find_remote_list(list_name).is_some())
    }

    pub fn does_local_list_exist(&self, list_name: &str) -> bool {
        self.with_loaded(|c| c.find_local_list(list_name).is_some())
    }

    pub fn does_remote_owner_exist(&self, owner: &str) -> bool {
        self.with_loaded(|c| c.has_remote_owner(owner))
    }

    pub fn does_remote_db_exist(&self, nwo: &str, list_name: Option<&str>) -> bool {
        self.with_loaded(|c| c.has_remote_repo(nwo, list_name))
    }

    pub fn does_local_db_exist(&self, name: &str, list_name: Option<&str>) -> bool {
        self.with_loaded(|c| c.find_local_db(name, list_name).is_some())
    }

    // ---- internals --------------------------------------------------------

    /// Read-modify-write cycle shared by every mutation: requires a loaded
    /// config, computes the next document, validates it, persists it
    /// atomically, then replaces the snapshot so the caller observes its own
    /// write without waiting for the watcher. A compute step returning an
    /// unchanged document skips the write entirely.
    ///
    /// The validation step keeps the disk, the snapshot and the validator in
    /// agreement: a mutation that would produce a document the next reload
    /// rejects (for example a repository name that fails the schema pattern)
    /// is refused up front instead of wedging the store.
    fn modify<F>(&self, compute: F) -> Result<()>
    where
        F: FnOnce(&DbConfig) -> Result<DbConfig>,
    {
        {
            let mut state = self.shared.lock_state();
            let StoreState::Loaded(current) = &*state else {
                return Err(Error::ConfigNotLoaded);
            };

            let next = compute(current)?;
            if next == *current {
                return Ok(());
            }

            let errors = validate(&serde_json::to_value(&next)?);
            if !errors.is_empty() {
                return Err(Error::InvalidMutation {
                    details: errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                });
            }

            self.shared.write_document(&next)?;
            *state = StoreState::Loaded(next);
        }

        self.shared.notify_changed();
        Ok(())
    }

    fn with_loaded<T: Default>(&self, f: impl FnOnce(&DbConfig) -> T) -> T {
        match &*self.shared.lock_state() {
            StoreState::Loaded(config) => f(config),
            _ => T::default(),
        }
    }

    /// Watches the config file's parent directory: the atomic rename
    /// replaces the file inode, so watching the file itself would go stale
    /// after the first write. Events are debounced and filtered to the
    /// config path.
    fn start_watching(&self) -> Result<()> {
        let mut guard = self
            .debouncer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let mut debouncer = new_debouncer(
            WATCH_DEBOUNCE,
            None,
            move |result: std::result::Result<Vec<DebouncedEvent>, Vec<notify::Error>>| {
                match result {
                    Ok(events) => {
                        let relevant = events.iter().any(|event| {
                            event.event.paths.iter().any(|p| p == &shared.config_path)
                        });
                        if relevant {
                            debug!(
                                "Config file changed on disk, reloading {}",
                                shared.config_path.display()
                            );
                            shared.reload();
                        }
                    }
                    Err(errors) => error!("Config watcher errors: {errors:?}"),
                }
            },
        )?;

        let watch_dir = self
            .shared
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        debouncer
            .watcher()
            .watch(&watch_dir, RecursiveMode::NonRecursive)?;

        *guard = Some(debouncer);
        Ok(())
    }
}

impl Drop for DbConfigStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
