//! Persisted registry document and config store
//!
//! This crate owns the on-disk lifecycle of the registry's configuration
//! document:
//!
//! - **Document model**: the versioned [`DbConfig`] record persisted as
//!   human-editable JSON, including the name-path encodings of the selected
//!   item and the expanded containers.
//! - **Pure transforms**: rename and remove operations that compute the next
//!   document value without performing I/O, keeping the `selected` and
//!   `expanded` projections consistent.
//! - **Validator**: a structural JSON-Schema phase plus a semantic
//!   duplicate-name phase, both returning errors instead of failing.
//! - **Config store**: load-or-create, atomic persist, watcher-driven reload
//!   and the typed mutation API every collaborator must route through.

pub mod document;
pub mod error;
pub mod schema;
pub mod store;
pub mod transform;
pub mod validator;

pub use document::{
    DB_CONFIG_FILE_NAME, DB_CONFIG_VERSION, DbConfig, DbConfigDatabases, ExpandedDbItem,
    LocalDatabase, LocalDbConfig, LocalList, RemoteDbConfig, RemoteRepositoryList, SelectedDbItem,
};
pub use error::{Error, Result};
pub use store::{ConfigErrorSink, DbConfigStore, NoopErrorSink};
pub use validator::{DbConfigValidationError, validate};
