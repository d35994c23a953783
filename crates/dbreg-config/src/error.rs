//! Error types for dbreg-config

/// Result type for dbreg-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dbreg-config operations
///
/// Read-side problems (unreadable or invalid files) are not represented
/// here; they flip the store into an unavailable state and surface as
/// [`crate::DbConfigValidationError`] values from `get_config`. This enum
/// covers caller bugs and write-side failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mutation was attempted while no valid config is loaded. This is a
    /// caller bug: mutations require a successfully initialized store.
    #[error("Config is not loaded; initialize the store before mutating it")]
    ConfigNotLoaded,

    #[error("Cannot find remote list '{name}'")]
    RemoteListNotFound { name: String },

    #[error("Cannot find local list '{name}'")]
    LocalListNotFound { name: String },

    #[error("Cannot find local database '{name}'")]
    LocalDatabaseNotFound { name: String },

    #[error("A remote list with the name '{name}' already exists")]
    RemoteListAlreadyExists { name: String },

    #[error("A local list with the name '{name}' already exists")]
    LocalListAlreadyExists { name: String },

    #[error("An owner with the name '{name}' already exists")]
    RemoteOwnerAlreadyExists { name: String },

    #[error("A repository with the name '{name}' already exists")]
    RemoteRepoAlreadyExists { name: String },

    #[error("A local database with the name '{name}' already exists")]
    LocalDatabaseAlreadyExists { name: String },

    /// The computed next document failed validation, so nothing was written
    #[error("Mutation rejected, the resulting config would be invalid: {details}")]
    InvalidMutation { details: String },

    /// Filesystem error from dbreg-fs
    #[error(transparent)]
    Fs(#[from] dbreg_fs::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// File watcher error
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}
