//! Error types for dbreg-core

use dbreg_config::DbConfigValidationError;

use crate::item::DbItemKind;

/// Result type for dbreg-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dbreg-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config store error
    #[error(transparent)]
    Config(#[from] dbreg_config::Error),

    /// The config file on disk failed validation; the item tree cannot be
    /// derived until the file is fixed
    #[error("The config file is invalid: {}", format_errors(errors))]
    InvalidConfig { errors: Vec<DbConfigValidationError> },

    /// A rename was requested for an item kind that has no user-defined name
    #[error("Items of kind {kind:?} cannot be renamed")]
    NotRenameable { kind: DbItemKind },

    /// A removal was requested for an item kind that is not persisted
    #[error("Items of kind {kind:?} cannot be removed")]
    NotRemovable { kind: DbItemKind },
}

fn format_errors(errors: &[DbConfigValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
