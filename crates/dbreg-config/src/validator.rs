//! Two-phase validation of raw registry documents.
//!
//! Validation never fails and never performs I/O: each phase collects
//! violations into a list for the caller to act on. The structural phase
//! checks the raw JSON against [`crate::schema::db_config_schema`]; the
//! semantic phase runs the duplicate-name checks on the decoded document.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde_json::Value;

use crate::document::DbConfig;
use crate::schema::db_config_schema;

/// A single validation finding, surfaced to the user rather than thrown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbConfigValidationError {
    /// The document does not match the structural schema.
    #[error("{0}")]
    InvalidConfig(String),

    /// Names collide within a uniqueness scope.
    #[error("{0}")]
    DuplicateNames(String),
}

static SCHEMA_VALIDATOR: OnceLock<Option<jsonschema::Validator>> = OnceLock::new();

fn schema_validator() -> Option<&'static jsonschema::Validator> {
    SCHEMA_VALIDATOR
        .get_or_init(|| jsonschema::Validator::new(&db_config_schema()).ok())
        .as_ref()
}

/// Validates a raw decoded document. Both phases run and their results are
/// concatenated; the semantic phase requires a decodable document and is
/// skipped when decoding is impossible (the structural phase has already
/// reported why).
pub fn validate(raw: &Value) -> Vec<DbConfigValidationError> {
    let mut errors = validate_structure(raw);

    if let Ok(config) = serde_json::from_value::<DbConfig>(raw.clone()) {
        errors.extend(validate_names(&config));
    }

    errors
}

fn validate_structure(raw: &Value) -> Vec<DbConfigValidationError> {
    let Some(validator) = schema_validator() else {
        // The embedded schema failed to compile; report rather than panic.
        return vec![DbConfigValidationError::InvalidConfig(
            "Internal error: config schema failed to compile".to_string(),
        )];
    };

    validator
        .iter_errors(raw)
        .map(|error| {
            let path = error.instance_path().to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            DbConfigValidationError::InvalidConfig(format!("{path}: {error}"))
        })
        .collect()
}

/// Semantic duplicate-name checks: list names per kind, top-level names per
/// scope, and names within each individual list.
pub fn validate_names(config: &DbConfig) -> Vec<DbConfigValidationError> {
    let mut errors = Vec::new();

    let remote = &config.databases.remote;
    let local = &config.databases.local;

    if let Some(names) = find_duplicates(remote.repository_lists.iter().map(|l| l.name.as_str())) {
        errors.push(DbConfigValidationError::DuplicateNames(format!(
            "There are remote lists with the same name: {}",
            names.join(", ")
        )));
    }

    if let Some(names) = find_duplicates(local.lists.iter().map(|l| l.name.as_str())) {
        errors.push(DbConfigValidationError::DuplicateNames(format!(
            "There are local lists with the same name: {}",
            names.join(", ")
        )));
    }

    if let Some(names) = find_duplicates(remote.repositories.iter().map(String::as_str)) {
        errors.push(DbConfigValidationError::DuplicateNames(format!(
            "There are remote repositories with the same name: {}",
            names.join(", ")
        )));
    }

    if let Some(names) = find_duplicates(local.databases.iter().map(|db| db.name.as_str())) {
        errors.push(DbConfigValidationError::DuplicateNames(format!(
            "There are local databases with the same name: {}",
            names.join(", ")
        )));
    }

    for list in &remote.repository_lists {
        if let Some(names) = find_duplicates(list.repositories.iter().map(String::as_str)) {
            errors.push(DbConfigValidationError::DuplicateNames(format!(
                "There are repositories with the same name in the list '{}': {}",
                list.name,
                names.join(", ")
            )));
        }
    }

    for list in &local.lists {
        if let Some(names) = find_duplicates(list.databases.iter().map(|db| db.name.as_str())) {
            errors.push(DbConfigValidationError::DuplicateNames(format!(
                "There are databases with the same name in the list '{}': {}",
                list.name,
                names.join(", ")
            )));
        }
    }

    errors
}

/// Collects values appearing more than once, each reported exactly once, in
/// first-collision order.
fn find_duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for name in names {
        if !seen.insert(name) && !duplicates.iter().any(|d| d == name) {
            duplicates.push(name.to_string());
        }
    }

    if duplicates.is_empty() {
        None
    } else {
        Some(duplicates)
    }
}
