//! Pure config transforms for rename and remove operations.
//!
//! Each function computes the *next* document value from the current one
//! without performing any I/O. The `selected` and `expanded` name-path
//! projections are kept consistent in the same step: a rename rewrites any
//! projection entry naming the old path, a removal drops it. The input
//! document is never mutated; every output is a fresh value.

use crate::document::{DbConfig, ExpandedDbItem, SelectedDbItem};
use crate::error::{Error, Result};

/// Renames a remote list, rewriting `selected` and `expanded` entries that
/// reference it by its old name.
pub fn rename_remote_list(
    original: &DbConfig,
    current_name: &str,
    new_name: &str,
) -> Result<DbConfig> {
    let mut config = original.clone();

    let list = config
        .databases
        .remote
        .repository_lists
        .iter_mut()
        .find(|l| l.name == current_name)
        .ok_or_else(|| Error::RemoteListNotFound {
            name: current_name.to_string(),
        })?;
    list.name = new_name.to_string();

    match &mut config.selected {
        Some(SelectedDbItem::RemoteUserDefinedList { list_name }) if list_name == current_name => {
            *list_name = new_name.to_string();
        }
        Some(SelectedDbItem::RemoteRepository {
            list_name: Some(list_name),
            ..
        }) if list_name == current_name => {
            *list_name = new_name.to_string();
        }
        _ => {}
    }

    for item in &mut config.expanded {
        if let ExpandedDbItem::RemoteUserDefinedList { list_name } = item
            && list_name == current_name
        {
            *list_name = new_name.to_string();
        }
    }

    Ok(config)
}

/// Renames a local list, rewriting `selected` and `expanded` entries that
/// reference it by its old name.
pub fn rename_local_list(
    original: &DbConfig,
    current_name: &str,
    new_name: &str,
) -> Result<DbConfig> {
    let mut config = original.clone();

    let list = config
        .databases
        .local
        .lists
        .iter_mut()
        .find(|l| l.name == current_name)
        .ok_or_else(|| Error::LocalListNotFound {
            name: current_name.to_string(),
        })?;
    list.name = new_name.to_string();

    match &mut config.selected {
        Some(SelectedDbItem::LocalUserDefinedList { list_name }) if list_name == current_name => {
            *list_name = new_name.to_string();
        }
        Some(SelectedDbItem::LocalDatabase {
            list_name: Some(list_name),
            ..
        }) if list_name == current_name => {
            *list_name = new_name.to_string();
        }
        _ => {}
    }

    for item in &mut config.expanded {
        if let ExpandedDbItem::LocalUserDefinedList { list_name } = item
            && list_name == current_name
        {
            *list_name = new_name.to_string();
        }
    }

    Ok(config)
}

/// Renames a local database, either inside the given parent list or among
/// the loose top-level databases. Rewrites `selected` if it names the same
/// path.
pub fn rename_local_db(
    original: &DbConfig,
    current_name: &str,
    new_name: &str,
    parent_list_name: Option<&str>,
) -> Result<DbConfig> {
    let mut config = original.clone();

    let databases = match parent_list_name {
        Some(list_name) => {
            &mut config
                .databases
                .local
                .lists
                .iter_mut()
                .find(|l| l.name == list_name)
                .ok_or_else(|| Error::LocalListNotFound {
                    name: list_name.to_string(),
                })?
                .databases
        }
        None => &mut config.databases.local.databases,
    };

    let db = databases
        .iter_mut()
        .find(|db| db.name == current_name)
        .ok_or_else(|| Error::LocalDatabaseNotFound {
            name: current_name.to_string(),
        })?;
    db.name = new_name.to_string();

    if let Some(SelectedDbItem::LocalDatabase {
        database_name,
        list_name,
    }) = &mut config.selected
        && database_name == current_name
        && list_name.as_deref() == parent_list_name
    {
        *database_name = new_name.to_string();
    }

    Ok(config)
}

/// Removes a remote list. Clears `selected` if it named the list or a
/// repository inside it, and drops the list's `expanded` entry.
pub fn remove_remote_list(original: &DbConfig, list_name: &str) -> DbConfig {
    let mut config = original.clone();

    config
        .databases
        .remote
        .repository_lists
        .retain(|l| l.name != list_name);

    config.selected = match config.selected.take() {
        Some(SelectedDbItem::RemoteUserDefinedList { list_name: name }) if name == list_name => {
            None
        }
        Some(SelectedDbItem::RemoteRepository {
            list_name: Some(name),
            ..
        }) if name == list_name => None,
        other => other,
    };

    config.expanded.retain(|item| {
        !matches!(item, ExpandedDbItem::RemoteUserDefinedList { list_name: name } if name == list_name)
    });

    config
}

/// Removes a local list. Clears `selected` if it named the list or a
/// database inside it, and drops the list's `expanded` entry.
pub fn remove_local_list(original: &DbConfig, list_name: &str) -> DbConfig {
    let mut config = original.clone();

    config.databases.local.lists.retain(|l| l.name != list_name);

    config.selected = match config.selected.take() {
        Some(SelectedDbItem::LocalUserDefinedList { list_name: name }) if name == list_name => None,
        Some(SelectedDbItem::LocalDatabase {
            list_name: Some(name),
            ..
        }) if name == list_name => None,
        other => other,
    };

    config.expanded.retain(|item| {
        !matches!(item, ExpandedDbItem::LocalUserDefinedList { list_name: name } if name == list_name)
    });

    config
}

/// Removes a local database from the given scope, clearing `selected` if it
/// named the same path.
pub fn remove_local_db(
    original: &DbConfig,
    database_name: &str,
    parent_list_name: Option<&str>,
) -> DbConfig {
    let mut config = original.clone();

    match parent_list_name {
        Some(list_name) => {
            if let Some(list) = config
                .databases
                .local
                .lists
                .iter_mut()
                .find(|l| l.name == list_name)
            {
                list.databases.retain(|db| db.name != database_name);
            }
        }
        None => {
            config
                .databases
                .local
                .databases
                .retain(|db| db.name != database_name);
        }
    }

    config.selected = match config.selected.take() {
        Some(SelectedDbItem::LocalDatabase {
            database_name: name,
            list_name,
        }) if name == database_name && list_name.as_deref() == parent_list_name => None,
        other => other,
    };

    config
}

/// Removes a remote repository from the given scope, clearing `selected` if
/// it named the same path.
pub fn remove_remote_repo(
    original: &DbConfig,
    repo_full_name: &str,
    parent_list_name: Option<&str>,
) -> DbConfig {
    let mut config = original.clone();

    match parent_list_name {
        Some(list_name) => {
            if let Some(list) = config
                .databases
                .remote
                .repository_lists
                .iter_mut()
                .find(|l| l.name == list_name)
            {
                list.repositories.retain(|r| r != repo_full_name);
            }
        }
        None => {
            config
                .databases
                .remote
                .repositories
                .retain(|r| r != repo_full_name);
        }
    }

    config.selected = match config.selected.take() {
        Some(SelectedDbItem::RemoteRepository {
            repository_name,
            list_name,
        }) if repository_name == repo_full_name && list_name.as_deref() == parent_list_name => None,
        other => other,
    };

    config
}

/// Removes a remote owner, clearing `selected` if it named that owner.
pub fn remove_remote_owner(original: &DbConfig, owner_name: &str) -> DbConfig {
    let mut config = original.clone();

    config.databases.remote.owners.retain(|o| o != owner_name);

    config.selected = match config.selected.take() {
        Some(SelectedDbItem::RemoteOwner { owner_name: name }) if name == owner_name => None,
        other => other,
    };

    config
}
