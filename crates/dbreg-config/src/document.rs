//! Models for the data stored in the registry's config document.
//!
//! Changes to these models should be done carefully and account for
//! backwards compatibility of data already on disk.

use serde::{Deserialize, Serialize};

/// Version tag written into every document. Present for forward schema
/// evolution; no migration logic exists for it yet.
pub const DB_CONFIG_VERSION: u32 = 1;

/// Default file name of the persisted document.
pub const DB_CONFIG_FILE_NAME: &str = "workspace-databases.json";

/// The persisted registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    pub version: u32,
    pub databases: DbConfigDatabases,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<SelectedDbItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expanded: Vec<ExpandedDbItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfigDatabases {
    pub remote: RemoteDbConfig,
    pub local: LocalDbConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct RemoteDbConfig {
    pub repository_lists: Vec<RemoteRepositoryList>,
    pub owners: Vec<String>,
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteRepositoryList {
    pub name: String,
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalDbConfig {
    pub lists: Vec<LocalList>,
    pub databases: Vec<LocalDatabase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalList {
    pub name: String,
    pub databases: Vec<LocalDatabase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LocalDatabase {
    pub name: String,
    /// Epoch milliseconds at which the database was added.
    pub date_added: i64,
    pub language: String,
    pub storage_path: String,
}

/// The single "currently selected" item, addressed by name path rather than
/// by object identity: the derived tree is rebuilt on every read, so a
/// persisted reference must survive rebuilds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SelectedDbItem {
    LocalUserDefinedList {
        list_name: String,
    },
    LocalDatabase {
        database_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        list_name: Option<String>,
    },
    RemoteSystemDefinedList {
        list_name: String,
    },
    RemoteUserDefinedList {
        list_name: String,
    },
    RemoteOwner {
        owner_name: String,
    },
    RemoteRepository {
        repository_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        list_name: Option<String>,
    },
}

/// A container node whose UI-expansion state is persisted across sessions,
/// addressed by name path like [`SelectedDbItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ExpandedDbItem {
    RootLocal,
    RootRemote,
    LocalUserDefinedList { list_name: String },
    RemoteUserDefinedList { list_name: String },
}

impl DbConfig {
    /// A freshly-constructed document: version tag, empty collections, no
    /// selection, nothing expanded.
    pub fn empty() -> Self {
        Self {
            version: DB_CONFIG_VERSION,
            databases: DbConfigDatabases {
                remote: RemoteDbConfig {
                    repository_lists: Vec::new(),
                    owners: Vec::new(),
                    repositories: Vec::new(),
                },
                local: LocalDbConfig {
                    lists: Vec::new(),
                    databases: Vec::new(),
                },
            },
            selected: None,
            expanded: Vec::new(),
        }
    }

    pub fn find_remote_list(&self, name: &str) -> Option<&RemoteRepositoryList> {
        self.databases
            .remote
            .repository_lists
            .iter()
            .find(|l| l.name == name)
    }

    pub fn find_local_list(&self, name: &str) -> Option<&LocalList> {
        self.databases.local.lists.iter().find(|l| l.name == name)
    }

    /// Looks up a local database by name, either inside the named list or
    /// among the loose top-level databases.
    pub fn find_local_db(&self, name: &str, list_name: Option<&str>) -> Option<&LocalDatabase> {
        match list_name {
            Some(list) => self
                .find_local_list(list)?
                .databases
                .iter()
                .find(|db| db.name == name),
            None => self
                .databases
                .local
                .databases
                .iter()
                .find(|db| db.name == name),
        }
    }

    /// Looks up a remote repository by full name, either inside the named
    /// list or among the loose top-level repositories.
    pub fn has_remote_repo(&self, nwo: &str, list_name: Option<&str>) -> bool {
        match list_name {
            Some(list) => self
                .find_remote_list(list)
                .is_some_and(|l| l.repositories.iter().any(|r| r == nwo)),
            None => self.databases.remote.repositories.iter().any(|r| r == nwo),
        }
    }

    pub fn has_remote_owner(&self, owner: &str) -> bool {
        self.databases.remote.owners.iter().any(|o| o == owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_document_has_version_and_no_selection() {
        let config = DbConfig::empty();

        assert_eq!(config.version, DB_CONFIG_VERSION);
        assert_eq!(config.selected, None);
        assert!(config.expanded.is_empty());
        assert!(config.databases.remote.repository_lists.is_empty());
        assert!(config.databases.local.databases.is_empty());
    }

    #[test]
    fn empty_document_serializes_without_optional_fields() {
        let value = serde_json::to_value(DbConfig::empty()).unwrap();

        assert_eq!(
            value,
            json!({
                "version": 1,
                "databases": {
                    "remote": {
                        "repositoryLists": [],
                        "owners": [],
                        "repositories": []
                    },
                    "local": {
                        "lists": [],
                        "databases": []
                    }
                }
            })
        );
    }

    #[test]
    fn selected_item_round_trips_with_kind_tag() {
        let selected = SelectedDbItem::RemoteRepository {
            repository_name: "owner1/repo1".to_string(),
            list_name: Some("my-list".to_string()),
        };

        let value = serde_json::to_value(&selected).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "remoteRepository",
                "repositoryName": "owner1/repo1",
                "listName": "my-list"
            })
        );

        let decoded: SelectedDbItem = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, selected);
    }

    #[test]
    fn expanded_root_serializes_as_bare_kind() {
        let value = serde_json::to_value(ExpandedDbItem::RootRemote).unwrap();
        assert_eq!(value, json!({ "kind": "rootRemote" }));
    }

    #[test]
    fn find_local_db_distinguishes_scopes() {
        let mut config = DbConfig::empty();
        config.databases.local.lists.push(LocalList {
            name: "list1".to_string(),
            databases: vec![LocalDatabase {
                name: "db1".to_string(),
                date_added: 1234,
                language: "java".to_string(),
                storage_path: "/a".to_string(),
            }],
        });
        config.databases.local.databases.push(LocalDatabase {
            name: "db1".to_string(),
            date_added: 5678,
            language: "cpp".to_string(),
            storage_path: "/b".to_string(),
        });

        assert_eq!(
            config.find_local_db("db1", Some("list1")).unwrap().language,
            "java"
        );
        assert_eq!(config.find_local_db("db1", None).unwrap().language, "cpp");
        assert!(config.find_local_db("db1", Some("other")).is_none());
    }
}
