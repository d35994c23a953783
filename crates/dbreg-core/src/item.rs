//! The derived, in-memory item tree.
//!
//! `DbItem` is a closed sum type keyed by [`DbItemKind`]; exhaustive
//! matching replaces the virtual dispatch a UI framework would provide, so
//! adding a kind is a compile-time-visible change everywhere it matters.
//! Items are built fresh from the current config on every read and are
//! never mutated in place.

/// Discriminant for [`DbItem`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbItemKind {
    RootLocal,
    RootRemote,
    LocalList,
    LocalDatabase,
    RemoteSystemDefinedList,
    RemoteUserDefinedList,
    RemoteOwner,
    RemoteRepo,
}

/// A node of the derived tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbItem {
    RootLocal(RootLocalDbItem),
    RootRemote(RootRemoteDbItem),
    LocalList(LocalListDbItem),
    LocalDatabase(LocalDatabaseDbItem),
    RemoteSystemDefinedList(RemoteSystemDefinedListDbItem),
    RemoteUserDefinedList(RemoteUserDefinedListDbItem),
    RemoteOwner(RemoteOwnerDbItem),
    RemoteRepo(RemoteRepoDbItem),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLocalDbItem {
    pub expanded: bool,
    pub children: Vec<DbItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootRemoteDbItem {
    pub expanded: bool,
    pub children: Vec<DbItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalListDbItem {
    pub selected: bool,
    pub expanded: bool,
    pub list_name: String,
    pub databases: Vec<LocalDatabaseDbItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDatabaseDbItem {
    pub selected: bool,
    pub database_name: String,
    pub date_added: i64,
    pub language: String,
    pub storage_path: String,
    /// Name of the owning list; `None` for loose top-level databases. Makes
    /// the leaf's full path unambiguous when the same name appears in
    /// several lists.
    pub parent_list_name: Option<String>,
}

/// A built-in "Top N" list, synthesized at tree-build time and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSystemDefinedListDbItem {
    pub selected: bool,
    pub list_name: String,
    pub list_display_name: String,
    pub list_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUserDefinedListDbItem {
    pub selected: bool,
    pub expanded: bool,
    pub list_name: String,
    pub repos: Vec<RemoteRepoDbItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOwnerDbItem {
    pub selected: bool,
    pub owner_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepoDbItem {
    pub selected: bool,
    pub repo_full_name: String,
    /// Name of the owning list; `None` for loose top-level repositories.
    pub parent_list_name: Option<String>,
}

impl DbItem {
    pub fn kind(&self) -> DbItemKind {
        match self {
            DbItem::RootLocal(_) => DbItemKind::RootLocal,
            DbItem::RootRemote(_) => DbItemKind::RootRemote,
            DbItem::LocalList(_) => DbItemKind::LocalList,
            DbItem::LocalDatabase(_) => DbItemKind::LocalDatabase,
            DbItem::RemoteSystemDefinedList(_) => DbItemKind::RemoteSystemDefinedList,
            DbItem::RemoteUserDefinedList(_) => DbItemKind::RemoteUserDefinedList,
            DbItem::RemoteOwner(_) => DbItemKind::RemoteOwner,
            DbItem::RemoteRepo(_) => DbItemKind::RemoteRepo,
        }
    }

    /// The item's own `selected` flag. Roots are never selectable.
    pub fn selected(&self) -> bool {
        match self {
            DbItem::RootLocal(_) | DbItem::RootRemote(_) => false,
            DbItem::LocalList(item) => item.selected,
            DbItem::LocalDatabase(item) => item.selected,
            DbItem::RemoteSystemDefinedList(item) => item.selected,
            DbItem::RemoteUserDefinedList(item) => item.selected,
            DbItem::RemoteOwner(item) => item.selected,
            DbItem::RemoteRepo(item) => item.selected,
        }
    }

    /// The display name a consumer would label this node with.
    pub fn display_name(&self) -> &str {
        match self {
            DbItem::RootLocal(_) => "Local databases",
            DbItem::RootRemote(_) => "Remote databases",
            DbItem::LocalList(item) => &item.list_name,
            DbItem::LocalDatabase(item) => &item.database_name,
            DbItem::RemoteSystemDefinedList(item) => &item.list_display_name,
            DbItem::RemoteUserDefinedList(item) => &item.list_name,
            DbItem::RemoteOwner(item) => &item.owner_name,
            DbItem::RemoteRepo(item) => &item.repo_full_name,
        }
    }
}

/// Pre-order traversal producing every node, containers and leaves alike,
/// as one ordered sequence. Lets callers search by kind or name without
/// re-implementing recursion at each call site.
pub fn flatten_db_items(items: &[DbItem]) -> Vec<DbItem> {
    let mut flattened = Vec::new();
    for item in items {
        flatten_into(item, &mut flattened);
    }
    flattened
}

fn flatten_into(item: &DbItem, out: &mut Vec<DbItem>) {
    out.push(item.clone());
    match item {
        DbItem::RootLocal(root) => {
            for child in &root.children {
                flatten_into(child, out);
            }
        }
        DbItem::RootRemote(root) => {
            for child in &root.children {
                flatten_into(child, out);
            }
        }
        DbItem::LocalList(list) => {
            for db in &list.databases {
                out.push(DbItem::LocalDatabase(db.clone()));
            }
        }
        DbItem::RemoteUserDefinedList(list) => {
            for repo in &list.repos {
                out.push(DbItem::RemoteRepo(repo.clone()));
            }
        }
        DbItem::LocalDatabase(_)
        | DbItem::RemoteSystemDefinedList(_)
        | DbItem::RemoteOwner(_)
        | DbItem::RemoteRepo(_) => {}
    }
}
