//! Derived item model and registry facade
//!
//! This crate turns a validated config document into a read-only tree of
//! "db items" and exposes the single cohesive API external collaborators
//! use:
//!
//! - **Item model**: the [`DbItem`] sum type, rebuilt fresh from the current
//!   document on every read and never mutated in place.
//! - **Tree construction**: remote and local trees in a fixed child order,
//!   with `selected`/`expanded` flags resolved by name-path lookup.
//! - **Selection and expansion**: pure projections between concrete tree
//!   nodes and the name-path entries the document persists.
//! - **Registry facade**: [`DbManager`], which composes the config store
//!   with the item model and re-derives the tree from the latest config on
//!   every call.

pub mod error;
pub mod expansion;
pub mod item;
pub mod manager;
pub mod selection;
pub mod tree;

pub use error::{Error, Result};
pub use expansion::{
    clean_nonexistent_expanded_items, map_db_item_to_expanded, replace_expanded_item,
    update_expanded_item,
};
pub use item::{
    DbItem, DbItemKind, LocalDatabaseDbItem, LocalListDbItem, RemoteOwnerDbItem,
    RemoteRepoDbItem, RemoteSystemDefinedListDbItem, RemoteUserDefinedListDbItem,
    RootLocalDbItem, RootRemoteDbItem, flatten_db_items,
};
pub use manager::{DbManager, ListKind};
pub use selection::{get_selected_db_item, map_db_item_to_selected};
pub use tree::{TreeViewOptions, create_local_tree, create_remote_tree};
