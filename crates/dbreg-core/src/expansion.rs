//! Expanded-state bookkeeping.
//!
//! The document persists which containers are expanded as a list of name
//! paths. These helpers keep that list coherent: set-like updates when a
//! container is toggled, path rewrites when a container is renamed, and
//! pruning of entries whose container no longer exists in the tree.

use dbreg_config::ExpandedDbItem;

use crate::item::{DbItem, flatten_db_items};

/// Projects a tree node into the name path persisted for an expanded
/// container. Only roots and user-defined lists are collapsible.
pub fn map_db_item_to_expanded(item: &DbItem) -> Option<ExpandedDbItem> {
    match item {
        DbItem::RootLocal(_) => Some(ExpandedDbItem::RootLocal),
        DbItem::RootRemote(_) => Some(ExpandedDbItem::RootRemote),
        DbItem::LocalList(list) => Some(ExpandedDbItem::LocalUserDefinedList {
            list_name: list.list_name.clone(),
        }),
        DbItem::RemoteUserDefinedList(list) => Some(ExpandedDbItem::RemoteUserDefinedList {
            list_name: list.list_name.clone(),
        }),
        DbItem::LocalDatabase(_)
        | DbItem::RemoteSystemDefinedList(_)
        | DbItem::RemoteOwner(_)
        | DbItem::RemoteRepo(_) => None,
    }
}

/// Returns the expanded list with `item` added or removed. Adding an entry
/// that is already present, or removing one that is absent, yields the
/// input unchanged.
pub fn update_expanded_item(
    current: &[ExpandedDbItem],
    item: &ExpandedDbItem,
    is_expanded: bool,
) -> Vec<ExpandedDbItem> {
    if is_expanded {
        if current.contains(item) {
            return current.to_vec();
        }
        let mut next = current.to_vec();
        next.push(item.clone());
        next
    } else {
        current
            .iter()
            .filter(|existing| *existing != item)
            .cloned()
            .collect()
    }
}

/// Rewrites one entry in place, preserving order. Used when a container is
/// renamed so its expanded state follows the new name.
pub fn replace_expanded_item(
    current: &[ExpandedDbItem],
    old: &ExpandedDbItem,
    new: ExpandedDbItem,
) -> Vec<ExpandedDbItem> {
    current
        .iter()
        .map(|existing| {
            if existing == old {
                new.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

/// Drops entries whose container no longer appears in the given trees.
pub fn clean_nonexistent_expanded_items(
    current: &[ExpandedDbItem],
    items: &[DbItem],
) -> Vec<ExpandedDbItem> {
    let existing: Vec<ExpandedDbItem> = flatten_db_items(items)
        .iter()
        .filter_map(map_db_item_to_expanded)
        .collect();
    current
        .iter()
        .filter(|entry| existing.contains(entry))
        .cloned()
        .collect()
}
