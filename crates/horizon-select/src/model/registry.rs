//! The ordered catalog of selectable entries.

use std::collections::{BTreeSet, HashMap};

use horizon_select_core::logging::targets;

use super::item::{GroupHeader, GroupMap, Item, ItemEntry, ItemKey};
use crate::error::{Result, SelectError};

/// Ordered catalog of items with their flags.
///
/// The registry is rebuilt wholesale on every load. Insertion order is the
/// total order used to align multi-selections and to find group members.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    /// Items in insertion order.
    items: Vec<Item>,
    /// Key -> position in `items`.
    positions: HashMap<ItemKey, usize>,
    /// Values in load order; the sort key for aligned selections.
    order_index: Vec<String>,
    /// Group headers keyed by their starting item.
    groups: GroupMap,
}

impl ItemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all items.
    ///
    /// Fails with [`SelectError::EmptyInput`] if `items` yields nothing; the
    /// previous contents are left untouched in that case. Keys found in
    /// `disabled` are registered as disabled; keys found in `groups` start a
    /// group. A repeated key keeps its first occurrence.
    pub fn load<I, E>(
        &mut self,
        items: I,
        groups: &GroupMap,
        disabled: &BTreeSet<ItemKey>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<ItemEntry>,
    {
        let entries: Vec<ItemEntry> = items.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(SelectError::EmptyInput);
        }

        let mut loaded = Vec::with_capacity(entries.len());
        let mut positions = HashMap::with_capacity(entries.len());
        for entry in entries {
            if positions.contains_key(&entry.key) {
                tracing::warn!(target: targets::REGISTRY, key = %entry.key, "duplicate key ignored");
                continue;
            }
            positions.insert(entry.key.clone(), loaded.len());
            loaded.push(Item {
                enabled: !disabled.contains(&entry.key),
                is_group_start: groups.contains_key(&entry.key),
                key: entry.key,
                value: entry.value,
                selectable: entry.selectable,
                checkable: entry.checkable,
                collectable: entry.collectable,
            });
        }

        for key in groups.keys().filter(|key| !positions.contains_key(*key)) {
            tracing::warn!(target: targets::REGISTRY, key = %key, "group header for unknown key");
        }

        self.order_index = loaded.iter().map(|item| item.value.clone()).collect();
        self.groups = groups
            .iter()
            .filter(|(key, _)| positions.contains_key(*key))
            .map(|(key, header)| (key.clone(), header.clone()))
            .collect();
        self.items = loaded;
        self.positions = positions;

        tracing::debug!(
            target: targets::REGISTRY,
            items = self.items.len(),
            groups = self.groups.len(),
            "registry loaded"
        );
        Ok(())
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
        self.order_index.clear();
        self.groups.clear();
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no items are registered.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Returns the item at a registry position.
    pub fn item_at(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Looks up an item by key.
    pub fn get(&self, key: &ItemKey) -> Option<&Item> {
        self.position_of(key).and_then(|pos| self.items.get(pos))
    }

    /// Returns true if the key is registered.
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.positions.contains_key(key)
    }

    /// Looks up the value shown for a key.
    pub fn lookup_value_by_key(&self, key: &ItemKey) -> Option<&str> {
        self.get(key).map(|item| item.value.as_str())
    }

    /// Returns the registry position of a key.
    pub fn position_of(&self, key: &ItemKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Returns the position of the first occurrence of `value` in load order.
    ///
    /// Values need not be unique, so this is a sort key and not an identity.
    pub fn order_index_of(&self, value: &str) -> Option<usize> {
        self.order_index.iter().position(|v| v == value)
    }

    /// The first item in registry order.
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    /// The first enabled, selectable item in registry order.
    pub fn first_enabled(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.can_select())
    }

    /// The header introducing the group started by `key`, if any.
    pub fn group_header(&self, key: &ItemKey) -> Option<&GroupHeader> {
        self.groups.get(key)
    }
}
