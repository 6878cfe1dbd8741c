//! Selection state for the select box.
//!
//! [`SelectionState`] holds the current selection as an ordered list of
//! `(key, value)` pairs. In multi mode the order always follows the registry
//! (catalog order), never the order of clicks.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use horizon_select::model::{GroupMap, ItemRegistry, SelectionMode, SelectionState};
//!
//! let mut registry = ItemRegistry::new();
//! registry
//!     .load([("a", "A"), ("b", "B"), ("c", "C")], &GroupMap::new(), &BTreeSet::new())
//!     .unwrap();
//!
//! let mut selection = SelectionState::new(SelectionMode::Multi);
//! selection.select_one(&registry, &"c".into()).unwrap();
//! selection.select_one(&registry, &"a".into()).unwrap();
//! selection.align(&registry);
//!
//! let keys: Vec<&str> = selection.keys().map(|k| k.as_str()).collect();
//! assert_eq!(keys, vec!["a", "c"]);
//! ```

use std::collections::BTreeSet;

use horizon_select_core::logging::targets;

use super::item::{Item, ItemKey};
use super::registry::ItemRegistry;
use crate::error::SelectWarning;

/// Selection cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Exactly one item is selected (default).
    #[default]
    Single,
    /// One or more items are selected.
    Multi,
}

impl SelectionMode {
    /// Mode for a `multiselect` flag.
    pub fn from_multiselect(multiselect: bool) -> Self {
        if multiselect { Self::Multi } else { Self::Single }
    }

    /// Returns true for [`SelectionMode::Multi`].
    pub fn is_multi(self) -> bool {
        self == Self::Multi
    }
}

/// Looks up a key that may be selected: it must exist, be enabled and be
/// selectable.
pub(crate) fn resolve_enabled<'a>(
    registry: &'a ItemRegistry,
    key: &ItemKey,
) -> Result<&'a Item, SelectWarning> {
    match registry.get(key) {
        None => Err(SelectWarning::KeyNotFound(key.clone())),
        Some(item) if !item.enabled => Err(SelectWarning::ItemDisabled(key.clone())),
        Some(item) if !item.selectable => Err(SelectWarning::NotSelectable(key.clone())),
        Some(item) => Ok(item),
    }
}

/// The current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selection cardinality.
    mode: SelectionMode,
    /// Selected entries, unique by key.
    entries: Vec<(ItemKey, String)>,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    // =========================================================================
    // Mode
    // =========================================================================

    /// Gets the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Sets the selection mode.
    ///
    /// The entries are left alone; collapsing a multi-selection is the
    /// component's decision.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of selected items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if a key is selected.
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns true if `key` is the only selected item.
    pub fn is_sole(&self, key: &ItemKey) -> bool {
        self.entries.len() == 1 && self.contains(key)
    }

    /// The selected `(key, value)` pairs in iteration order.
    pub fn entries(&self) -> &[(ItemKey, String)] {
        &self.entries
    }

    /// Iterates over the selected keys.
    pub fn keys(&self) -> impl Iterator<Item = &ItemKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over the selected values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, v)| v.as_str())
    }

    /// The first entry in iteration order.
    pub fn first(&self) -> Option<(&ItemKey, &str)> {
        self.entries.first().map(|(k, v)| (k, v.as_str()))
    }

    /// The selected keys as a set.
    pub fn key_set(&self) -> BTreeSet<ItemKey> {
        self.keys().cloned().collect()
    }

    /// Returns true if another item fits under `max`.
    pub fn has_capacity(&self, max: Option<usize>) -> bool {
        max.is_none_or(|max| self.entries.len() < max)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds an entry; returns false if the key was already selected.
    pub fn insert(&mut self, key: ItemKey, value: impl Into<String>) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Removes an entry; returns false if the key wasn't selected.
    pub fn remove(&mut self, key: &ItemKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        self.entries.len() != before
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keeps the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Drops entries whose item is not collectable.
    ///
    /// Returns the number of entries removed.
    pub fn retain_collectable(&mut self, registry: &ItemRegistry) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|(key, _)| registry.get(key).is_none_or(|item| item.collectable));
        before - self.entries.len()
    }

    /// Selects `key` the way a programmatic single pick does.
    ///
    /// Single mode drops every other selection. Multi mode only does so when
    /// the target is not collectable. Unknown and disabled keys are rejected
    /// without touching the selection.
    pub fn select_one(
        &mut self,
        registry: &ItemRegistry,
        key: &ItemKey,
    ) -> Result<(), SelectWarning> {
        let item = match resolve_enabled(registry, key) {
            Ok(item) => item,
            Err(warning) => {
                tracing::warn!(target: targets::SELECTION, "select_one: {warning}");
                return Err(warning);
            }
        };

        if self.mode == SelectionMode::Single || !item.collectable {
            self.entries.clear();
        } else {
            self.retain_collectable(registry);
        }
        self.insert(item.key.clone(), item.value.clone());
        Ok(())
    }

    /// Checks whether `key` may be removed from the selection.
    ///
    /// The selection never becomes empty once initialized, so the sole
    /// remaining item can't be deselected.
    pub fn can_deselect(&self, key: &ItemKey) -> Result<(), SelectWarning> {
        if self.is_sole(key) {
            Err(SelectWarning::LastSelection(key.clone()))
        } else {
            Ok(())
        }
    }

    /// Keeps only `key`, with the value the registry holds for it.
    pub fn collapse_to(&mut self, registry: &ItemRegistry, key: &ItemKey) -> bool {
        match resolve_enabled(registry, key) {
            Ok(item) => {
                self.entries.clear();
                self.entries.push((item.key.clone(), item.value.clone()));
                true
            }
            Err(warning) => {
                tracing::warn!(target: targets::SELECTION, "collapse: {warning}");
                false
            }
        }
    }

    /// Re-sorts the entries into catalog order.
    ///
    /// The sort key is the value's first position in the registry's order
    /// index; equal values fall back to the key's registry position.
    pub fn align(&mut self, registry: &ItemRegistry) {
        self.entries.sort_by_key(|(key, value)| {
            (
                registry.order_index_of(value).unwrap_or(usize::MAX),
                registry.position_of(key).unwrap_or(usize::MAX),
            )
        });
    }
}
