//! Item types for the select box.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies an item in the registry.
///
/// Keys are plain strings so that a stable row identity can be derived from
/// them directly, without hashing structured values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Create a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&ItemKey> for ItemKey {
    fn from(key: &ItemKey) -> Self {
        key.clone()
    }
}

impl AsRef<str> for ItemKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A registered entry of the dropdown list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique key.
    pub key: ItemKey,
    /// Text shown for the item.
    pub value: String,
    /// Whether a click may select the item at all.
    pub selectable: bool,
    /// Whether the row shows a checked/unchecked indicator.
    pub checkable: bool,
    /// Whether the item may coexist with other selections.
    pub collectable: bool,
    /// False for keys in the disabled set.
    pub enabled: bool,
    /// True if a group header precedes this item.
    pub is_group_start: bool,
}

impl Item {
    /// Returns true if the item may end up in the selection.
    pub fn can_select(&self) -> bool {
        self.enabled && self.selectable
    }
}

/// Load-time description of an item.
///
/// Plain `(key, value)` pairs convert into an entry with all flags set; the
/// builder methods opt out of individual capabilities.
///
/// # Example
///
/// ```
/// use horizon_select::model::ItemEntry;
///
/// let entry = ItemEntry::new("eu", "European Union").with_collectable(false);
/// assert!(!entry.collectable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    /// Unique key.
    pub key: ItemKey,
    /// Text shown for the item.
    pub value: String,
    /// Whether a click may select the item.
    pub selectable: bool,
    /// Whether the row shows a check indicator.
    pub checkable: bool,
    /// Whether the item may coexist with other selections.
    pub collectable: bool,
}

impl ItemEntry {
    /// Create an entry with default flags.
    pub fn new(key: impl Into<ItemKey>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            selectable: true,
            checkable: true,
            collectable: true,
        }
    }

    /// Set whether the item is selectable.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set whether the item shows a check indicator.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Set whether the item may coexist with other selections.
    pub fn with_collectable(mut self, collectable: bool) -> Self {
        self.collectable = collectable;
        self
    }
}

impl<K: Into<ItemKey>, V: Into<String>> From<(K, V)> for ItemEntry {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

/// A group header row introducing a run of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupHeader {
    /// Header text.
    #[serde(default)]
    pub text: String,
    /// Whether the header offers a check-all box.
    #[serde(default)]
    pub selectable: bool,
}

impl GroupHeader {
    /// Create a header.
    pub fn new(text: impl Into<String>, selectable: bool) -> Self {
        Self {
            text: text.into(),
            selectable,
        }
    }
}

/// Group headers keyed by the item that starts each group.
pub type GroupMap = BTreeMap<ItemKey, GroupHeader>;
