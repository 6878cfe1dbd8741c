//! The favorite marker.
//!
//! At most one item carries the favorite star. The marker is independent of
//! the selection: setting it never selects anything.

use super::item::{Item, ItemKey};
use super::registry::ItemRegistry;
use crate::error::SelectWarning;

/// Tracks the favorite item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorite {
    key: Option<ItemKey>,
}

impl Favorite {
    /// Creates an unset marker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current favorite key.
    pub fn get(&self) -> Option<&ItemKey> {
        self.key.as_ref()
    }

    /// Returns true if `key` is the favorite.
    pub fn is(&self, key: &ItemKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Marks `key` as favorite, replacing any previous one.
    ///
    /// Returns whether the marker moved. Unknown keys are rejected.
    pub fn set(&mut self, registry: &ItemRegistry, key: &ItemKey) -> Result<bool, SelectWarning> {
        if !registry.contains(key) {
            return Err(SelectWarning::KeyNotFound(key.clone()));
        }
        if self.is(key) {
            return Ok(false);
        }
        self.key = Some(key.clone());
        Ok(true)
    }

    /// Removes the marker; returns whether one was set.
    pub fn clear(&mut self) -> bool {
        self.key.take().is_some()
    }

    /// The favorite, if it can currently be selected.
    pub fn selectable_in<'a>(&'a self, registry: &ItemRegistry) -> Option<&'a ItemKey> {
        self.key
            .as_ref()
            .filter(|key| registry.get(key).is_some_and(Item::can_select))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::GroupMap;

    fn registry() -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        registry
            .load(
                [("a", "A"), ("b", "B")],
                &GroupMap::new(),
                &BTreeSet::from([ItemKey::from("b")]),
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_set_and_replace() {
        let registry = registry();
        let mut favorite = Favorite::new();
        assert_eq!(favorite.get(), None);

        assert_eq!(favorite.set(&registry, &"a".into()), Ok(true));
        assert_eq!(favorite.set(&registry, &"a".into()), Ok(false));
        assert_eq!(favorite.set(&registry, &"b".into()), Ok(true));
        assert!(favorite.is(&"b".into()));
        assert!(!favorite.is(&"a".into()));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let registry = registry();
        let mut favorite = Favorite::new();
        favorite.set(&registry, &"a".into()).unwrap();

        assert_eq!(
            favorite.set(&registry, &"zz".into()),
            Err(SelectWarning::KeyNotFound("zz".into()))
        );
        assert!(favorite.is(&"a".into()));
    }

    #[test]
    fn test_selectable_in_ignores_disabled() {
        let registry = registry();
        let mut favorite = Favorite::new();
        favorite.set(&registry, &"b".into()).unwrap();
        assert_eq!(favorite.selectable_in(&registry), None);

        favorite.set(&registry, &"a".into()).unwrap();
        assert_eq!(favorite.selectable_in(&registry), Some(&ItemKey::from("a")));

        assert!(favorite.clear());
        assert!(!favorite.clear());
    }
}
