//! Default selection and the "is at default" check.

use std::collections::BTreeSet;

use horizon_select_core::logging::targets;

use super::item::{Item, ItemKey};
use super::registry::ItemRegistry;
use super::selection::{SelectionMode, SelectionState};

/// The keys selected on load and on reset.
///
/// An empty list means "the first item".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultSelection {
    keys: Vec<ItemKey>,
}

impl DefaultSelection {
    /// Creates a default selection from keys.
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if no defaults are declared.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The declared keys, in declaration order.
    pub fn keys(&self) -> &[ItemKey] {
        &self.keys
    }

    /// Declared items that can be selected, in registry order.
    ///
    /// Declared keys that are unknown, disabled or not selectable are
    /// skipped. With no declared keys, the first enabled item is the only
    /// target.
    pub fn targets<'a>(&self, registry: &'a ItemRegistry) -> Vec<&'a Item> {
        if self.keys.is_empty() {
            return registry.first_enabled().into_iter().collect();
        }
        registry
            .iter()
            .filter(|item| item.can_select() && self.keys.contains(&item.key))
            .collect()
    }

    /// Items a reset ends up selecting under `mode` and `max`.
    ///
    /// Single mode keeps the first target; multi mode keeps as many as the
    /// cap allows.
    pub fn expected<'a>(
        &self,
        registry: &'a ItemRegistry,
        mode: SelectionMode,
        max: Option<usize>,
    ) -> Vec<&'a Item> {
        let mut items = self.targets(registry);
        let limit = match mode {
            SelectionMode::Single => 1,
            SelectionMode::Multi => max.unwrap_or(usize::MAX),
        };
        items.truncate(limit);
        items
    }

    /// Replaces the selection with the expected default items.
    ///
    /// Returns true if anything ended up selected.
    pub fn apply(
        &self,
        selection: &mut SelectionState,
        registry: &ItemRegistry,
        max: Option<usize>,
    ) -> bool {
        selection.clear();
        let expected = self.expected(registry, selection.mode(), max);
        if selection.mode().is_multi() && expected.len() < self.targets(registry).len() {
            tracing::warn!(
                target: targets::SELECTION,
                ?max,
                "more defaults than the selection cap; extra defaults dropped"
            );
        }
        for item in expected {
            selection.insert(item.key.clone(), item.value.clone());
        }
        selection.align(registry);
        !selection.is_empty()
    }

    /// Checks whether `selection` holds exactly what [`apply`](Self::apply)
    /// would select.
    pub fn is_satisfied_by(
        &self,
        selection: &SelectionState,
        registry: &ItemRegistry,
        max: Option<usize>,
    ) -> bool {
        let expected: BTreeSet<&ItemKey> = self
            .expected(registry, selection.mode(), max)
            .into_iter()
            .map(|item| &item.key)
            .collect();
        let selected: BTreeSet<&ItemKey> = selection.keys().collect();
        expected == selected
    }
}
