//! Group-select propagation.
//!
//! A group runs from the item that starts it up to, but excluding, the next
//! item that starts a group. Clicking the start item in multi mode selects
//! the whole run.

use horizon_select_core::logging::targets;

use super::item::{Item, ItemKey};
use super::registry::ItemRegistry;
use super::selection::SelectionState;
use crate::error::SelectWarning;

/// Returns the selectable members of the group started by `group_key`.
///
/// The start item itself is not included. Returns an empty list if the key
/// does not start a group.
pub fn group_members<'a>(registry: &'a ItemRegistry, group_key: &ItemKey) -> Vec<&'a Item> {
    let Some(start) = registry.position_of(group_key) else {
        return Vec::new();
    };
    if registry.item_at(start).is_none_or(|item| !item.is_group_start) {
        return Vec::new();
    }

    registry
        .iter()
        .skip(start + 1)
        .take_while(|item| !item.is_group_start)
        .filter(|item| item.can_select())
        .collect()
}

/// Replaces the selection with a group start and its members.
///
/// Members past `max` are dropped; in that case the cap warning is returned.
pub fn expand_group(
    selection: &mut SelectionState,
    registry: &ItemRegistry,
    group_key: &ItemKey,
    max: Option<usize>,
) -> Option<SelectWarning> {
    let Some(start) = registry.get(group_key) else {
        return Some(SelectWarning::KeyNotFound(group_key.clone()));
    };

    selection.clear();
    selection.insert(start.key.clone(), start.value.clone());

    let mut truncated = None;
    for member in group_members(registry, group_key) {
        if !selection.has_capacity(max) {
            let max = max.unwrap_or_default();
            tracing::warn!(
                target: targets::SELECTION,
                group = %group_key,
                max,
                "group expansion stopped at the selection cap"
            );
            truncated = Some(SelectWarning::MaxSelections { max });
            break;
        }
        selection.insert(member.key.clone(), member.value.clone());
    }

    selection.align(registry);
    truncated
}
