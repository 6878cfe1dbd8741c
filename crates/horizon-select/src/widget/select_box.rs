//! SelectBox: a single- or multi-select dropdown.
//!
//! The SelectBox owns the whole selection state machine:
//! - An item registry with optional groups and disabled keys
//! - Single or multi selection, kept in catalog order
//! - Group-select propagation in multi mode
//! - Default selections and a reset affordance
//! - A favorite marker independent of the selection
//! - A veto hook before, and a signal after, every interactive change
//!
//! Drawing is left to a [`SelectRenderer`].
//!
//! # Example
//!
//! ```
//! use horizon_select::prelude::*;
//!
//! let mut select = SelectBox::new().with_multiselect(true);
//! select
//!     .set_data([("at", "Austria"), ("be", "Belgium"), ("de", "Germany")], GroupMap::new())
//!     .unwrap();
//!
//! select.on_selected.connect(|event| {
//!     if let SelectedEvent::Selected { key, value } = event {
//!         println!("{key} -> {value}");
//!     }
//! });
//!
//! select.toggle("de");
//! assert_eq!(select.head_text(), "2 selected");
//! ```

use std::collections::BTreeSet;

use horizon_select_core::logging::{span_names, targets};
use horizon_select_core::{PerfSpan, Property, ReadOnlyProperty, Signal};

use super::callbacks::{CallbackGate, SelectRequest, SelectedEvent, Verdict};
use super::config::{SelectConfig, validate_max_selections, DEFAULT_MULTISELECT_TEXT};
use super::render::{
    GroupHeaderView, HandlerBindings, HeadView, RenderDiff, RenderedSelect, RowView,
    SelectRenderer, row_id,
};
use crate::error::{Result, SelectWarning};
use crate::model::{
    DefaultSelection, Favorite, GroupMap, ItemEntry, ItemKey, ItemRegistry, SelectionMode,
    SelectionState, expand_group, resolve_enabled,
};

/// Head text shown when nothing is selected.
pub const EMPTY_HEAD_TEXT: &str = "∅";

/// Keys the control reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKey {
    Enter,
    Space,
    Escape,
    /// Any other key; ignored.
    Other,
}

/// What an interactive toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The control is locked; nothing happened.
    Locked,
    /// The request was invalid; nothing happened.
    Rejected(SelectWarning),
    /// The `on_select` hook vetoed; nothing happened.
    Vetoed,
    /// The item already was the single selection.
    Unchanged,
    /// The item was added to (or became) the selection.
    Selected,
    /// The item was removed from the selection.
    Deselected,
    /// A group start was clicked and its members selected.
    GroupSelected,
}

impl ToggleOutcome {
    /// Returns true if the selection changed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Selected | Self::Deselected | Self::GroupSelected)
    }
}

// ============================================================================
// SelectBox
// ============================================================================

/// A dropdown selection list.
///
/// # Signals
///
/// - `on_selected(SelectedEvent)`: after every committed interactive change
///   and once after each load
/// - `render_diff(RenderDiff)`: after every committed state change
/// - `favorite_changed(Option<ItemKey>)`: when the favorite marker moves
/// - `mode_changed(SelectionMode)`: when switching between single and multi
/// - `popup_visibility_changed(bool)`: when the list opens or closes
/// - `locked_changed(bool)`: when the lock is toggled
pub struct SelectBox {
    registry: ItemRegistry,
    selection: SelectionState,
    defaults: DefaultSelection,
    disabled: BTreeSet<ItemKey>,
    favorite: Favorite,
    gate: CallbackGate,
    bindings: HandlerBindings,

    max_selections: Option<usize>,
    favorite_star: bool,
    display_keys: bool,
    has_reset_button: bool,
    text_for_multiselect: Option<String>,

    locked: Property<bool>,
    popup_visible: Property<bool>,

    /// Signal emitted after a committed change.
    pub on_selected: Signal<SelectedEvent>,
    /// Signal emitted with the rows and head text to update.
    pub render_diff: Signal<RenderDiff>,
    /// Signal emitted when the favorite marker moves.
    pub favorite_changed: Signal<Option<ItemKey>>,
    /// Signal emitted when the selection mode changes.
    pub mode_changed: Signal<SelectionMode>,
    /// Signal emitted when the popup list opens or closes.
    pub popup_visibility_changed: Signal<bool>,
    /// Signal emitted when the lock changes.
    pub locked_changed: Signal<bool>,
}

impl Default for SelectBox {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectBox")
            .field("items", &self.registry.len())
            .field("mode", &self.selection.mode())
            .field("selected", &self.selection.entries())
            .field("favorite", &self.favorite.get())
            .field("locked", &self.locked.get())
            .finish_non_exhaustive()
    }
}

impl SelectBox {
    /// Create an empty single-select box with default options.
    pub fn new() -> Self {
        let config = SelectConfig::default();
        Self {
            registry: ItemRegistry::new(),
            selection: SelectionState::new(SelectionMode::Single),
            defaults: DefaultSelection::default(),
            disabled: BTreeSet::new(),
            favorite: Favorite::new(),
            gate: CallbackGate::new(),
            bindings: HandlerBindings::new(),
            max_selections: config.max_selections,
            favorite_star: config.favorite_star,
            display_keys: config.display_keys,
            has_reset_button: config.has_reset_button,
            text_for_multiselect: config.text_for_multiselect,
            locked: Property::new(config.locked),
            popup_visible: Property::new(false),
            on_selected: Signal::new(),
            render_diff: Signal::new(),
            favorite_changed: Signal::new(),
            mode_changed: Signal::new(),
            popup_visibility_changed: Signal::new(),
            locked_changed: Signal::new(),
        }
    }

    /// Create a select box from a validated configuration.
    pub fn from_config(config: SelectConfig) -> Result<Self> {
        config.validate()?;
        let mut select = Self::new();
        select.selection.set_mode(SelectionMode::from_multiselect(config.multiselect));
        select.max_selections = config.max_selections;
        select.favorite_star = config.favorite_star;
        select.display_keys = config.display_keys;
        select.defaults = DefaultSelection::new(config.default_selections);
        select.disabled = config.disabled_selections;
        select.locked.set_silent(config.locked);
        select.text_for_multiselect = config.text_for_multiselect;
        select.has_reset_button = config.has_reset_button;
        Ok(select)
    }

    /// Snapshot of the current options.
    pub fn config(&self) -> SelectConfig {
        SelectConfig {
            multiselect: self.is_multiselect(),
            max_selections: self.max_selections,
            favorite_star: self.favorite_star,
            display_keys: self.display_keys,
            default_selections: self.defaults.keys().to_vec(),
            disabled_selections: self.disabled.clone(),
            locked: self.is_locked(),
            text_for_multiselect: self.text_for_multiselect.clone(),
            has_reset_button: self.has_reset_button,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set multi-select mode using builder pattern.
    pub fn with_multiselect(mut self, multiselect: bool) -> Self {
        self.selection
            .set_mode(SelectionMode::from_multiselect(multiselect));
        self
    }

    /// Set the default keys using builder pattern.
    pub fn with_default_selections<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.defaults = DefaultSelection::new(keys);
        self
    }

    /// Set the disabled keys using builder pattern.
    pub fn with_disabled_selections<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.disabled = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Show the favorite star using builder pattern.
    pub fn with_favorite_star(mut self, favorite_star: bool) -> Self {
        self.favorite_star = favorite_star;
        self
    }

    /// Display keys next to values using builder pattern.
    pub fn with_display_keys(mut self, display_keys: bool) -> Self {
        self.display_keys = display_keys;
        self
    }

    /// Offer a reset affordance using builder pattern.
    pub fn with_reset_button(mut self, has_reset_button: bool) -> Self {
        self.has_reset_button = has_reset_button;
        self
    }

    /// Set the head text suffix using builder pattern.
    pub fn with_text_for_multiselect(mut self, text: impl Into<String>) -> Self {
        self.text_for_multiselect = Some(text.into());
        self
    }

    /// Install the veto hook using builder pattern.
    pub fn with_on_select<F, V>(mut self, hook: F) -> Self
    where
        F: Fn(&SelectRequest) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.gate.set_on_select(hook);
        self
    }

    // =========================================================================
    // Callbacks
    // =========================================================================

    /// Install the veto hook consulted before every interactive change.
    pub fn set_on_select<F, V>(&mut self, hook: F)
    where
        F: Fn(&SelectRequest) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.gate.set_on_select(hook);
    }

    /// Install a two-argument `(key, value)` veto hook.
    #[deprecated(note = "use `set_on_select`, whose request also says whether it is a deselect")]
    pub fn set_on_select_key_value<F, V>(&mut self, hook: F)
    where
        F: Fn(&ItemKey, &str) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        #[allow(deprecated)]
        self.gate.set_on_select_key_value(hook);
    }

    /// Remove the veto hook.
    pub fn clear_on_select(&mut self) {
        self.gate.clear_on_select();
    }

    // =========================================================================
    // Data
    // =========================================================================

    /// Load the items, replacing everything.
    ///
    /// Selects the defaults (or the first enabled item), clears the favorite
    /// and emits [`SelectedEvent::Loaded`]. Fails with
    /// [`SelectError::EmptyInput`](crate::SelectError::EmptyInput) if `items`
    /// is empty, leaving the previous state untouched.
    pub fn set_data<I, E>(&mut self, items: I, groups: GroupMap) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<ItemEntry>,
    {
        let _perf = PerfSpan::new(span_names::LOAD);
        self.registry.load(items, &groups, &self.disabled)?;

        let before = self.selection.key_set();
        self.bindings.clear();
        if self.favorite.clear() {
            self.favorite_changed.emit(None);
        }
        self.apply_defaults();

        horizon_select_core::select_debug!(
            items = self.registry.len(),
            selected = self.selection.len(),
            "data loaded"
        );
        self.gate.notify(&self.on_selected, SelectedEvent::Loaded);
        self.emit_diff(&before);
        Ok(())
    }

    /// Remove all items and the selection.
    pub fn clear(&mut self) {
        let before = self.selection.key_set();
        self.registry.clear();
        self.selection.clear();
        self.bindings.clear();
        if self.favorite.clear() {
            self.favorite_changed.emit(None);
        }
        self.emit_diff(&before);
    }

    /// The item registry.
    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.registry.len()
    }

    /// Look up the value shown for a key.
    pub fn lookup_value_by_key(&self, key: &ItemKey) -> Option<&str> {
        self.registry.lookup_value_by_key(key)
    }

    // =========================================================================
    // Selection Queries
    // =========================================================================

    /// The selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Selected `(key, value)` pairs in iteration order.
    pub fn selected(&self) -> &[(ItemKey, String)] {
        self.selection.entries()
    }

    /// Selected keys in iteration order.
    pub fn selected_keys(&self) -> Vec<ItemKey> {
        self.selection.keys().cloned().collect()
    }

    /// Number of selected items.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Check if a key is selected.
    pub fn is_selected(&self, key: &ItemKey) -> bool {
        self.selection.contains(key)
    }

    /// The first selected key.
    pub fn current_key(&self) -> Option<&ItemKey> {
        self.selection.first().map(|(key, _)| key)
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Returns true in multi mode.
    pub fn is_multiselect(&self) -> bool {
        self.selection.mode().is_multi()
    }

    /// The multi-selection cap.
    pub fn max_selections(&self) -> Option<usize> {
        self.max_selections
    }

    // =========================================================================
    // Interactive Selection
    // =========================================================================

    /// Toggle an item the way a click does.
    ///
    /// Goes through the veto hook. A committed change emits `on_selected`
    /// and `render_diff` once each; anything else leaves the state and the
    /// signals alone.
    pub fn toggle(&mut self, key: impl Into<ItemKey>) -> ToggleOutcome {
        let key = key.into();
        let _perf = PerfSpan::new(span_names::TOGGLE);

        if self.is_locked() {
            tracing::debug!(target: targets::SELECTION, key = %key, "toggle ignored: locked");
            return ToggleOutcome::Locked;
        }

        let item = match self.registry.get(&key) {
            None => return reject(SelectWarning::KeyNotFound(key)),
            Some(item) if !item.enabled => return reject(SelectWarning::ItemDisabled(key)),
            Some(item) if !item.selectable => return reject(SelectWarning::NotSelectable(key)),
            Some(item) => item.clone(),
        };

        let before = self.selection.key_set();
        let outcome = match self.selection.mode() {
            SelectionMode::Multi if item.is_group_start => {
                if self.vetoed(&item.key, &item.value, false) {
                    return ToggleOutcome::Vetoed;
                }
                expand_group(
                    &mut self.selection,
                    &self.registry,
                    &item.key,
                    self.max_selections,
                );
                ToggleOutcome::GroupSelected
            }
            SelectionMode::Multi if self.selection.contains(&item.key) => {
                if let Err(warning) = self.selection.can_deselect(&item.key) {
                    return reject(warning);
                }
                if self.vetoed(&item.key, &item.value, true) {
                    return ToggleOutcome::Vetoed;
                }
                self.selection.remove(&item.key);
                ToggleOutcome::Deselected
            }
            SelectionMode::Multi => {
                if self.vetoed(&item.key, &item.value, false) {
                    return ToggleOutcome::Vetoed;
                }
                if !item.collectable {
                    self.selection.clear();
                } else {
                    let mut kept = self.selection.clone();
                    kept.retain_collectable(&self.registry);
                    if !kept.has_capacity(self.max_selections) {
                        return reject(SelectWarning::MaxSelections {
                            max: self.max_selections.unwrap_or_default(),
                        });
                    }
                    self.selection = kept;
                }
                self.selection.insert(item.key.clone(), item.value.clone());
                self.selection.align(&self.registry);
                ToggleOutcome::Selected
            }
            SelectionMode::Single => {
                if self.selection.is_sole(&item.key) {
                    return ToggleOutcome::Unchanged;
                }
                if self.vetoed(&item.key, &item.value, false) {
                    return ToggleOutcome::Vetoed;
                }
                self.selection.clear();
                self.selection.insert(item.key.clone(), item.value.clone());
                ToggleOutcome::Selected
            }
        };

        tracing::debug!(target: targets::SELECTION, key = %item.key, ?outcome, "toggle committed");
        self.gate
            .notify(&self.on_selected, SelectedEvent::selected(item.key, item.value));
        self.emit_diff(&before);
        outcome
    }

    /// Toggle an item from a pointer click on its row.
    ///
    /// Single mode closes the popup afterwards; multi mode keeps it open so
    /// more items can be picked.
    pub fn click_item(&mut self, key: impl Into<ItemKey>) -> ToggleOutcome {
        let outcome = self.toggle(key);
        if outcome != ToggleOutcome::Locked && !self.is_multiselect() {
            self.hide_popup();
        }
        outcome
    }

    /// Handle a key press on an item row. Enter toggles the item.
    pub fn activate_item_key(
        &mut self,
        key: impl Into<ItemKey>,
        pressed: SelectKey,
    ) -> Option<ToggleOutcome> {
        (pressed == SelectKey::Enter).then(|| self.toggle(key))
    }

    // =========================================================================
    // Programmatic Selection
    // =========================================================================

    /// Clear the selection without callbacks.
    pub fn deselect_all(&mut self) {
        let before = self.selection.key_set();
        self.selection.clear();
        self.emit_diff(&before);
    }

    /// Replace the selection without consulting the veto hook.
    ///
    /// Keys that are unknown or can't be selected are skipped with a warning,
    /// as are keys past the multi-selection cap. In multi mode a
    /// non-collectable key replaces what came before it. Single mode keeps the last usable key. An
    /// empty list deselects everything. Returns the skipped keys.
    pub fn set_selected_externally<I, K>(&mut self, keys: I) -> Vec<ItemKey>
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        let before = self.selection.key_set();
        let multi = self.is_multiselect();
        let mut skipped = Vec::new();

        self.selection.clear();
        for key in keys.into_iter().map(Into::into) {
            let item = match resolve_enabled(&self.registry, &key) {
                Ok(item) => item,
                Err(warning) => {
                    tracing::warn!(target: targets::SELECTION, "external selection: {warning}");
                    skipped.push(key);
                    continue;
                }
            };
            if multi && !item.collectable {
                self.selection.clear();
            } else if multi {
                self.selection.retain_collectable(&self.registry);
            }
            if multi && !self.selection.contains(&key) && !self.selection.has_capacity(self.max_selections) {
                let warning = SelectWarning::MaxSelections {
                    max: self.max_selections.unwrap_or_default(),
                };
                tracing::warn!(target: targets::SELECTION, key = %key, "external selection: {warning}");
                skipped.push(key);
                continue;
            }
            if !multi {
                self.selection.clear();
            }
            self.selection.insert(item.key.clone(), item.value.clone());
        }
        if multi {
            self.selection.align(&self.registry);
        }

        self.emit_diff(&before);
        skipped
    }

    /// Make `key` the only selection, without callbacks.
    ///
    /// Returns false, leaving the selection alone, if the key doesn't exist
    /// or can't be selected.
    pub fn set_selected_by_key(&mut self, key: impl Into<ItemKey>) -> bool {
        let key = key.into();
        if let Err(warning) = resolve_enabled(&self.registry, &key) {
            tracing::warn!(target: targets::SELECTION, "set_selected_by_key: {warning}");
            return false;
        }
        let before = self.selection.key_set();
        self.selection.clear();
        let selected = self.selection.select_one(&self.registry, &key).is_ok();
        self.emit_diff(&before);
        selected
    }

    // =========================================================================
    // Defaults and Reset
    // =========================================================================

    /// The default keys.
    pub fn default_selections(&self) -> &[ItemKey] {
        self.defaults.keys()
    }

    /// Set the default keys. Takes effect on the next load or reset.
    pub fn set_default_selections<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.defaults = DefaultSelection::new(keys);
    }

    /// Select the defaults, without callbacks.
    pub fn select_defaults(&mut self) {
        let before = self.selection.key_set();
        self.apply_defaults();
        self.emit_diff(&before);
    }

    /// Reset to the defaults as the reset affordance does.
    ///
    /// Ignored when locked. The veto hook is asked about the first target;
    /// `on_selected` reports that same key afterwards.
    pub fn reset(&mut self) -> ToggleOutcome {
        if self.is_locked() {
            tracing::debug!(target: targets::SELECTION, "reset ignored: locked");
            return ToggleOutcome::Locked;
        }
        let Some(first) = self
            .defaults
            .expected(&self.registry, self.selection.mode(), self.max_selections)
            .first()
            .map(|item| (item.key.clone(), item.value.clone()))
        else {
            return ToggleOutcome::Unchanged;
        };
        if self.vetoed(&first.0, &first.1, false) {
            return ToggleOutcome::Vetoed;
        }

        let before = self.selection.key_set();
        self.apply_defaults();
        self.gate
            .notify(&self.on_selected, SelectedEvent::selected(first.0, first.1));
        self.emit_diff(&before);
        ToggleOutcome::Selected
    }

    /// Returns true if the selection matches the defaults.
    pub fn is_at_default(&self) -> bool {
        self.defaults
            .is_satisfied_by(&self.selection, &self.registry, self.max_selections)
    }

    /// Returns true if the reset affordance should be shown.
    pub fn reset_visible(&self) -> bool {
        self.has_reset_button && !self.is_at_default()
    }

    /// Set whether a reset affordance is offered.
    pub fn set_has_reset_button(&mut self, has_reset_button: bool) {
        self.has_reset_button = has_reset_button;
    }

    // =========================================================================
    // Favorite
    // =========================================================================

    /// The favorite key.
    pub fn favorite(&self) -> Option<&ItemKey> {
        self.favorite.get()
    }

    /// Mark `key` as favorite. Returns false for unknown keys.
    ///
    /// Never touches the selection or its callbacks.
    pub fn set_favorite(&mut self, key: impl Into<ItemKey>) -> bool {
        let key = key.into();
        match self.favorite.set(&self.registry, &key) {
            Ok(true) => {
                self.favorite_changed.emit(Some(key));
                true
            }
            Ok(false) => true,
            Err(warning) => {
                tracing::warn!(target: targets::SELECTION, "set_favorite: {warning}");
                false
            }
        }
    }

    /// Remove the favorite marker.
    pub fn clear_favorite(&mut self) {
        if self.favorite.clear() {
            self.favorite_changed.emit(None);
        }
    }

    /// Returns true if the favorite star is shown.
    pub fn has_favorite_star(&self) -> bool {
        self.favorite_star
    }

    /// Set whether the favorite star is shown.
    pub fn set_favorite_star(&mut self, favorite_star: bool) {
        self.favorite_star = favorite_star;
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Switch between single and multi mode.
    ///
    /// Going to single mode with several items selected keeps only the
    /// favorite, if it is selectable, or else the first selected key. No
    /// callbacks are invoked.
    pub fn set_multiselect(&mut self, multiselect: bool) {
        let mode = SelectionMode::from_multiselect(multiselect);
        if mode == self.selection.mode() {
            return;
        }

        let before = self.selection.key_set();
        if mode == SelectionMode::Single && self.selection.len() > 1 {
            let target = self
                .favorite
                .selectable_in(&self.registry)
                .cloned()
                .or_else(|| self.current_key().cloned());
            if let Some(target) = target {
                self.selection.collapse_to(&self.registry, &target);
            }
        }
        self.selection.set_mode(mode);

        tracing::debug!(target: targets::SELECTION, ?mode, "selection mode changed");
        self.mode_changed.emit(mode);
        self.emit_diff(&before);
    }

    /// Set the multi-selection cap.
    ///
    /// If the selection is already larger than the new cap it is reset to
    /// the defaults, without callbacks.
    pub fn set_max_selections(&mut self, max: Option<usize>) -> Result<()> {
        validate_max_selections(max)?;
        self.max_selections = max;

        if max.is_some_and(|max| self.selection.len() > max) {
            tracing::debug!(
                target: targets::SELECTION,
                selected = self.selection.len(),
                ?max,
                "selection exceeds new cap; resetting to defaults"
            );
            self.select_defaults();
        }
        Ok(())
    }

    /// Returns true if interaction is ignored.
    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// Read-only view of the lock.
    pub fn locked_property(&self) -> ReadOnlyProperty<'_, bool> {
        ReadOnlyProperty::new(&self.locked)
    }

    /// Lock or unlock the control.
    ///
    /// A locked control ignores toggles and resets. Programmatic setters keep
    /// working.
    pub fn set_locked(&mut self, locked: bool) {
        if self.locked.set(locked) {
            self.locked_changed.emit(locked);
        }
    }

    /// Returns true if keys are displayed next to values.
    pub fn displays_keys(&self) -> bool {
        self.display_keys
    }

    /// Set whether keys are displayed next to values.
    pub fn set_display_keys(&mut self, display_keys: bool) {
        self.display_keys = display_keys;
    }

    /// Set the disabled keys. Takes effect on the next load.
    pub fn set_disabled_selections<I, K>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.disabled = keys.into_iter().map(Into::into).collect();
    }

    /// Set the head text suffix for multi-selections.
    pub fn set_text_for_multiselect(&mut self, text: Option<String>) {
        self.text_for_multiselect = text;
    }

    // =========================================================================
    // Popup
    // =========================================================================

    /// Returns true if the popup list is open.
    pub fn is_popup_visible(&self) -> bool {
        self.popup_visible.get()
    }

    /// Read-only view of the popup visibility.
    pub fn popup_visible_property(&self) -> ReadOnlyProperty<'_, bool> {
        ReadOnlyProperty::new(&self.popup_visible)
    }

    /// Open the popup list.
    pub fn show_popup(&mut self) {
        if self.popup_visible.set(true) {
            self.popup_visibility_changed.emit(true);
        }
    }

    /// Close the popup list.
    pub fn hide_popup(&mut self) {
        if self.popup_visible.set(false) {
            self.popup_visibility_changed.emit(false);
        }
    }

    /// Open or close the popup list.
    pub fn toggle_popup(&mut self) {
        if self.is_popup_visible() {
            self.hide_popup();
        } else {
            self.show_popup();
        }
    }

    /// Handle a key press on the head. Returns true if it was consumed.
    pub fn handle_key(&mut self, key: SelectKey) -> bool {
        match key {
            SelectKey::Enter | SelectKey::Space => {
                self.toggle_popup();
                true
            }
            SelectKey::Escape => {
                self.hide_popup();
                true
            }
            SelectKey::Other => false,
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The collapsed summary of the selection.
    ///
    /// `∅` when nothing is selected, the value (and key, with
    /// `display_keys`) of a single selection, else the count followed by the
    /// multi-select text.
    pub fn head_text(&self) -> String {
        match self.selection.entries() {
            [] => EMPTY_HEAD_TEXT.to_string(),
            [(key, value)] if self.display_keys => format!("{key}: {value}"),
            [(_, value)] => value.clone(),
            entries => format!(
                "{} {}",
                entries.len(),
                self.text_for_multiselect
                    .as_deref()
                    .unwrap_or(DEFAULT_MULTISELECT_TEXT)
            ),
        }
    }

    /// The head as a view.
    pub fn head_view(&self) -> HeadView {
        HeadView {
            text: self.head_text(),
            selected: self.selection.entries().to_vec(),
            reset_visible: self.reset_visible(),
            locked: self.is_locked(),
            popup_visible: self.is_popup_visible(),
        }
    }

    /// Views of all item rows, in registry order.
    pub fn row_views(&self) -> Vec<RowView> {
        let mut in_group = false;
        self.registry
            .iter()
            .map(|item| {
                let row = RowView {
                    key: item.key.clone(),
                    value: item.value.clone(),
                    row_id: row_id(&item.key),
                    checkable: item.checkable,
                    collectable: item.collectable,
                    selectable: item.selectable,
                    enabled: item.enabled,
                    checked: self.selection.contains(&item.key),
                    favorite: self.favorite.is(&item.key),
                    show_favorite_star: self.favorite_star,
                    display_key: self.display_keys,
                    in_group,
                };
                in_group |= item.is_group_start;
                row
            })
            .collect()
    }

    /// Render the whole control and attach row handlers.
    ///
    /// Group headers are emitted before the item starting their group.
    /// Handlers are attached to every row once the rows exist; rows that
    /// already have them are left alone.
    pub fn render<R: SelectRenderer>(&mut self, renderer: &mut R) -> RenderedSelect<R::Head, R::Row> {
        let views = self.row_views();
        let mut rows = Vec::with_capacity(views.len());
        for view in &views {
            if let Some(header) = self.registry.group_header(&view.key) {
                rows.push(renderer.render_group_header(&GroupHeaderView {
                    key: view.key.clone(),
                    text: header.text.clone(),
                    selectable: header.selectable && self.is_multiselect(),
                    checked: view.checked,
                }));
            }
            rows.push(renderer.render_row(view));
        }
        let head = renderer.render_head(&self.head_view());

        let attached = self
            .bindings
            .attach_all(views.iter().map(|view| view.row_id.as_str()));
        horizon_select_core::select_trace!(rows = rows.len(), attached, "rendered");
        RenderedSelect { head, rows }
    }

    /// Row handler bookkeeping.
    pub fn handler_bindings(&self) -> &HandlerBindings {
        &self.bindings
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn vetoed(&self, key: &ItemKey, value: &str, is_deselect: bool) -> bool {
        self.gate
            .check(&SelectRequest::new(key.clone(), value, is_deselect))
            .is_veto()
    }

    fn apply_defaults(&mut self) {
        self.defaults
            .apply(&mut self.selection, &self.registry, self.max_selections);
        if self.selection.is_empty() && !self.registry.is_empty() {
            tracing::warn!(
                target: targets::SELECTION,
                items = self.registry.len(),
                "no enabled, selectable item to select; selection is empty"
            );
        }
    }

    fn emit_diff(&self, before: &BTreeSet<ItemKey>) {
        let diff = RenderDiff::between(before, &self.selection, self.head_text(), self.reset_visible());
        self.render_diff.emit(diff);
    }
}

fn reject(warning: SelectWarning) -> ToggleOutcome {
    tracing::warn!(target: targets::SELECTION, "{warning}");
    ToggleOutcome::Rejected(warning)
}
