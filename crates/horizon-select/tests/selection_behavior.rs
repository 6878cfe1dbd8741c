//! Integration tests for the select box state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_select::model::SelectionMode;
use horizon_select::prelude::*;
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn letters() -> Vec<(&'static str, &'static str)> {
    vec![("a", "A"), ("b", "B"), ("c", "C"), ("d", "D"), ("e", "E")]
}

fn keys(select: &SelectBox) -> Vec<String> {
    select
        .selected_keys()
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// Counts `Selected` events, ignoring the load sentinel.
fn selected_counter(select: &SelectBox) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let count_clone = count.clone();
    select.on_selected.connect(move |event| {
        if matches!(event, SelectedEvent::Selected { .. }) {
            count_clone.fetch_add(1, Ordering::SeqCst);
        }
    });
    count
}

#[test]
fn load_without_defaults_selects_first_item() {
    setup();
    for multiselect in [false, true] {
        let mut select = SelectBox::new().with_multiselect(multiselect);
        select.set_data(letters(), GroupMap::new()).unwrap();
        assert_eq!(keys(&select), vec!["a"]);
        assert_eq!(select.head_text(), "A");
    }
}

#[test]
fn multi_order_follows_registry_not_clicks() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), GroupMap::new()).unwrap();

    for key in ["e", "c", "b", "d"] {
        assert_eq!(select.toggle(key), ToggleOutcome::Selected);
    }
    assert_eq!(keys(&select), vec!["a", "b", "c", "d", "e"]);

    select.toggle("a");
    select.toggle("c");
    select.toggle("a");
    assert_eq!(keys(&select), vec!["a", "b", "d", "e"]);
}

#[test]
fn sole_selection_cannot_be_deselected() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), GroupMap::new()).unwrap();

    let hook_calls = Arc::new(AtomicUsize::new(0));
    let hook_calls_clone = hook_calls.clone();
    select.set_on_select(move |_: &SelectRequest| {
        hook_calls_clone.fetch_add(1, Ordering::SeqCst);
    });
    let notified = selected_counter(&select);

    assert_eq!(
        select.toggle("a"),
        ToggleOutcome::Rejected(SelectWarning::LastSelection("a".into()))
    );
    assert_eq!(keys(&select), vec!["a"]);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
    assert_eq!(hook_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn veto_leaves_selection_and_favorite_unchanged() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), GroupMap::new()).unwrap();
    select.toggle("c");
    select.set_favorite("c");
    select.set_on_select(|_: &SelectRequest| Verdict::Veto);
    let notified = selected_counter(&select);

    assert_eq!(select.toggle("b"), ToggleOutcome::Vetoed);
    assert_eq!(select.toggle("c"), ToggleOutcome::Vetoed);
    assert_eq!(keys(&select), vec!["a", "c"]);
    assert_eq!(select.favorite(), Some(&ItemKey::from("c")));
    assert_eq!(notified.load(Ordering::SeqCst), 0);

    let mut single = SelectBox::new();
    single.set_data(letters(), GroupMap::new()).unwrap();
    single.set_on_select(|request: &SelectRequest| request.key.as_str() != "d");
    assert_eq!(single.toggle("d"), ToggleOutcome::Vetoed);
    assert_eq!(keys(&single), vec!["a"]);
}

#[test]
fn group_click_selects_members_with_one_veto_call() {
    setup();
    let mut groups = GroupMap::new();
    groups.insert("b".into(), GroupHeader::new("Second half", true));
    groups.insert("e".into(), GroupHeader::new("Last", false));

    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), groups).unwrap();

    let asked = Arc::new(Mutex::new(Vec::new()));
    let asked_clone = asked.clone();
    select.set_on_select(move |request: &SelectRequest| {
        asked_clone.lock().push(request.key.to_string());
        true
    });
    let notified = selected_counter(&select);

    assert_eq!(select.toggle("b"), ToggleOutcome::GroupSelected);
    assert_eq!(keys(&select), vec!["b", "c", "d"]);
    assert_eq!(*asked.lock(), vec!["b"]);
    assert_eq!(notified.load(Ordering::SeqCst), 1);
}

#[test]
fn defaults_and_is_at_default() {
    setup();
    let mut select = SelectBox::new()
        .with_multiselect(true)
        .with_default_selections(["b", "d"]);
    select.set_data(letters(), GroupMap::new()).unwrap();
    assert_eq!(keys(&select), vec!["b", "d"]);

    select.set_selected_externally(["a"]);
    assert!(!select.is_at_default());

    select.select_defaults();
    assert_eq!(keys(&select), vec!["b", "d"]);
    assert!(select.is_at_default());

    select.toggle("e");
    assert!(!select.is_at_default());
}

#[test]
fn mode_switch_collapses_to_favorite_or_first() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), GroupMap::new()).unwrap();
    select.set_selected_externally(["a", "c"]);
    select.set_favorite("c");

    let modes = Arc::new(Mutex::new(Vec::new()));
    let modes_clone = modes.clone();
    select.mode_changed.connect(move |mode| modes_clone.lock().push(*mode));

    select.set_multiselect(false);
    assert_eq!(keys(&select), vec!["c"]);
    assert_eq!(*modes.lock(), vec![SelectionMode::Single]);

    let mut plain = SelectBox::new().with_multiselect(true);
    plain.set_data(letters(), GroupMap::new()).unwrap();
    plain.set_selected_externally(["a", "c"]);
    plain.set_multiselect(false);
    assert_eq!(keys(&plain), vec!["a"]);
}

#[test]
fn empty_load_fails_and_keeps_state() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select.set_data(letters(), GroupMap::new()).unwrap();
    select.toggle("c");
    select.set_favorite("b");

    let result = select.set_data(Vec::<(&str, &str)>::new(), GroupMap::new());
    assert!(matches!(result, Err(SelectError::EmptyInput)));
    assert_eq!(select.count(), 5);
    assert_eq!(keys(&select), vec!["a", "c"]);
    assert_eq!(select.favorite(), Some(&ItemKey::from("b")));
}

#[test]
fn render_diff_tracks_head_and_reset() {
    setup();
    let mut select = SelectBox::new()
        .with_multiselect(true)
        .with_reset_button(true)
        .with_text_for_multiselect("letters");
    select.set_data(letters(), GroupMap::new()).unwrap();

    let diffs = Arc::new(Mutex::new(Vec::new()));
    let diffs_clone = diffs.clone();
    select
        .render_diff
        .connect(move |diff: &RenderDiff| diffs_clone.lock().push(diff.clone()));

    select.toggle("b");
    select.reset();

    let diffs = diffs.lock();
    assert_eq!(diffs.len(), 2);
    assert_eq!(diffs[0].head_text, "2 letters");
    assert!(diffs[0].reset_visible);
    assert_eq!(diffs[1].unchecked, vec![ItemKey::from("b")]);
    assert_eq!(diffs[1].head_text, "A");
    assert!(!diffs[1].reset_visible);
}

#[test]
fn disabled_first_item_is_skipped_on_load() {
    setup();
    let mut select = SelectBox::new().with_disabled_selections(["a"]);
    select.set_data(letters(), GroupMap::new()).unwrap();
    assert_eq!(keys(&select), vec!["b"]);
}

#[test]
fn defaults_check_matches_what_loading_selected() {
    setup();

    // Disabled first item with no declared defaults.
    let mut select = SelectBox::new()
        .with_multiselect(true)
        .with_reset_button(true)
        .with_disabled_selections(["a"]);
    select.set_data(letters(), GroupMap::new()).unwrap();
    assert_eq!(keys(&select), vec!["b"]);
    assert!(select.is_at_default());
    assert!(!select.reset_visible());

    // Several defaults in single mode.
    let mut select = SelectBox::new()
        .with_reset_button(true)
        .with_default_selections(["d", "b"]);
    select.set_data(letters(), GroupMap::new()).unwrap();
    assert_eq!(keys(&select), vec!["b"]);
    assert!(select.is_at_default());
    assert!(!select.reset_visible());

    // A declared default that is disabled.
    let mut select = SelectBox::new()
        .with_multiselect(true)
        .with_reset_button(true)
        .with_default_selections(["b", "c"])
        .with_disabled_selections(["c"]);
    select.set_data(letters(), GroupMap::new()).unwrap();
    assert_eq!(keys(&select), vec!["b"]);
    assert!(select.is_at_default());
    assert!(!select.reset_visible());

    select.toggle("e");
    assert!(select.reset_visible());
    select.select_defaults();
    assert!(select.is_at_default());
}

#[test]
fn defaults_check_respects_selection_cap() {
    setup();
    let mut select = SelectBox::new()
        .with_multiselect(true)
        .with_reset_button(true)
        .with_default_selections(["a", "b", "c"]);
    select.set_max_selections(Some(2)).unwrap();
    select.set_data(letters(), GroupMap::new()).unwrap();

    assert_eq!(keys(&select), vec!["a", "b"]);
    assert!(select.is_at_default());
    assert!(!select.reset_visible());
}

#[test]
fn load_with_nothing_selectable_leaves_selection_empty() {
    setup();
    let mut select = SelectBox::new().with_disabled_selections(["a", "b"]);
    let loaded = Arc::new(AtomicUsize::new(0));
    let loaded_clone = loaded.clone();
    select.on_selected.connect(move |event| {
        if matches!(event, SelectedEvent::Loaded) {
            loaded_clone.fetch_add(1, Ordering::SeqCst);
        }
    });

    select
        .set_data([("a", "A"), ("b", "B")], GroupMap::new())
        .unwrap();
    assert_eq!(select.selected_count(), 0);
    assert_eq!(select.head_text(), "∅");
    assert_eq!(loaded.load(Ordering::SeqCst), 1);

    assert_eq!(
        select.toggle("a"),
        ToggleOutcome::Rejected(SelectWarning::ItemDisabled("a".into()))
    );
    assert_eq!(select.selected_count(), 0);
}

#[test]
fn collectable_click_drops_non_collectable_selection() {
    setup();
    let mut select = SelectBox::new().with_multiselect(true);
    select
        .set_data(
            [
                ItemEntry::new("any", "Any").with_collectable(false),
                ItemEntry::new("a", "A"),
                ItemEntry::new("b", "B"),
            ],
            GroupMap::new(),
        )
        .unwrap();
    assert_eq!(keys(&select), vec!["any"]);

    select.toggle("b");
    select.toggle("a");
    assert_eq!(keys(&select), vec!["a", "b"]);

    select.toggle("any");
    assert_eq!(keys(&select), vec!["any"]);
}
