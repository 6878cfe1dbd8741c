//! The render collaborator.
//!
//! The select box never produces markup itself. [`SelectBox::render`] turns
//! its state into [`RowView`]s, [`GroupHeaderView`]s and a [`HeadView`] and
//! hands them to a [`SelectRenderer`]. Incremental updates go out as a
//! [`RenderDiff`] on the `render_diff` signal.
//!
//! [`SelectBox::render`]: crate::widget::SelectBox::render

use std::collections::{BTreeSet, HashSet};

use horizon_select_core::logging::targets;

use crate::model::{ItemKey, SelectionState};

// ============================================================================
// Views
// ============================================================================

/// Stable row identity derived from an item key.
pub fn row_id(key: &ItemKey) -> String {
    format!("ListItem{key}")
}

/// Everything a renderer needs to draw one item row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: ItemKey,
    pub value: String,
    /// Stable identity, see [`row_id`].
    pub row_id: String,
    pub checkable: bool,
    pub collectable: bool,
    pub selectable: bool,
    pub enabled: bool,
    /// The row is currently selected.
    pub checked: bool,
    /// The row carries the favorite marker.
    pub favorite: bool,
    /// Render the favorite star affordance.
    pub show_favorite_star: bool,
    /// Render the key next to the value.
    pub display_key: bool,
    /// The row belongs to a group (indented under a header).
    pub in_group: bool,
}

impl RowView {
    /// The label text: `"key: value"` with `display_key`, else the value.
    pub fn label(&self) -> String {
        if self.display_key {
            format!("{}: {}", self.key, self.value)
        } else {
            self.value.clone()
        }
    }
}

/// A group header row, rendered before the item starting the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeaderView {
    /// Key of the item starting the group.
    pub key: ItemKey,
    pub text: String,
    /// The header offers a check-all box.
    pub selectable: bool,
    /// The group start item is selected.
    pub checked: bool,
}

/// The collapsed summary shown in the head of the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadView {
    pub text: String,
    /// Selected entries in iteration order.
    pub selected: Vec<(ItemKey, String)>,
    pub reset_visible: bool,
    pub locked: bool,
    pub popup_visible: bool,
}

/// Produces concrete output from views.
pub trait SelectRenderer {
    /// Output for a list row.
    type Row;
    /// Output for the head.
    type Head;

    /// Render an item row.
    fn render_row(&mut self, row: &RowView) -> Self::Row;

    /// Render a group header row.
    fn render_group_header(&mut self, header: &GroupHeaderView) -> Self::Row;

    /// Render the head.
    fn render_head(&mut self, head: &HeadView) -> Self::Head;
}

/// The result of a full render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSelect<H, R> {
    pub head: H,
    /// Group headers and item rows, in display order.
    pub rows: Vec<R>,
}

// ============================================================================
// Render Diff
// ============================================================================

/// Incremental update emitted after a committed state change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDiff {
    /// Keys that became selected, in selection order.
    pub checked: Vec<ItemKey>,
    /// Keys that stopped being selected, sorted.
    pub unchecked: Vec<ItemKey>,
    pub head_text: String,
    pub reset_visible: bool,
}

impl RenderDiff {
    /// Compute the diff between a previous key set and the current selection.
    pub fn between(
        before: &BTreeSet<ItemKey>,
        after: &SelectionState,
        head_text: impl Into<String>,
        reset_visible: bool,
    ) -> Self {
        let checked = after
            .keys()
            .filter(|key| !before.contains(*key))
            .cloned()
            .collect();
        let unchecked = before
            .iter()
            .filter(|key| !after.contains(key))
            .cloned()
            .collect();
        Self {
            checked,
            unchecked,
            head_text: head_text.into(),
            reset_visible,
        }
    }

    /// True if no row changed its checked state.
    pub fn rows_unchanged(&self) -> bool {
        self.checked.is_empty() && self.unchecked.is_empty()
    }
}

// ============================================================================
// Handler Bindings
// ============================================================================

/// Tracks which rendered rows already have interaction handlers.
///
/// Rows only exist after the renderer produced them, so handlers are attached
/// after each render pass. Attaching twice to the same row is a no-op.
#[derive(Debug, Clone, Default)]
pub struct HandlerBindings {
    attached: HashSet<String>,
}

impl HandlerBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to a row; returns false if it already had handlers.
    pub fn attach(&mut self, row_id: &str) -> bool {
        let inserted = self.attached.insert(row_id.to_string());
        if inserted {
            tracing::trace!(target: targets::RENDER, row_id, "handlers attached");
        }
        inserted
    }

    /// Attach to every row; returns how many were new.
    pub fn attach_all<'a>(&mut self, row_ids: impl IntoIterator<Item = &'a str>) -> usize {
        row_ids.into_iter().filter(|id| self.attach(id)).count()
    }

    pub fn is_attached(&self, row_id: &str) -> bool {
        self.attached.contains(row_id)
    }

    pub fn len(&self) -> usize {
        self.attached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }

    /// Forget all rows, e.g. when the list is rebuilt.
    pub fn clear(&mut self) {
        self.attached.clear();
    }
}

// ============================================================================
// Text Renderer
// ============================================================================

/// Renders rows and head as plain text lines.
///
/// ```text
/// [x] Austria ★
/// [ ] Belgium (disabled)
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl SelectRenderer for TextRenderer {
    type Row = String;
    type Head = String;

    fn render_row(&mut self, row: &RowView) -> String {
        let check = match (row.checkable, row.checked) {
            (false, _) => "   ",
            (true, true) => "[x]",
            (true, false) => "[ ]",
        };
        let indent = if row.in_group { "  " } else { "" };
        let mut line = format!("{indent}{check} {}", row.label());
        if row.show_favorite_star {
            line.push_str(if row.favorite { " ★" } else { " ☆" });
        }
        if !row.enabled {
            line.push_str(" (disabled)");
        }
        line
    }

    fn render_group_header(&mut self, header: &GroupHeaderView) -> String {
        if header.selectable {
            let check = if header.checked { "[x]" } else { "[ ]" };
            format!("{check} -- {} --", header.text)
        } else {
            format!("-- {} --", header.text)
        }
    }

    fn render_head(&mut self, head: &HeadView) -> String {
        let arrow = if head.popup_visible { "▴" } else { "▾" };
        let mut line = format!("{} {arrow}", head.text);
        if head.reset_visible {
            line.push_str(" [reset]");
        }
        if head.locked {
            line.push_str(" (locked)");
        }
        line
    }
}
