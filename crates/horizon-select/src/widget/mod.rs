//! The select box component and its collaborators.
//!
//! - [`SelectBox`]: the dropdown itself
//! - [`CallbackGate`]: the veto hook consulted before interactive changes
//! - [`SelectConfig`]: typed options, loadable from TOML or JSON
//! - [`SelectRenderer`]: the trait a renderer implements to draw the control

mod callbacks;
mod config;
mod render;
mod select_box;

pub use callbacks::{CallbackGate, SelectRequest, SelectedEvent, Verdict};
pub use config::{DEFAULT_MAX_SELECTIONS, DEFAULT_MULTISELECT_TEXT, SelectConfig};
pub use render::{
    GroupHeaderView, HandlerBindings, HeadView, RenderDiff, RenderedSelect, RowView,
    SelectRenderer, TextRenderer, row_id,
};
pub use select_box::{EMPTY_HEAD_TEXT, SelectBox, SelectKey, ToggleOutcome};
