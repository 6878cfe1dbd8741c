//! Prelude module for Horizon Select.
//!
//! ```
//! use horizon_select::prelude::*;
//! ```

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use horizon_select_core::{ConnectionId, Property, Signal};

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{GroupHeader, GroupMap, ItemEntry, ItemKey, SelectionMode};

// ============================================================================
// Component
// ============================================================================

pub use crate::widget::{
    RenderDiff, SelectBox, SelectConfig, SelectKey, SelectRenderer, SelectRequest, SelectedEvent,
    TextRenderer, ToggleOutcome, Verdict,
};

// ============================================================================
// Errors
// ============================================================================

pub use crate::error::{SelectError, SelectWarning};
