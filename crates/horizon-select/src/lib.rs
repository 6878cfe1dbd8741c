//! Horizon Select - a single- and multi-select dropdown state machine.
//!
//! The crate owns everything about a dropdown list except drawing it: the
//! item registry, single and multi selection, group-select propagation,
//! default and reset handling, a favorite marker, and the callback gate that
//! lets the host veto or observe every interactive change.
//!
//! # Example
//!
//! ```
//! use horizon_select::prelude::*;
//!
//! fn main() -> horizon_select::Result<()> {
//!     let mut select = SelectBox::new().with_multiselect(true);
//!     select.set_data([("at", "Austria"), ("de", "Germany")], GroupMap::new())?;
//!
//!     select.set_on_select(|request: &SelectRequest| request.key.as_str() != "de");
//!     assert_eq!(select.toggle("de"), ToggleOutcome::Vetoed);
//!     assert_eq!(select.head_text(), "Austria");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod model;
pub mod prelude;
pub mod widget;

pub use error::{Result, SelectError, SelectWarning};
pub use horizon_select_core::{ConnectionId, Property, Signal};
pub use widget::SelectBox;
