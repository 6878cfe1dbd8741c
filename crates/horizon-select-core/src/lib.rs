//! Core primitives for Horizon Select.
//!
//! This crate provides the foundational pieces the selection component is
//! built from:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Property System**: Change-detecting cells for runtime options
//! - **Logging**: `tracing` targets and helpers shared by the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_select_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Property, ReadOnlyProperty};
pub use signal::{ConnectionId, Signal};
