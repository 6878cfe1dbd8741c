//! Logging facilities for Horizon Select.
//!
//! Horizon Select uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_select=debug")
//!         .init();
//! }
//! ```
//!
//! Recoverable conditions (unknown keys, attempts to drop the last selection,
//! hitting the selection cap) are reported at `warn` on the targets below and
//! never surface as errors.

/// Span names used throughout Horizon Select for tracing.
pub mod span_names {
    /// Data load span.
    pub const LOAD: &str = "horizon_select::load";
    /// Interactive toggle span.
    pub const TOGGLE: &str = "horizon_select::toggle";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_select_core::signal";
    /// Item registry target.
    pub const REGISTRY: &str = "horizon_select::registry";
    /// Selection state machine target.
    pub const SELECTION: &str = "horizon_select::selection";
    /// Callback gate target.
    pub const CALLBACK: &str = "horizon_select::callback";
    /// Configuration target.
    pub const CONFIG: &str = "horizon_select::config";
    /// Render collaborator target.
    pub const RENDER: &str = "horizon_select::render";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "horizon_select::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with consistent target naming.
#[macro_export]
macro_rules! select_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "horizon_select", $($arg)*)
    };
}

#[macro_export]
macro_rules! select_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_select", $($arg)*)
    };
}

#[macro_export]
macro_rules! select_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_select", $($arg)*)
    };
}
