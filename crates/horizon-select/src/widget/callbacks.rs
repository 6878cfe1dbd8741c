//! Callback gate: the pre-selection veto and the post-selection notification.
//!
//! Every interactive mutation first asks the `on_select` hook. A
//! [`Verdict::Veto`] aborts the mutation with no state change; anything else
//! lets it through. After the mutation commits, the `on_selected` signal
//! fires with a [`SelectedEvent`].
//!
//! # Example
//!
//! ```
//! use horizon_select::widget::{CallbackGate, SelectRequest, Verdict};
//!
//! let mut gate = CallbackGate::new();
//! gate.set_on_select(|request: &SelectRequest| request.key.as_str() != "locked-item");
//!
//! let request = SelectRequest::new("locked-item", "Locked", false);
//! assert_eq!(gate.check(&request), Verdict::Veto);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_select_core::Signal;
use horizon_select_core::logging::targets;

use crate::model::ItemKey;

/// The answer of the `on_select` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    /// Let the mutation proceed.
    #[default]
    Allow,
    /// Abort the mutation.
    Veto,
}

impl Verdict {
    /// Returns true for [`Verdict::Veto`].
    pub fn is_veto(self) -> bool {
        self == Self::Veto
    }
}

impl From<bool> for Verdict {
    fn from(allow: bool) -> Self {
        if allow { Self::Allow } else { Self::Veto }
    }
}

/// A hook returning nothing never vetoes.
impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Self::Allow
    }
}

/// Only an explicit `Some(false)` vetoes.
impl From<Option<bool>> for Verdict {
    fn from(answer: Option<bool>) -> Self {
        match answer {
            Some(false) => Self::Veto,
            _ => Self::Allow,
        }
    }
}

/// What the `on_select` hook is asked about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    /// Key about to change.
    pub key: ItemKey,
    /// Its value.
    pub value: String,
    /// True when the key is about to be removed from the selection.
    pub is_deselect: bool,
}

impl SelectRequest {
    /// Create a request.
    pub fn new(key: impl Into<ItemKey>, value: impl Into<String>, is_deselect: bool) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            is_deselect,
        }
    }
}

/// Payload of the `on_selected` signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedEvent {
    /// A committed interactive change involving `key`.
    Selected { key: ItemKey, value: String },
    /// `set_data` finished its initial fill.
    Loaded,
}

impl SelectedEvent {
    /// Create a `Selected` event.
    pub fn selected(key: impl Into<ItemKey>, value: impl Into<String>) -> Self {
        Self::Selected {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key for `Selected` events.
    pub fn key(&self) -> Option<&ItemKey> {
        match self {
            Self::Selected { key, .. } => Some(key),
            Self::Loaded => None,
        }
    }
}

type SelectHook = Arc<dyn Fn(&SelectRequest) -> Verdict + Send + Sync>;

/// Holds the veto hook.
#[derive(Default, Clone)]
pub struct CallbackGate {
    on_select: Option<SelectHook>,
}

impl fmt::Debug for CallbackGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackGate")
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl CallbackGate {
    /// Create a gate with no hook; everything is allowed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the veto hook, replacing any previous one.
    ///
    /// The hook may return anything convertible to a [`Verdict`]: a `bool`,
    /// `()`, `Option<bool>` or a `Verdict` itself.
    pub fn set_on_select<F, V>(&mut self, hook: F)
    where
        F: Fn(&SelectRequest) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        self.on_select = Some(Arc::new(move |request| hook(request).into()));
    }

    /// Install a two-argument `(key, value)` hook.
    #[deprecated(note = "use `set_on_select`, whose request also says whether it is a deselect")]
    pub fn set_on_select_key_value<F, V>(&mut self, hook: F)
    where
        F: Fn(&ItemKey, &str) -> V + Send + Sync + 'static,
        V: Into<Verdict>,
    {
        tracing::warn!(
            target: targets::CALLBACK,
            "two-argument on_select hook is deprecated; it is not told about deselects"
        );
        self.on_select = Some(Arc::new(move |request| {
            hook(&request.key, &request.value).into()
        }));
    }

    /// Remove the veto hook.
    pub fn clear_on_select(&mut self) {
        self.on_select = None;
    }

    /// Returns true if a hook is installed.
    pub fn has_on_select(&self) -> bool {
        self.on_select.is_some()
    }

    /// Ask the hook about a pending mutation.
    pub fn check(&self, request: &SelectRequest) -> Verdict {
        let Some(hook) = &self.on_select else {
            return Verdict::Allow;
        };
        let verdict = hook(request);
        if verdict.is_veto() {
            tracing::debug!(
                target: targets::CALLBACK,
                key = %request.key,
                is_deselect = request.is_deselect,
                "selection vetoed"
            );
        }
        verdict
    }

    /// Emit a committed change on `signal`.
    pub fn notify(&self, signal: &Signal<SelectedEvent>, event: SelectedEvent) {
        if signal.connection_count() == 0 {
            tracing::debug!(target: targets::CALLBACK, ?event, "no on_selected handler connected");
            return;
        }
        signal.emit(event);
    }
}
