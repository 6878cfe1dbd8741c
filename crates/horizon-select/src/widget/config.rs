//! Typed configuration for a select box.
//!
//! Every option has a default, so an empty document is a valid
//! configuration. Options can be read from TOML or JSON:
//!
//! ```
//! use horizon_select::widget::SelectConfig;
//!
//! let config = SelectConfig::from_toml_str(r#"
//!     multiselect = true
//!     max_selections = 3
//!     default_selections = ["at", "de"]
//! "#).unwrap();
//!
//! assert!(config.multiselect);
//! assert_eq!(config.max_selections, Some(3));
//! assert!(!config.locked);
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use horizon_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectError};
use crate::model::ItemKey;

/// Default cap on multi-selections.
pub const DEFAULT_MAX_SELECTIONS: usize = 10;

/// Default suffix of the head text when several items are selected.
pub const DEFAULT_MULTISELECT_TEXT: &str = "selected";

/// Select box options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Allow several items to be selected.
    pub multiselect: bool,
    /// Cap on multi-selections; `None` is unbounded.
    pub max_selections: Option<usize>,
    /// Show the favorite star on rows.
    pub favorite_star: bool,
    /// Prefix values with their key in rows and head text.
    pub display_keys: bool,
    /// Keys selected on load and on reset.
    pub default_selections: Vec<ItemKey>,
    /// Keys that can't be selected.
    pub disabled_selections: BTreeSet<ItemKey>,
    /// Ignore user interaction.
    pub locked: bool,
    /// Suffix of the head text when several items are selected.
    pub text_for_multiselect: Option<String>,
    /// Offer a reset affordance when not at default.
    pub has_reset_button: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            multiselect: false,
            max_selections: Some(DEFAULT_MAX_SELECTIONS),
            favorite_star: false,
            display_keys: false,
            default_selections: Vec::new(),
            disabled_selections: BTreeSet::new(),
            locked: false,
            text_for_multiselect: None,
            has_reset_button: false,
        }
    }
}

impl SelectConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading select config");

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source)
        } else {
            Self::from_toml_str(&source)
        }
    }

    /// Check option values.
    pub fn validate(&self) -> Result<()> {
        validate_max_selections(self.max_selections)?;
        if self.text_for_multiselect.as_deref().is_some_and(str::is_empty) {
            tracing::warn!(
                target: targets::CONFIG,
                "empty text_for_multiselect; head text will end in a space"
            );
        }
        Ok(())
    }

    /// The head text suffix in effect.
    pub fn multiselect_text(&self) -> &str {
        self.text_for_multiselect
            .as_deref()
            .unwrap_or(DEFAULT_MULTISELECT_TEXT)
    }

    /// Set whether several items may be selected.
    pub fn with_multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    /// Set the multi-selection cap.
    pub fn with_max_selections(mut self, max: Option<usize>) -> Self {
        self.max_selections = max;
        self
    }

    /// Set the default keys.
    pub fn with_default_selections<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.default_selections = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set the disabled keys.
    pub fn with_disabled_selections<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ItemKey>,
    {
        self.disabled_selections = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether the favorite star is shown.
    pub fn with_favorite_star(mut self, favorite_star: bool) -> Self {
        self.favorite_star = favorite_star;
        self
    }

    /// Set whether keys are displayed next to values.
    pub fn with_display_keys(mut self, display_keys: bool) -> Self {
        self.display_keys = display_keys;
        self
    }

    /// Set whether interaction is ignored.
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Set the head text suffix for multi-selections.
    pub fn with_text_for_multiselect(mut self, text: impl Into<String>) -> Self {
        self.text_for_multiselect = Some(text.into());
        self
    }

    /// Set whether a reset affordance is offered.
    pub fn with_reset_button(mut self, has_reset_button: bool) -> Self {
        self.has_reset_button = has_reset_button;
        self
    }
}

/// A cap of zero would make every selection invalid.
pub(crate) fn validate_max_selections(max: Option<usize>) -> Result<()> {
    if max == Some(0) {
        return Err(SelectError::invalid_config(
            "max_selections",
            "must be at least 1",
        ));
    }
    Ok(())
}
