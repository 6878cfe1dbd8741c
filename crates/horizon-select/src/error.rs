//! Error types for the selection component.
//!
//! Only [`SelectError`] is ever returned as an `Err`. Everything the user can
//! trigger by clicking around is a [`SelectWarning`]: logged, reported in the
//! operation's outcome, and otherwise ignored so the control stays responsive.

use crate::model::ItemKey;

/// Result type alias for selection operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors that abort an operation.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// `set_data` was handed no items.
    #[error("empty input: a select box needs at least one item")]
    EmptyInput,

    /// A configuration field holds a value the component cannot honor.
    #[error("invalid value for option '{field}': {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },

    /// TOML configuration could not be parsed.
    #[error("failed to parse TOML configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),

    /// JSON configuration could not be parsed.
    #[error("failed to parse JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    /// Configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

impl SelectError {
    /// Create a configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

/// Recoverable conditions that turn an operation into a no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectWarning {
    /// The key does not exist in the registry.
    #[error("key '{0}' doesn't exist")]
    KeyNotFound(ItemKey),

    /// The key exists but is disabled.
    #[error("key '{0}' is disabled")]
    ItemDisabled(ItemKey),

    /// The item was loaded as not selectable.
    #[error("key '{0}' is not selectable")]
    NotSelectable(ItemKey),

    /// Deselecting would leave the selection empty.
    #[error("key '{0}' is the last selection and can't be deselected")]
    LastSelection(ItemKey),

    /// The multi-selection cap is reached.
    #[error("maximum of {max} selections reached")]
    MaxSelections { max: usize },
}
