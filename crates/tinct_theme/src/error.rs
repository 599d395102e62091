//! Theme editor error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`ThemeEditor`](crate::ThemeEditor) operations.
///
/// None of them poison the editor; the session stays usable after any of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Saving requires an active base theme
    #[error("No base theme is active. Select a theme before saving.")]
    NoBaseTheme,

    /// The storage backend failed; the message is passed through verbatim
    #[error("{0}")]
    Persistence(String),

    /// A save is waiting on storage; saves and edits are rejected until it
    /// completes
    #[error("A save is already in progress")]
    SaveInFlight,

    /// The diff is empty, there is nothing to persist
    #[error("No token changes to save")]
    NothingToSave,

    /// The theme name slugifies to an empty id
    #[error("Theme name `{0}` does not produce a valid theme id")]
    InvalidThemeName(String),

    /// Neither a light nor a dark value was supplied
    #[error("Token `{0}` needs a light or a dark value")]
    MissingValue(String),

    /// Token not in the registry (strict mode only)
    #[error("Unknown token `{0}`")]
    UnknownToken(String),

    /// An operation on the selected element with nothing selected
    #[error("No element is selected")]
    NoSelection,
}

/// Failure reported by a [`ThemeStorage`](crate::ThemeStorage) backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid editor config: {0}")]
    Parse(#[from] toml::de::Error),
}
