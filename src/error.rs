//! Error types for Marginalia
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::CommentStyle;
use crate::validate::ValidationError;

/// Result type alias for Marginalia operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main error type for Marginalia operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Comment block has fewer lines than its style's decoration needs
    #[error("malformed {style} comment: expected at least {expected} lines, found {found}")]
    MalformedComment {
        style: CommentStyle,
        expected: usize,
        found: usize,
    },

    /// Unparseable line in a settings file
    #[error("syntax error in {file}:{line}: {message}")]
    Syntax {
        file: PathBuf,
        line: usize,
        message: String,
    },

    /// Invalid JSON document
    #[error("invalid JSON in {file}: {message}")]
    Json { file: PathBuf, message: String },

    /// IO error tied to a specific file
    #[error("cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory was absent and could not be created
    #[error("cannot create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be converted to the requested type
    #[error("value at '{key}' has the wrong type: {message}")]
    Coercion { key: String, message: String },

    /// Key path does not exist in the document
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// No document with this logical name was discovered
    #[error("unknown document '{name}' in {directory}")]
    UnknownDocument { name: String, directory: PathBuf },

    /// Document was used before `load()`
    #[error("document {path} has not been loaded")]
    NotLoaded { path: PathBuf },

    /// Invalid argument to a validation helper
    #[error(transparent)]
    Precondition(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// True when the input text itself is malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MalformedComment { .. }
                | ConfigError::Syntax { .. }
                | ConfigError::Json { .. }
        )
    }
}
