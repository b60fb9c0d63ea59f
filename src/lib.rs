//! Marginalia - comment-preserving settings files
//!
//! Marginalia keeps the comments operators write in settings files intact
//! across load and save, layers compiled-in defaults over what is on disk,
//! and exposes directories of JSON documents as one store per file.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod validate;

// Re-exports for convenience
pub use application::{
    BuiltinSettings, BuiltinsOnly, ConfigSetting, DirectoryStore, LayerState, LoadOutcome,
    SettingsContext, SettingsExtension, SettingsLayer, DEFAULT_TEMPLATE,
};
pub use domain::entities::Comment;
pub use domain::ports::{DocumentStore, FileDocument};
pub use domain::value_objects::{CommentStyle, KeyPath};
pub use error::{ConfigError, ConfigResult};
pub use infrastructure::{DataRoot, JsonDocument, YamlDocument, DATA_DIR_VAR};
pub use validate::ValidationError;
