//! Application Layer
//!
//! Orchestration on top of the domain types and document stores.
//!
//! - `settings` - layering of compiled-in defaults over a settings file
//! - `DirectoryStore` - one JSON document per file in a directory

pub mod directory;
pub mod settings;

pub use directory::DirectoryStore;
pub use settings::{
    BuiltinSettings, BuiltinsOnly, ConfigSetting, LayerState, LoadOutcome, SettingsContext,
    SettingsExtension, SettingsLayer, DEFAULT_TEMPLATE,
};
