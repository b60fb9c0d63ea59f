//! Settings layering
//!
//! Binds a settings document, seeds compiled-in defaults for absent keys,
//! lets the application register its own settings, and persists the merged
//! result without disturbing comments on keys it did not touch.

mod builtins;
mod context;
mod layer;
mod setting;

pub use builtins::{BuiltinSettings, DEFAULT_LOCALE, LOCALE_KEY};
pub use context::SettingsContext;
pub use layer::{
    BuiltinsOnly, LayerState, LoadOutcome, SettingsExtension, SettingsLayer, DEFAULT_FILE_NAME,
    DEFAULT_TEMPLATE,
};
pub use setting::ConfigSetting;
