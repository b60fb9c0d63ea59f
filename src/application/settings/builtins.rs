//! Settings every application gets

use super::context::SettingsContext;
use super::setting::ConfigSetting;
use crate::domain::entities::Comment;
use crate::error::ConfigResult;

pub const LOCALE_KEY: &str = "Settings.Locale";
pub const DEFAULT_LOCALE: &str = "en_US";

/// Framework-level settings seeded before any extension settings
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinSettings {
    pub locale: ConfigSetting,
}

impl BuiltinSettings {
    pub fn seed(ctx: &mut SettingsContext) -> ConfigResult<Self> {
        let locale = ConfigSetting::new(
            ctx,
            LOCALE_KEY,
            DEFAULT_LOCALE,
            Comment::new([
                "The language file to use for the plugin",
                "More language files (if available) can be found in the plugins locale folder.",
            ]),
        )?;
        Ok(Self { locale })
    }

    /// Locale identifier, or the default if the stored value is not a string.
    pub fn locale(&self) -> &str {
        self.locale.as_str().unwrap_or(DEFAULT_LOCALE)
    }
}
