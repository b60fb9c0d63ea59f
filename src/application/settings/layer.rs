//! Settings layering protocol
//!
//! Bind → Load → Seed built-ins → Extension hook → Persist.

use super::builtins::BuiltinSettings;
use super::context::SettingsContext;
use crate::domain::ports::DocumentStore;
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::documents::YamlDocument;
use crate::infrastructure::fs::DataRoot;

/// File name used when an extension does not pick its own
pub const DEFAULT_FILE_NAME: &str = "config.yml";

/// Settings file copied into place on first run
pub const DEFAULT_TEMPLATE: &str = include_str!("../../../resources/config.yml");

/// Application-specific settings registered after the built-ins.
pub trait SettingsExtension {
    /// Declare this application's settings against the bound document.
    fn load_settings(&mut self, ctx: &mut SettingsContext) -> ConfigResult<()>;

    /// Settings file name relative to the data root
    fn file_name(&self) -> &str {
        DEFAULT_FILE_NAME
    }

    /// Contents written when the settings file does not exist yet
    fn template(&self) -> &str {
        DEFAULT_TEMPLATE
    }
}

/// Extension with no settings of its own
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinsOnly;

impl SettingsExtension for BuiltinsOnly {
    fn load_settings(&mut self, _ctx: &mut SettingsContext) -> ConfigResult<()> {
        Ok(())
    }
}

/// Progress of the current load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerState {
    #[default]
    Unbound,
    Bound,
    DefaultsSeeded,
    ExtensionLoaded,
    Persisted,
}

/// How a successful load cycle ended
#[derive(Debug)]
pub enum LoadOutcome {
    Persisted,
    /// Settings are usable in memory but could not be written back
    PersistFailed(ConfigError),
}

impl LoadOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, LoadOutcome::Persisted)
    }
}

/// Binds a settings document, merges defaults into it and writes it back.
#[derive(Debug, Default)]
pub struct SettingsLayer {
    state: LayerState,
    context: Option<SettingsContext>,
    builtins: Option<BuiltinSettings>,
}

impl SettingsLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a full load cycle against `document`.
    ///
    /// A load failure is returned as `Err` and leaves the layer `Bound`.
    /// A save failure is logged and reported through the outcome; the
    /// in-memory settings stay usable.
    pub fn load_settings(
        &mut self,
        document: Box<dyn DocumentStore>,
        extension: &mut dyn SettingsExtension,
    ) -> ConfigResult<LoadOutcome> {
        self.builtins = None;
        let ctx = self.context.insert(SettingsContext::new(document));
        self.state = LayerState::Bound;
        log::debug!("settings bound to {}", ctx.location().display());

        ctx.document_mut().load()?;

        self.builtins = Some(BuiltinSettings::seed(ctx)?);
        self.state = LayerState::DefaultsSeeded;

        extension.load_settings(ctx)?;
        self.state = LayerState::ExtensionLoaded;

        match ctx.document().save() {
            Ok(()) => {
                self.state = LayerState::Persisted;
                log::info!("settings loaded from {}", ctx.location().display());
                Ok(LoadOutcome::Persisted)
            }
            Err(e) => {
                log::warn!(
                    "could not save settings to {}: {}",
                    ctx.location().display(),
                    e
                );
                Ok(LoadOutcome::PersistFailed(e))
            }
        }
    }

    /// Run a load cycle against the extension's settings file under `root`,
    /// creating it from the extension's template if it is missing.
    pub fn load_from(
        &mut self,
        root: &DataRoot,
        extension: &mut dyn SettingsExtension,
    ) -> ConfigResult<LoadOutcome> {
        let document =
            YamlDocument::new(root.resolve(extension.file_name())).with_template(extension.template());
        self.load_settings(Box::new(document), extension)
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    /// Active context, once a document has been bound
    pub fn context(&self) -> Option<&SettingsContext> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SettingsContext> {
        self.context.as_mut()
    }

    pub fn builtins(&self) -> Option<&BuiltinSettings> {
        self.builtins.as_ref()
    }
}
