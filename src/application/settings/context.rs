//! Active settings document for one load cycle

use std::path::Path;

use crate::domain::ports::DocumentStore;

/// Owns the document every `ConfigSetting` of a load cycle binds to.
///
/// Passed explicitly to settings instead of living in a global.
pub struct SettingsContext {
    document: Box<dyn DocumentStore>,
}

impl SettingsContext {
    pub fn new(document: Box<dyn DocumentStore>) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &dyn DocumentStore {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> &mut dyn DocumentStore {
        self.document.as_mut()
    }

    pub fn location(&self) -> &Path {
        self.document.location()
    }

    pub fn into_document(self) -> Box<dyn DocumentStore> {
        self.document
    }
}

impl std::fmt::Debug for SettingsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsContext")
            .field("location", &self.location())
            .field("loaded", &self.document.is_loaded())
            .finish()
    }
}
