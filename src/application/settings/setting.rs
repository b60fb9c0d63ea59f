//! A single declared setting

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::context::SettingsContext;
use crate::domain::entities::Comment;
use crate::domain::value_objects::KeyPath;
use crate::error::{ConfigError, ConfigResult};

/// Key path, compiled-in default and description of one setting, plus the
/// value resolved from its document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSetting {
    key: KeyPath,
    default: Value,
    description: Comment,
    value: Value,
}

impl ConfigSetting {
    /// Declare a setting against the active document.
    ///
    /// If the key is absent the default is written together with the
    /// description as its comment; otherwise the stored value is read and the
    /// document is left untouched.
    pub fn new(
        ctx: &mut SettingsContext,
        key: &str,
        default: impl Into<Value>,
        description: Comment,
    ) -> ConfigResult<Self> {
        let key = KeyPath::parse(key)?;
        let default = default.into();
        let document = ctx.document_mut();

        let value = match document.get(&key) {
            Some(existing) => {
                log::debug!("setting '{}' read from {}", key, document.location().display());
                existing
            }
            None => {
                log::debug!("setting '{}' seeded with default {}", key, default);
                document.set(&key, default.clone())?;
                if !description.is_empty() {
                    document.set_comment(&key, description.clone())?;
                }
                default.clone()
            }
        };

        Ok(Self {
            key,
            default,
            description,
            value,
        })
    }

    pub fn key(&self) -> &KeyPath {
        &self.key
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn description(&self) -> &Comment {
        &self.description
    }

    /// Cached value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Typed copy of the cached value.
    pub fn get<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        serde_json::from_value(self.value.clone()).map_err(|e| ConfigError::Coercion {
            key: self.key.to_string(),
            message: e.to_string(),
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    /// Write a new value through to the document and cache it.
    pub fn set(&mut self, ctx: &mut SettingsContext, value: impl Into<Value>) -> ConfigResult<()> {
        let value = value.into();
        ctx.document_mut().set(&self.key, value.clone())?;
        self.value = value;
        Ok(())
    }

    /// Re-read the value, falling back to the default if the key was removed.
    pub fn reload(&mut self, ctx: &SettingsContext) {
        self.value = ctx
            .document()
            .get(&self.key)
            .unwrap_or_else(|| self.default.clone());
    }
}
