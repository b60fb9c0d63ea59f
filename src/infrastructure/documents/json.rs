//! Per-file JSON document
//!
//! One JSON object per file, as kept in a `DirectoryStore`. JSON has no
//! comments, so comment calls are accepted and dropped.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::tree;
use crate::domain::entities::Comment;
use crate::domain::ports::{DocumentStore, FileDocument};
use crate::domain::value_objects::KeyPath;
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::fs::{atomic_write, read_optional};

#[derive(Debug, Clone)]
pub struct JsonDocument {
    name: String,
    path: PathBuf,
    root: Option<Map<String, Value>>,
}

impl JsonDocument {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            root: None,
        }
    }

    /// Logical name within the owning directory
    pub fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> ConfigResult<&Map<String, Value>> {
        self.root.as_ref().ok_or_else(|| ConfigError::NotLoaded {
            path: self.path.clone(),
        })
    }

    fn root_mut(&mut self) -> ConfigResult<&mut Map<String, Value>> {
        match self.root.as_mut() {
            Some(root) => Ok(root),
            None => Err(ConfigError::NotLoaded {
                path: self.path.clone(),
            }),
        }
    }

    /// Typed read of the value at `key`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &KeyPath) -> ConfigResult<T> {
        let value = self.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.to_string(),
        })?;
        serde_json::from_value(value).map_err(|e| ConfigError::Coercion {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    pub fn set_as<T: Serialize>(&mut self, key: &KeyPath, value: &T) -> ConfigResult<()> {
        let value = serde_json::to_value(value).map_err(|e| ConfigError::Coercion {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, value)
    }

    /// Deserialize the whole document.
    pub fn to_object<T: DeserializeOwned>(&self) -> ConfigResult<T> {
        let root = self.root()?.clone();
        serde_json::from_value(Value::Object(root)).map_err(|e| ConfigError::Coercion {
            key: self.name.clone(),
            message: e.to_string(),
        })
    }

    /// Replace the whole document with `object`, which must serialize to a JSON object.
    pub fn from_object<T: Serialize>(&mut self, object: &T) -> ConfigResult<()> {
        let coercion = |message: String| ConfigError::Coercion {
            key: self.name.clone(),
            message,
        };
        let root = match serde_json::to_value(object).map_err(|e| coercion(e.to_string()))? {
            Value::Object(map) => map,
            other => return Err(coercion(format!("expected an object, found {}", other))),
        };
        self.root = Some(root);
        Ok(())
    }
}

fn lookup<'a>(root: &'a Map<String, Value>, key: &KeyPath) -> Option<&'a Value> {
    let (first, rest) = key.segments().split_first()?;
    rest.iter()
        .try_fold(root.get(first)?, |value, segment| value.get(segment))
}

impl DocumentStore for JsonDocument {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> ConfigResult<()> {
        let root = match read_optional(&self.path)? {
            Some(text) if !text.trim().is_empty() => {
                let value: Value =
                    serde_json::from_str(&text).map_err(|e| ConfigError::Json {
                        file: self.path.clone(),
                        message: e.to_string(),
                    })?;
                match value {
                    Value::Object(map) => map,
                    _ => {
                        return Err(ConfigError::Json {
                            file: self.path.clone(),
                            message: "top-level value must be an object".to_string(),
                        })
                    }
                }
            }
            _ => Map::new(),
        };

        log::debug!("loaded document '{}' from {}", self.name, self.path.display());
        self.root = Some(root);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.root.is_some()
    }

    fn get(&self, key: &KeyPath) -> Option<Value> {
        lookup(self.root.as_ref()?, key).cloned()
    }

    fn set(&mut self, key: &KeyPath, value: Value) -> ConfigResult<()> {
        let root = self.root_mut()?;
        // Same nesting rules as the text format.
        let mut nodes = match tree::NodeValue::from_json(Value::Object(root.clone())) {
            tree::NodeValue::Section(nodes) => nodes,
            _ => Vec::new(),
        };
        tree::insert(&mut nodes, key, value)?;
        *root = tree::section_to_map(&nodes);
        Ok(())
    }

    fn set_comment(&mut self, key: &KeyPath, _comment: Comment) -> ConfigResult<()> {
        if !self.contains(key) {
            return Err(ConfigError::KeyNotFound {
                key: key.to_string(),
            });
        }
        log::trace!("ignoring comment for '{}' in JSON document", key);
        Ok(())
    }

    fn comment(&self, _key: &KeyPath) -> Option<Comment> {
        None
    }

    fn save(&self) -> ConfigResult<()> {
        let root = self.root()?;
        let mut text = serde_json::to_string_pretty(root).map_err(|e| ConfigError::Json {
            file: self.path.clone(),
            message: e.to_string(),
        })?;
        text.push('\n');
        atomic_write(&self.path, text.as_bytes())?;
        log::debug!("saved document '{}'", self.name);
        Ok(())
    }
}

impl FileDocument for JsonDocument {
    const EXTENSION: &'static str = "json";

    fn for_file(name: &str, path: PathBuf) -> Self {
        Self::new(name, path)
    }

    fn snapshot(&self) -> ConfigResult<Value> {
        Ok(Value::Object(self.root()?.clone()))
    }
}
