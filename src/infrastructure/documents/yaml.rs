//! Comment-preserving settings document
//!
//! Holds the parsed key tree of one settings file. Comments written by an
//! operator stay attached to their keys across `set` and `save`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use super::tree::{self, NodeValue};
use super::yaml_format::{self, Outline};
use crate::domain::entities::Comment;
use crate::domain::ports::{DocumentStore, FileDocument};
use crate::domain::value_objects::{CommentStyle, KeyPath};
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::fs::{atomic_write, read_optional};

/// Settings file in the indented `key: value` format
#[derive(Debug, Clone)]
pub struct YamlDocument {
    path: PathBuf,
    template: Option<String>,
    default_style: CommentStyle,
    outline: Option<Outline>,
}

impl YamlDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template: None,
            default_style: CommentStyle::default(),
            outline: None,
        }
    }

    /// Text written to disk by `load()` when the file does not exist yet.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Style for comments that do not carry their own.
    pub fn with_comment_style(mut self, style: CommentStyle) -> Self {
        self.default_style = style;
        self
    }

    /// Parse `text` as if it had been loaded from `path`, without touching disk.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> ConfigResult<Self> {
        let mut document = Self::new(path);
        document.outline = Some(yaml_format::parse(text, &document.path)?);
        Ok(document)
    }

    /// Parse `text` the way a value written after `key:` is parsed.
    pub fn parse_value(key: &KeyPath, text: &str) -> ConfigResult<Value> {
        yaml_format::parse_scalar(text.trim()).map_err(|message| ConfigError::Coercion {
            key: key.to_string(),
            message,
        })
    }

    pub fn default_style(&self) -> CommentStyle {
        self.default_style
    }

    fn outline(&self) -> ConfigResult<&Outline> {
        self.outline.as_ref().ok_or_else(|| ConfigError::NotLoaded {
            path: self.path.clone(),
        })
    }

    fn outline_mut(&mut self) -> ConfigResult<&mut Outline> {
        match self.outline.as_mut() {
            Some(outline) => Ok(outline),
            None => Err(ConfigError::NotLoaded {
                path: self.path.clone(),
            }),
        }
    }

    /// Render the document as it would be saved.
    pub fn to_text(&self) -> ConfigResult<String> {
        Ok(yaml_format::render(self.outline()?, self.default_style))
    }

    /// Remove `key` and everything below it, returning the removed value.
    pub fn remove(&mut self, key: &KeyPath) -> ConfigResult<Option<Value>> {
        let outline = self.outline_mut()?;
        Ok(tree::remove(&mut outline.nodes, key).map(|node| node.value.to_json()))
    }

    /// Dot-joined paths of every value in document order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(outline) = &self.outline {
            tree::leaf_paths(&outline.nodes, "", &mut keys);
        }
        keys
    }

    /// Force every comment in the document to render with `style`.
    pub fn restyle(&mut self, style: CommentStyle) -> ConfigResult<()> {
        let outline = self.outline_mut()?;
        restyle_nodes(&mut outline.nodes, style);
        for comment in &mut outline.footer {
            comment.set_style(Some(style));
        }
        Ok(())
    }

    /// Whole document as a JSON object.
    pub fn to_value(&self) -> Option<Value> {
        self.outline
            .as_ref()
            .map(|outline| Value::Object(tree::section_to_map(&outline.nodes)))
    }
}

fn restyle_nodes(nodes: &mut [tree::Node], style: CommentStyle) {
    for node in nodes {
        for comment in node.detached.iter_mut().chain(node.comment.as_mut()) {
            comment.set_style(Some(style));
        }
        if let NodeValue::Section(children) = &mut node.value {
            restyle_nodes(children, style);
        }
    }
}

impl DocumentStore for YamlDocument {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) -> ConfigResult<()> {
        let text = match read_optional(&self.path)? {
            Some(text) => text,
            None => match &self.template {
                Some(template) => {
                    log::info!("creating {} from template", self.path.display());
                    atomic_write(&self.path, template.as_bytes())?;
                    template.clone()
                }
                None => {
                    log::debug!("{} does not exist, starting empty", self.path.display());
                    String::new()
                }
            },
        };

        let outline = yaml_format::parse(&text, &self.path)?;
        log::debug!(
            "loaded {} ({} top-level keys)",
            self.path.display(),
            outline.nodes.len()
        );
        self.outline = Some(outline);
        Ok(())
    }

    fn is_loaded(&self) -> bool {
        self.outline.is_some()
    }

    fn get(&self, key: &KeyPath) -> Option<Value> {
        let outline = self.outline.as_ref()?;
        tree::find(&outline.nodes, key).map(|node| node.value.to_json())
    }

    fn set(&mut self, key: &KeyPath, value: Value) -> ConfigResult<()> {
        let outline = self.outline_mut()?;
        tree::insert(&mut outline.nodes, key, value)
    }

    fn set_comment(&mut self, key: &KeyPath, comment: Comment) -> ConfigResult<()> {
        let outline = self.outline_mut()?;
        let node = tree::find_mut(&mut outline.nodes, key).ok_or_else(|| {
            ConfigError::KeyNotFound {
                key: key.to_string(),
            }
        })?;
        node.comment = (!comment.is_empty()).then_some(comment);
        Ok(())
    }

    fn comment(&self, key: &KeyPath) -> Option<Comment> {
        let outline = self.outline.as_ref()?;
        tree::find(&outline.nodes, key).and_then(|node| node.comment.clone())
    }

    fn save(&self) -> ConfigResult<()> {
        let text = self.to_text()?;
        atomic_write(&self.path, text.as_bytes())?;
        log::info!("saved {}", self.path.display());
        Ok(())
    }
}

impl FileDocument for YamlDocument {
    const EXTENSION: &'static str = "yml";

    fn for_file(_name: &str, path: PathBuf) -> Self {
        Self::new(path)
    }

    fn snapshot(&self) -> ConfigResult<Value> {
        Ok(Value::Object(tree::section_to_map(&self.outline()?.nodes)))
    }
}
