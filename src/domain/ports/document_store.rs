//! DocumentStore port - abstraction over a hierarchical key/value file
//!
//! The settings layer and application code talk to documents only through
//! this trait, so they work the same over commented text files, JSON files,
//! or an in-memory mock.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::entities::Comment;
use crate::domain::value_objects::KeyPath;
use crate::error::ConfigResult;

/// A single file of settings addressed by dot-delimited key paths.
///
/// Each document is its own unit of atomicity: `save()` replaces the whole
/// file or leaves it untouched.
pub trait DocumentStore {
    /// Where the document lives on disk
    fn location(&self) -> &Path;

    /// Materialize the document from disk, creating it first if it is absent.
    fn load(&mut self) -> ConfigResult<()>;

    /// Whether `load()` has completed
    fn is_loaded(&self) -> bool;

    /// Value at `key`, if present
    fn get(&self, key: &KeyPath) -> Option<Value>;

    /// Insert or replace the value at `key`, creating parent sections.
    fn set(&mut self, key: &KeyPath, value: Value) -> ConfigResult<()>;

    /// Attach `comment` to an existing key.
    fn set_comment(&mut self, key: &KeyPath, comment: Comment) -> ConfigResult<()>;

    /// Comment attached to `key`, if the format keeps comments
    fn comment(&self, key: &KeyPath) -> Option<Comment>;

    /// Flush the in-memory model to disk.
    fn save(&self) -> ConfigResult<()>;

    fn contains(&self, key: &KeyPath) -> bool {
        self.get(key).is_some()
    }
}

/// A document kept as one file among many in a directory.
pub trait FileDocument: DocumentStore + Sized {
    /// File extension this document type claims, matched case-insensitively
    const EXTENSION: &'static str;

    /// Handle for the document `name` stored at `path`. Nothing is read yet.
    fn for_file(name: &str, path: PathBuf) -> Self;

    /// Whole loaded document as one value.
    fn snapshot(&self) -> ConfigResult<Value>;
}
