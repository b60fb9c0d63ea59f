//! Directory-backed document store
//!
//! One document per `<name>.<ext>` file in a directory, where the extension
//! belongs to the document type (`json` for `JsonDocument`, `yml` for
//! `YamlDocument`). The set of documents is a snapshot taken at `open`;
//! later changes on disk are not picked up.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::ports::FileDocument;
use crate::domain::value_objects::DELIMITER;
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::documents::JsonDocument;
use crate::infrastructure::fs::DataRoot;
use crate::validate;

#[derive(Debug)]
pub struct DirectoryStore<D = JsonDocument> {
    directory: PathBuf,
    documents: BTreeMap<String, D>,
    had_to_create_directory: bool,
}

impl<D: FileDocument> DirectoryStore<D> {
    /// Open `dir` relative to the data root, creating it if absent.
    pub fn open(root: &DataRoot, dir: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::open_at(root.resolve(dir))
    }

    /// Open a directory by path, creating it if absent.
    pub fn open_at(directory: impl Into<PathBuf>) -> ConfigResult<Self> {
        let directory = directory.into();

        let had_to_create_directory = !directory.exists();
        if had_to_create_directory {
            fs::create_dir_all(&directory).map_err(|source| ConfigError::DirectoryCreation {
                path: directory.clone(),
                source,
            })?;
            log::info!("created directory {}", directory.display());
        }

        let documents = discover(&directory)?;
        log::debug!(
            "found {} {} document(s) in {}",
            documents.len(),
            D::EXTENSION,
            directory.display()
        );

        Ok(Self {
            directory,
            documents,
            had_to_create_directory,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether `open` had to create the directory
    pub fn had_to_create_directory(&self) -> bool {
        self.had_to_create_directory
    }

    /// Logical names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }

    /// Document `name`, loaded from disk on first access.
    pub fn document(&mut self, name: &str) -> ConfigResult<&mut D> {
        let document = self
            .documents
            .get_mut(name)
            .ok_or_else(|| ConfigError::UnknownDocument {
                name: name.to_string(),
                directory: self.directory.clone(),
            })?;
        if !document.is_loaded() {
            document.load()?;
        }
        Ok(document)
    }

    /// Deserialize every document, in name order.
    ///
    /// A document that cannot be read or does not fit `T` is logged and
    /// left out; the rest still load.
    pub fn load_all<T: DeserializeOwned>(&mut self) -> Vec<(String, T)> {
        let mut loaded = Vec::with_capacity(self.documents.len());
        for (name, document) in &mut self.documents {
            match deserialize(name, document) {
                Ok(value) => loaded.push((name.clone(), value)),
                Err(e) => log::warn!(
                    "could not load document '{}' from {}: {}",
                    name,
                    document.location().display(),
                    e
                ),
            }
        }
        loaded
    }

    /// Add a document named `name`. Nothing is written until it is saved.
    pub fn create(&mut self, name: &str) -> ConfigResult<&mut D> {
        validate::ensure_or(!name.is_empty(), "document name must not be empty")?;
        validate::ensure_or(
            !name.starts_with(DELIMITER) && !name.contains(['/', '\\']),
            "document name must be a plain file stem",
        )?;

        if !self.documents.contains_key(name) {
            let path = self.directory.join(format!("{}.{}", name, D::EXTENSION));
            self.documents
                .insert(name.to_string(), D::for_file(name, path));
        }
        self.document(name)
    }
}

fn deserialize<D, T>(name: &str, document: &mut D) -> ConfigResult<T>
where
    D: FileDocument,
    T: DeserializeOwned,
{
    if !document.is_loaded() {
        document.load()?;
    }
    serde_json::from_value(document.snapshot()?).map_err(|e| ConfigError::Coercion {
        key: name.to_string(),
        message: e.to_string(),
    })
}

/// Logical name of a directory entry, if it carries `extension`.
///
/// The name is everything before the last `.`, so `a.b.json` is `a.b`.
fn logical_name<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    if file_name.starts_with(DELIMITER) {
        return None;
    }
    let (stem, found) = file_name.rsplit_once(DELIMITER)?;
    (found.eq_ignore_ascii_case(extension) && !stem.is_empty()).then_some(stem)
}

fn discover<D: FileDocument>(directory: &Path) -> ConfigResult<BTreeMap<String, D>> {
    let entries =
        fs::read_dir(directory).map_err(|e| ConfigError::file_access(directory, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::file_access(directory, e))?;
        let path = entry.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = BTreeMap::new();
    for path in paths {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            log::warn!("ignoring non UTF-8 file name {}", path.display());
            continue;
        };
        let Some(name) = logical_name(file_name, D::EXTENSION) else {
            log::debug!("ignoring {}", path.display());
            continue;
        };
        if documents.contains_key(name) {
            log::warn!(
                "ignoring {}: document '{}' already found",
                path.display(),
                name
            );
            continue;
        }
        documents.insert(name.to_string(), D::for_file(name, path.clone()));
    }

    Ok(documents)
}
