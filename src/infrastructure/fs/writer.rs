//! Atomic file writer
//!
//! Writes go to a temp file in the target directory and are renamed over
//! the destination, so readers see either the old or the new file. An
//! exclusive lock on a sibling `.lock` file serializes writers across
//! processes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::{ConfigError, ConfigResult};

/// Replace `path` with `content` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> ConfigResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| ConfigError::file_access(&parent, e))?;

    let lock_path = lock_path(path);
    let lock_file =
        fs::File::create(&lock_path).map_err(|e| ConfigError::file_access(&lock_path, e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| ConfigError::file_access(&lock_path, e))?;

    let result = write_and_persist(&parent, path, content);

    let _ = lock_file.unlock();
    result
}

fn write_and_persist(dir: &Path, path: &Path, content: &[u8]) -> ConfigResult<()> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| ConfigError::file_access(dir, e))?;
    temp.write_all(content)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ConfigError::file_access(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| ConfigError::file_access(path, e.error))?;
    Ok(())
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

/// Read a file, treating "not found" as `None`.
pub fn read_optional(path: &Path) -> ConfigResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::file_access(path, e)),
    }
}
