//! Data root resolution with test isolation support.
//!
//! Settings files and document directories are resolved relative to an
//! application data directory. Resolution order:
//! 1. An explicit path (`DataRoot::new`)
//! 2. `MARGINALIA_DATA_DIR` environment variable (for test isolation)
//! 3. `dirs::data_dir()/<app>`
//! 4. `./<app>` when the platform has no data directory

use std::path::{Path, PathBuf};

/// Environment variable that overrides the data root.
///
/// `dirs::data_dir()` uses system APIs on Windows and macOS that ignore
/// `HOME`, so tests point this at a temp directory instead.
pub const DATA_DIR_VAR: &str = "MARGINALIA_DATA_DIR";

/// Base directory that relative settings paths resolve against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRoot {
    path: PathBuf,
}

impl DataRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the data root for application `app`.
    pub fn for_app(app: &str) -> Self {
        let path = std::env::var_os(DATA_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|dir| dir.join(app)))
            .unwrap_or_else(|| PathBuf::from(".").join(app));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Join a relative path onto the root. Absolute paths are returned as-is.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}
