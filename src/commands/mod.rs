//! Subcommand implementations

mod docs;
mod fmt;
mod get;
mod init;
mod set;

pub use docs::cmd_docs;
pub use fmt::cmd_fmt;
pub use get::cmd_get;
pub use init::cmd_init;
pub use set::cmd_set;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marginalia::{DataRoot, DocumentStore, KeyPath, YamlDocument};

const APP_NAME: &str = "marginalia";

/// `--data-dir` if given, otherwise the environment or platform default.
fn data_root(data_dir: Option<PathBuf>) -> DataRoot {
    data_dir
        .map(DataRoot::new)
        .unwrap_or_else(|| DataRoot::for_app(APP_NAME))
}

/// Load a settings file, starting empty if it does not exist.
fn load_document(file: &Path) -> Result<YamlDocument> {
    let mut document = YamlDocument::new(file);
    document
        .load()
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(document)
}

fn parse_key(key: &str) -> Result<KeyPath> {
    KeyPath::parse(key).with_context(|| format!("Invalid key path '{}'", key))
}
