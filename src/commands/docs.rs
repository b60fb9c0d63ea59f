use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marginalia::{DirectoryStore, JsonDocument};

use super::data_root;

pub fn cmd_docs(dir: &Path, data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let root = data_root(data_dir);
    let store = DirectoryStore::<JsonDocument>::open(&root, dir)
        .with_context(|| format!("Failed to open {}", root.resolve(dir).display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "directory": store.directory().display().to_string(),
                "created": store.had_to_create_directory(),
                "documents": store.names().collect::<Vec<_>>(),
            }))?
        );
        return Ok(());
    }

    if store.had_to_create_directory() {
        println!("Created {}", store.directory().display());
    }
    if store.is_empty() {
        println!("No documents in {}", store.directory().display());
    }
    for name in store.names() {
        println!("{}", name);
    }
    Ok(())
}
