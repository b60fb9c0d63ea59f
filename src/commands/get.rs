use std::path::Path;

use anyhow::{Context, Result};
use marginalia::DocumentStore;

use super::{load_document, parse_key};

pub fn cmd_get(file: &Path, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    let document = load_document(file)?;

    let value = document
        .get(&key)
        .with_context(|| format!("Key '{}' not found in {}", key, file.display()))?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
