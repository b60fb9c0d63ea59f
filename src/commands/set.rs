use std::path::Path;

use anyhow::{Context, Result};
use marginalia::{Comment, DocumentStore, YamlDocument};

use super::{load_document, parse_key};

pub fn cmd_set(file: &Path, key: &str, value: &str, comments: &[String], json: bool) -> Result<()> {
    let key = parse_key(key)?;
    let value = YamlDocument::parse_value(&key, value)?;
    let mut document = load_document(file)?;

    document.set(&key, value.clone())?;
    if !comments.is_empty() {
        document.set_comment(&key, Comment::new(comments))?;
    }
    document
        .save()
        .with_context(|| format!("Failed to save {}", file.display()))?;

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({ "key": key.to_string(), "value": value }))?
        );
    } else {
        println!("{} = {}", key, value);
    }
    Ok(())
}
