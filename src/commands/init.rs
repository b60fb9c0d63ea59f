use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use marginalia::{
    BuiltinsOnly, LoadOutcome, SettingsExtension, SettingsLayer, YamlDocument, DEFAULT_TEMPLATE,
};

use super::data_root;

/// Run the settings layering protocol with only the built-in settings.
///
/// Without `file`, the settings file lives in the data directory.
pub fn cmd_init(file: Option<&Path>, data_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let mut layer = SettingsLayer::new();
    let (path, loaded) = match file {
        Some(file) => {
            let document = YamlDocument::new(file).with_template(DEFAULT_TEMPLATE);
            let loaded = layer.load_settings(Box::new(document), &mut BuiltinsOnly);
            (file.to_path_buf(), loaded)
        }
        None => {
            let root = data_root(data_dir);
            let loaded = layer.load_from(&root, &mut BuiltinsOnly);
            (root.resolve(BuiltinsOnly.file_name()), loaded)
        }
    };

    let outcome =
        loaded.with_context(|| format!("Failed to load settings from {}", path.display()))?;
    if let LoadOutcome::PersistFailed(e) = outcome {
        return Err(e).with_context(|| format!("Failed to save {}", path.display()));
    }

    let locale = layer
        .builtins()
        .map(|builtins| builtins.locale().to_string())
        .unwrap_or_default();

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "file": path.display().to_string(),
                "locale": locale,
            }))?
        );
    } else {
        println!("Settings written to {}", path.display());
        println!("Locale: {}", locale);
    }
    Ok(())
}
