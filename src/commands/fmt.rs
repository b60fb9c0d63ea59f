use std::path::Path;

use anyhow::{bail, Context, Result};
use marginalia::infrastructure::{atomic_write, read_optional};
use marginalia::{CommentStyle, YamlDocument};

pub fn cmd_fmt(file: &Path, style: Option<CommentStyle>, check: bool, json: bool) -> Result<()> {
    let Some(original) = read_optional(file)? else {
        bail!("{} does not exist", file.display());
    };

    let mut document = YamlDocument::from_text(file, &original)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    if let Some(style) = style {
        document.restyle(style)?;
    }
    let formatted = document.to_text()?;
    let changed = formatted != original;

    if check {
        report(file, changed, "would reformat", json)?;
        if changed {
            std::process::exit(1);
        }
        return Ok(());
    }

    if changed {
        atomic_write(file, formatted.as_bytes())
            .with_context(|| format!("Failed to write {}", file.display()))?;
    }
    report(file, changed, "formatted", json)
}

fn report(file: &Path, changed: bool, verb: &str, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "file": file.display().to_string(),
                "changed": changed,
            }))?
        );
    } else if changed {
        println!("{} {}", verb, file.display());
    } else {
        println!("{} already formatted", file.display());
    }
    Ok(())
}
