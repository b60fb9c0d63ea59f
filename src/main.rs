//! Marginalia CLI - comment-preserving settings files
//!
//! Usage: marginalia <COMMAND>
//!
//! Commands:
//!   fmt    Re-render a settings file with normalized comments
//!   get    Print a value as JSON
//!   set    Set a value, optionally with a comment
//!   docs   List the JSON documents in a directory
//!   init   Create a settings file or add missing built-in settings

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Fmt { file, style, check } => commands::cmd_fmt(&file, style, check, cli.json),
        Commands::Get { file, key } => commands::cmd_get(&file, &key),
        Commands::Set {
            file,
            key,
            value,
            comments,
        } => commands::cmd_set(&file, &key, &value, &comments, cli.json),
        Commands::Docs { dir, data_dir } => commands::cmd_docs(&dir, data_dir, cli.json),
        Commands::Init { file, data_dir } => {
            commands::cmd_init(file.as_deref(), data_dir, cli.json)
        }
    }
}
