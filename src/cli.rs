use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marginalia::CommentStyle;

/// Marginalia - comment-preserving settings files
#[derive(Parser, Debug)]
#[command(name = "marginalia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for scripts
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-render a settings file with normalized comments
    Fmt {
        /// Settings file to format
        file: PathBuf,

        /// Render every comment in this style
        #[arg(long, value_enum)]
        style: Option<CommentStyle>,

        /// Exit non-zero if the file would change, without writing
        #[arg(long)]
        check: bool,
    },

    /// Print a value as JSON
    Get {
        /// Settings file to read
        file: PathBuf,

        /// Dot-delimited key path (e.g. Settings.Locale)
        key: String,
    },

    /// Set a value, optionally with a comment
    Set {
        /// Settings file to update
        file: PathBuf,

        /// Dot-delimited key path (e.g. Settings.Locale)
        key: String,

        /// Value, parsed as a scalar (`true`, `3`, `"text"`, `[a, b]`)
        value: String,

        /// Comment line to attach to the key (repeatable)
        #[arg(long = "comment", value_name = "LINE")]
        comments: Vec<String>,
    },

    /// List the JSON documents in a directory
    Docs {
        /// Directory, relative to the data directory
        dir: PathBuf,

        /// Data directory (defaults to MARGINALIA_DATA_DIR or the platform data dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Create a settings file or add missing built-in settings to it
    Init {
        /// Settings file to create or augment (defaults to config.yml in the data directory)
        file: Option<PathBuf>,

        /// Data directory (defaults to MARGINALIA_DATA_DIR or the platform data dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}
