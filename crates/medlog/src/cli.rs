use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medlog")]
#[command(version)]
#[command(about = "Capture medicine notes and structure them into records")]
pub struct Cli {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "MEDLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// User whose data to work on
    #[arg(long, global = true, default_value = "default")]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a raw entry
    Add { text: String },

    /// List raw entries, newest first
    List,

    /// Replace the text of a raw entry
    Edit { id: i64, text: String },

    /// Delete a raw entry
    Delete { id: i64 },

    /// Remove all raw entries
    Clear {
        /// Clear structured records instead
        #[arg(long)]
        structured: bool,
    },

    /// Replace the list from a JSON grid snapshot
    Grid {
        file: PathBuf,

        /// The snapshot holds structured records
        #[arg(long)]
        structured: bool,
    },

    /// Structure all raw entries into records
    Parse {
        /// Keep existing records instead of replacing them
        #[arg(long)]
        append: bool,
    },

    /// Show structured records
    Records {
        /// Drug name substring, case-insensitive
        #[arg(long)]
        drug: Option<String>,

        /// Expiring on or before this date
        #[arg(long)]
        before: Option<String>,

        /// Expiring on or after this date
        #[arg(long)]
        after: Option<String>,

        #[arg(long, value_enum)]
        sort: Option<SortKey>,

        #[arg(long)]
        desc: bool,
    },

    /// Field fill statistics for structured records
    Stats,

    /// Export raw entries as text, or records as CSV
    Export {
        #[arg(long)]
        structured: bool,

        /// Output directory (defaults to `exports` under the data directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete data files older than the retention window
    Cleanup {
        /// Retention window in days (defaults to the configured value)
        #[arg(long)]
        days: Option<u64>,
    },

    /// Print version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    Name,
    Expiry,
}
