//! Command line argument parsing for the Onoma CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Onoma - author-name query expansion
#[derive(Parser, Debug, Clone)]
#[command(name = "onoma")]
#[command(about = "Expand author-name queries across spellings, initials and synonyms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct OnomaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl OnomaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Expand an author name and print the resulting tokens and query
    Expand(ExpandArgs),

    /// Build a transliteration table from a file of indexed names
    Scan(ScanArgs),

    /// Check which indexed names an author query matches
    Match(MatchArgs),
}

/// Table overrides shared by the query commands.
#[derive(Parser, Debug, Clone, Default)]
pub struct TableArgs {
    /// Transliteration table file (JSON groups)
    #[arg(short = 't', long, value_name = "TABLE_FILE")]
    pub transliteration_table: Option<PathBuf>,

    /// Curated synonym file (JSON groups)
    #[arg(short = 's', long, value_name = "SYNONYM_FILE")]
    pub curated_synonyms: Option<PathBuf>,
}

/// Arguments for expanding a name
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Author name, e.g. "Ortiz, David A"
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Exact-match mode (no expansion)
    #[arg(long)]
    pub exact: bool,

    /// Query field; the exact field selects exact mode
    #[arg(long, conflicts_with = "exact")]
    pub field: Option<String>,

    /// Show the stream after every pipeline step
    #[arg(long)]
    pub trace: bool,

    #[command(flatten)]
    pub tables: TableArgs,
}

/// Arguments for scanning a corpus
#[derive(Parser, Debug, Clone)]
pub struct ScanArgs {
    /// File with one indexed author value per line
    #[arg(value_name = "VALUES_FILE")]
    pub input: PathBuf,

    /// Where to write the table (JSON groups); printed if omitted
    #[arg(short, long, value_name = "TABLE_FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for matching a name against indexed values
#[derive(Parser, Debug, Clone)]
pub struct MatchArgs {
    /// Author name to query for
    #[arg(value_name = "NAME")]
    pub name: String,

    /// File with one indexed author value per line
    #[arg(value_name = "VALUES_FILE")]
    pub values: PathBuf,

    /// Exact-match mode (no expansion)
    #[arg(long)]
    pub exact: bool,

    /// Rebuild the transliteration table from VALUES_FILE before matching
    #[arg(long)]
    pub scan: bool,

    #[command(flatten)]
    pub tables: TableArgs,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
