//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Rixflat - Flatten RIXML research metadata into tabular rows.
#[derive(Debug, Parser)]
#[command(name = "rixflat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RIXFLAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// CSV with a header row (default)
    Csv,
    /// JSON array of row objects
    Json,
    /// Terminal table
    Table,
    /// Summary only
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse every document in a directory into rows
    Parse(ParseArgs),

    /// Parse one document and show its metadata and issuers
    Inspect(InspectArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Directory containing the documents
    pub dir: PathBuf,

    /// Write CSV to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// File extension to accept (case-insensitive)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Maximum concurrent documents (0 = available parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Only accept price targets and ratings flagged Current
    #[arg(long)]
    pub strict_current: bool,
}

/// Arguments for the inspect command.
#[derive(Debug, Parser)]
pub struct InspectArgs {
    /// Document to parse
    pub file: PathBuf,

    /// Only accept price targets and ratings flagged Current
    #[arg(long)]
    pub strict_current: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Csv => crate::config::OutputFormat::Csv,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
