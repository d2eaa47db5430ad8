//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Logsift - Reduce repetitive build logs to one line per pattern.
#[derive(Debug, Parser)]
#[command(name = "logsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LOGSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logging and oracle profiling on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (line and text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the first occurrence of every log pattern
    Extract(ExtractArgs),

    /// Print how a log is split into entries
    Chunks(ChunksArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Log files to read; `-` or nothing reads stdin
    pub files: Vec<String>,

    /// Maximum number of distinct patterns per log
    #[arg(short = 'n', long)]
    pub max_clusters: Option<usize>,

    /// Use the exhaustive preset (near-complete enumeration of distinct lines)
    #[arg(long, conflicts_with = "max_clusters")]
    pub exhaustive: bool,

    /// Share learned patterns across all files (processed in order)
    #[arg(long)]
    pub shared: bool,

    /// Print chunks exactly as they appear, surrounding whitespace included
    #[arg(long)]
    pub no_trim: bool,
}

/// Arguments for the chunks command.
#[derive(Debug, Parser)]
pub struct ChunksArgs {
    /// Log file to read; `-` or nothing reads stdin
    pub file: Option<String>,
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

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
