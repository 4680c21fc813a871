//! Places CLI Library
//!
//! Batch tools for the CSV exports of Dutch address and place datasets.
//!
//! # Overview
//!
//! - **Deduplication**: Drop repeated rows from a file in place (`places dedup`)
//! - **Search**: Find records by postal code across a directory (`places search`)
//! - **Splitting**: Break a large file into header-carrying parts (`places split`)
//! - **Range expansion**: Turn `"2 t/m 4"` house numbers into rows (`places expand`)
//! - **Configuration**: Inspect effective settings (`places config`)
//!
//! Every transform takes a [`report::Reporter`], so the same code runs under
//! a progress spinner, plain `tracing`, or silently in tests.

pub mod atomic_writer;
pub mod commands;
pub mod config;
pub mod dedup;
pub mod error;
pub mod expand;
pub mod house_numbers;
pub mod progress;
pub mod report;
pub mod search;
pub mod split;

// Re-export commonly used types
pub use config::Config;
pub use error::{CliError, Result};
pub use report::{NullReporter, Reporter, TracingReporter};

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Places - CSV tooling for address and place datasets
#[derive(Parser, Debug)]
#[command(name = "places")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the CLI reference as markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove repeated rows from a CSV file in place
    Dedup {
        /// CSV file to deduplicate
        file: PathBuf,
    },

    /// Find records with a postal code in every CSV file of a directory
    Search {
        /// Directory containing the CSV files
        directory: PathBuf,

        /// Postal code to look for (exact, case-sensitive)
        postal_code: String,

        /// Column to compare (defaults to PLACES_POSTAL_COLUMN or postal_code)
        #[arg(short, long)]
        column: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Compact)]
        format: OutputFormat,
    },

    /// Split a CSV file into parts of at most N data rows
    Split {
        /// CSV file to split
        source: PathBuf,

        /// Directory receiving the parts
        #[arg(default_value = "./data_split")]
        output_dir: PathBuf,

        /// Maximum data rows per part (defaults to PLACES_MAX_ROWS or 250000)
        #[arg(short = 'n', long)]
        max_rows: Option<u64>,

        /// File-name prefix of the parts (defaults to PLACES_PART_PREFIX or part_)
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// Expand "<start> t/m <end>" house-number ranges into one row per number
    Expand {
        /// CSV file to read
        source: PathBuf,

        /// CSV file to write (may equal the source)
        destination: PathBuf,

        /// House-number column (defaults to PLACES_HOUSE_NUMBER_COLUMN or house_numbers)
        #[arg(short, long)]
        column: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,
}

/// Search output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per record
    Compact,
    /// Bordered table
    Table,
    /// JSON array
    Json,
}
