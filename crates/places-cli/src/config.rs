//! Configuration management for the places CLI
//!
//! Defaults for the tunable column names and split settings. Environment
//! variables override the defaults; command-line flags override both.

use crate::error::{CliError, Result};
use crate::expand::DEFAULT_HOUSE_NUMBER_COLUMN;
use crate::search::DEFAULT_SEARCH_COLUMN;
use crate::split::{DEFAULT_MAX_ROWS, DEFAULT_PART_PREFIX};

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_MAX_ROWS: &str = "PLACES_MAX_ROWS";
pub const ENV_PART_PREFIX: &str = "PLACES_PART_PREFIX";
pub const ENV_POSTAL_COLUMN: &str = "PLACES_POSTAL_COLUMN";
pub const ENV_HOUSE_NUMBER_COLUMN: &str = "PLACES_HOUSE_NUMBER_COLUMN";

/// Every key accepted by `places config get`
pub const KEYS: &[&str] = &["max_rows", "part_prefix", "postal_column", "house_number_column"];

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum data rows per split partition
    pub max_rows: u64,

    /// File-name prefix of split partitions
    pub part_prefix: String,

    /// Column compared by `search`
    pub postal_column: String,

    /// Column rewritten by `expand`
    pub house_number_column: String,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self {
            max_rows: DEFAULT_MAX_ROWS,
            part_prefix: DEFAULT_PART_PREFIX.to_string(),
            postal_column: DEFAULT_SEARCH_COLUMN.to_string(),
            house_number_column: DEFAULT_HOUSE_NUMBER_COLUMN.to_string(),
        }
    }

    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();

        if let Ok(rows) = std::env::var(ENV_MAX_ROWS) {
            config.max_rows = rows.trim().parse().map_err(|_| {
                CliError::config(format!("{ENV_MAX_ROWS} must be a positive integer, got '{rows}'"))
            })?;
        }

        if let Ok(prefix) = std::env::var(ENV_PART_PREFIX) {
            config.part_prefix = prefix;
        }

        if let Ok(column) = std::env::var(ENV_POSTAL_COLUMN) {
            config.postal_column = column;
        }

        if let Ok(column) = std::env::var(ENV_HOUSE_NUMBER_COLUMN) {
            config.house_number_column = column;
        }

        Ok(config)
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "max_rows" => Ok(self.max_rows.to_string()),
            "part_prefix" => Ok(self.part_prefix.clone()),
            "postal_column" => Ok(self.postal_column.clone()),
            "house_number_column" => Ok(self.house_number_column.clone()),
            _ => Err(CliError::config(format!(
                "Unknown config key: {key} (expected one of: {})",
                KEYS.join(", ")
            ))),
        }
    }

    /// Environment variable backing `key`
    pub fn env_var(key: &str) -> Option<&'static str> {
        match key {
            "max_rows" => Some(ENV_MAX_ROWS),
            "part_prefix" => Some(ENV_PART_PREFIX),
            "postal_column" => Some(ENV_POSTAL_COLUMN),
            "house_number_column" => Some(ENV_HOUSE_NUMBER_COLUMN),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
