//! `places config` command implementation
//!
//! Shows the effective configuration.

use crate::config::{Config, KEYS};
use crate::error::Result;
use colored::Colorize;

/// Get configuration value
pub fn get(key: &str) -> Result<()> {
    let config = Config::from_env()?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Show all configuration
pub fn show() -> Result<()> {
    let config = Config::from_env()?;

    println!("{}", "Places CLI Configuration:".cyan().bold());
    println!();
    for key in KEYS {
        println!("{:<22} {}", format!("{}:", key), config.get(key)?);
    }
    println!();
    println!("{}", "Environment Variables:".cyan());
    for key in KEYS {
        if let Some(var) = Config::env_var(key) {
            println!("  {:<28} - {}", var, key);
        }
    }

    Ok(())
}
