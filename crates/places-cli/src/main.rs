//! Places CLI - Main entry point

use clap::Parser;
use places_cli::split::SplitOptions;
use places_cli::{Cli, Commands, Config, ConfigCommand};
use places_common::logging::{init_logging, LogConfig, LogOutput};
use std::process;
use tracing::{error, Level};

fn main() {
    // Load .env before clap and the config read the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    // Warnings only by default, debug with -v; LOG_* variables win
    let log_config = LogConfig::builder()
        .level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .output(LogOutput::Console)
        .log_file_prefix("places-cli")
        .build();
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // CLI should work without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute_command(&cli) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
fn execute_command(cli: &Cli) -> places_cli::Result<()> {
    let Some(ref command) = cli.command else {
        return Ok(());
    };

    match command {
        Commands::Dedup { file } => places_cli::commands::dedup::run(file, cli.verbose),

        Commands::Search {
            directory,
            postal_code,
            column,
            format,
        } => {
            let config = Config::from_env()?;
            places_cli::commands::search::run(
                directory,
                postal_code.clone(),
                column.clone().unwrap_or(config.postal_column),
                *format,
                cli.verbose,
            )
        },

        Commands::Split {
            source,
            output_dir,
            max_rows,
            prefix,
        } => {
            let config = Config::from_env()?;
            let options = SplitOptions::default()
                .max_rows(max_rows.unwrap_or(config.max_rows))
                .prefix(prefix.clone().unwrap_or(config.part_prefix));
            places_cli::commands::split::run(source, output_dir, options, cli.verbose)
        },

        Commands::Expand {
            source,
            destination,
            column,
        } => {
            let config = Config::from_env()?;
            places_cli::commands::expand::run(
                source,
                destination,
                column.clone().unwrap_or(config.house_number_column),
                cli.verbose,
            )
        },

        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => places_cli::commands::config::get(key),
            ConfigCommand::Show => places_cli::commands::config::show(),
        },
    }
}
