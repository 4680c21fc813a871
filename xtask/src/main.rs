//! Build automation tasks for places
//!
//! - Generating the CLI reference from the clap definitions
//! - Checking that the committed reference is up to date

use anyhow::{bail, Context};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

const REFERENCE_FILE: &str = "cli-reference.md";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for places", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate CLI documentation in markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,

        /// Fail instead of writing when the committed file is stale
        #[arg(long)]
        check: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir, check } => generate_cli_docs(&output_dir, check)?,
    }

    Ok(())
}

fn render_reference() -> String {
    let markdown = clap_markdown::help_markdown::<places_cli::Cli>();

    format!(
        r#"# places CLI Reference

This documentation is auto-generated from the CLI source code.

## Overview

`places` is a set of batch tools for CSV exports of address and place
datasets: deduplicate a file in place, search a directory by postal code,
split a large file into header-carrying parts, and expand
`"<start> t/m <end>"` house-number ranges into one row per number.

## Installation

```bash
cargo install --path crates/places-cli
```

## Quick Start

```bash
# Drop repeated rows
places dedup adressen.csv

# Find every record with a postal code
places search ./exports 6369CW --format table

# Split into parts of 100000 data rows
places split adressen.csv ./data_split --max-rows 100000

# One row per house number
places expand adressen.csv adressen_expanded.csv
```

## Commands

{markdown}

## Environment Variables

- `PLACES_MAX_ROWS` - Rows per split part (default: `250000`)
- `PLACES_PART_PREFIX` - Split part file-name prefix (default: `part_`)
- `PLACES_POSTAL_COLUMN` - Column compared by `search` (default: `postal_code`)
- `PLACES_HOUSE_NUMBER_COLUMN` - Column rewritten by `expand` (default: `house_numbers`)
- `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`, `LOG_FILTER` - Logging (written to stderr)

A `.env` file in the working directory is loaded on startup.

---

*To update, run `cargo xtask generate-cli-docs`.*
"#
    )
}

fn generate_cli_docs(output_dir: &str, check: bool) -> anyhow::Result<()> {
    let content = render_reference();
    let output_path = PathBuf::from(output_dir);
    let file_path = output_path.join(REFERENCE_FILE);

    if check {
        return check_reference(&file_path, &content);
    }

    println!("Generating CLI documentation...");

    fs::create_dir_all(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {}", file_path.display()))?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());
    Ok(())
}

fn check_reference(file_path: &Path, expected: &str) -> anyhow::Result<()> {
    let current = fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    if current != expected {
        bail!(
            "{} is out of date; run `cargo xtask generate-cli-docs`",
            file_path.display()
        );
    }

    println!("✅ {} is up to date", file_path.display());
    Ok(())
}
