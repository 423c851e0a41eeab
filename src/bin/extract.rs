// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Extract Companion Binary
 * Filters a prober result file down to a bare target list
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "extract")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Extract target identifiers from a haavi result file", long_about = None)]
struct Cli {
    /// Result file produced by haavi
    input: PathBuf,

    /// Target list to append to
    #[arg(short, long, default_value = "extract-output.txt")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let input = File::open(&cli.input)
        .with_context(|| format!("Failed to open input file {}", cli.input.display()))?;

    let mut output = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.output)
        .with_context(|| format!("Failed to open output file {}", cli.output.display()))?;

    let count = haavi::extract::extract_targets(BufReader::new(input), &mut output)
        .context("Failed to extract targets")?;

    eprintln!("Extracted {} targets to {}", count, cli.output.display());

    Ok(())
}
