// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Haavi
 * Concurrent HTTP banner and title prober
 *
 * Reads targets from stdin, probes each over HTTPS then HTTP, and records
 * results matching the configured banner/title/header filters.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use haavi::config::ScanConfig;
use haavi::engine::ScanEngine;
use haavi::filter::MatchCriteria;
use haavi::targets::spawn_target_reader;

/// Haavi - Concurrent HTTP banner and title prober
#[derive(Parser)]
#[command(name = "haavi")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version)]
#[command(about = "Probe hosts from stdin and record matching banners and titles", long_about = None)]
struct Cli {
    /// String to search for within response headers
    #[arg(short = 'b', long = "banner", default_value = "")]
    banner: String,

    /// String to search for within the page title
    #[arg(long = "title", default_value = "")]
    title: String,

    /// Port number for bare host targets (ignored for full URLs)
    #[arg(short = 'p', long = "port", default_value_t = 80)]
    port: u16,

    /// Output file
    #[arg(short = 'o', long = "output", default_value = "output.txt")]
    output: PathBuf,

    /// Number of concurrent probes
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,

    /// URL path suffix to probe, or a file with one suffix per line
    #[arg(long = "path", default_value = "")]
    path: String,

    /// Response header to filter on
    #[arg(long = "header-key", default_value = "")]
    header_key: String,

    /// Substring required in the filtered header's value
    #[arg(long = "header-value", default_value = "")]
    header_value: String,

    /// Per-request timeout in seconds
    #[arg(long = "timeout", default_value_t = 10)]
    timeout: u64,

    /// Attempts per target/path pair
    #[arg(long = "retries", default_value_t = 3)]
    retries: u32,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Diagnostics go to stderr; the result stream is the output file
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ScanConfig {
        port: cli.port,
        output: cli.output,
        concurrency: cli.threads.max(1),
        path: cli.path,
        timeout: Duration::from_secs(cli.timeout),
        max_attempts: cli.retries.max(1),
        backoff_step: Duration::from_secs(1),
    };

    let criteria = MatchCriteria {
        banner: cli.banner,
        title: cli.title,
        header_key: cli.header_key,
        header_value: cli.header_value,
    };

    let engine = ScanEngine::new(config, criteria).await?;

    let started = Instant::now();
    let targets = spawn_target_reader(std::io::BufReader::new(std::io::stdin()));
    let stats = engine.run(targets).await?;

    info!(
        probed = stats.probed,
        matched = stats.matched,
        failed = stats.failed,
        elapsed_secs = started.elapsed().as_secs_f64(),
        "Done"
    );

    Ok(())
}
