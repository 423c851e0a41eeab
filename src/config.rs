// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Run Configuration
 * Immutable configuration assembled once at startup
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::path::PathBuf;
use std::time::Duration;

/// Run-wide configuration, fixed after CLI parsing.
///
/// Built once in main and handed to the engine by value; probe tasks only
/// ever see shared references, so there is no mutable global state.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Port appended to bare host targets (ignored for absolute URLs)
    pub port: u16,

    /// Result file, created (truncating) at run start
    pub output: PathBuf,

    /// Maximum number of probes in flight, minimum 1
    pub concurrency: usize,

    /// URL path suffix, or the path of a file holding one suffix per line
    pub path: String,

    /// Per-request timeout for each HTTPS/HTTP attempt
    pub timeout: Duration,

    /// Attempts per (target, path) pair before giving up
    pub max_attempts: u32,

    /// Linear backoff step between attempts
    pub backoff_step: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            port: 80,
            output: PathBuf::from("output.txt"),
            concurrency: 1,
            path: String::new(),
            timeout: Duration::from_secs(10),
            max_attempts: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}
