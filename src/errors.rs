// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Prober Error Types
 * Production-ready error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Main prober error type
#[derive(Error, Debug)]
pub enum ScanError {
    /// Connection-level failures (refused, reset, TLS, DNS)
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Per-request timeout elapsed
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The probe reached the server but did not get a usable response
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Target line that cannot be turned into a probe URL
    #[error("Invalid target: {target}")]
    InvalidTarget { target: String },

    /// Fatal I/O errors (output file, suffix list, input stream)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors
    #[error("Prober error: {0}")]
    General(String),
}

impl ScanError {
    /// Check if error is retryable
    ///
    /// Network failures, timeouts and unexpected statuses are transient from
    /// the probe's point of view; I/O and target-shape errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ScanError::Network { .. } => true,
            ScanError::Timeout { .. } => true,
            ScanError::UnexpectedStatus { .. } => true,
            ScanError::InvalidTarget { .. } => false,
            ScanError::Io(_) => false,
            ScanError::General(_) => false,
        }
    }
}

/// Convert reqwest errors to our error types
impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();

        if err.is_timeout() {
            ScanError::Timeout { url }
        } else if err.is_connect() || err.is_request() {
            ScanError::Network {
                url,
                message: err.to_string(),
            }
        } else {
            ScanError::General(err.to_string())
        }
    }
}

/// Result type for prober operations
pub type ScanResult<T> = Result<T, ScanError>;
