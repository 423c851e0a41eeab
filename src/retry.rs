// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Retry Logic with Linear Backoff
 * Bounded retry wrapper for whole probe attempts
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{ScanError, ScanResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration with linear backoff
///
/// The wait grows with the attempt index: nothing before the first attempt,
/// then `backoff_step`, then twice the step, and so on. Deterministic on
/// purpose so total elapsed time per pair stays predictable.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (not retries), minimum 1
    pub max_attempts: u32,

    /// Backoff increment between consecutive attempts
    pub backoff_step: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Backoff to wait after `failed_attempts` attempts have failed.
    pub fn backoff_for(&self, failed_attempts: u32) -> Duration {
        self.backoff_step * failed_attempts
    }
}

/// Retry a future with linear backoff
///
/// Non-retryable errors abort immediately; retryable ones are retried until
/// the attempt budget is exhausted, at which point the last error is
/// returned.
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> ScanResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ScanResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    let mut last_error: Option<ScanError> = None;

    while attempt < max_attempts {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(
                        attempt = attempt,
                        operation = operation_name,
                        "Operation succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => {
                let is_retryable = err.is_retryable();

                warn!(
                    attempt = attempt,
                    max_attempts = max_attempts,
                    operation = operation_name,
                    error = %err,
                    retryable = is_retryable,
                    "Operation failed"
                );

                if !is_retryable {
                    return Err(err);
                }

                last_error = Some(err);

                if attempt < max_attempts {
                    let backoff = config.backoff_for(attempt);

                    debug!(
                        attempt = attempt,
                        backoff_ms = backoff.as_millis(),
                        operation = operation_name,
                        "Backing off before retry"
                    );

                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ScanError::General(format!(
            "Operation '{}' failed after {} attempts",
            operation_name, max_attempts
        ))
    }))
}
