// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Scan Engine
 * Bounded dispatcher: semaphore-limited probe fan-out with a completion barrier
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::config::ScanConfig;
use crate::errors::{ScanError, ScanResult};
use crate::filter::MatchCriteria;
use crate::http_client::HttpClient;
use crate::output::ResultSink;
use crate::probe;
use crate::retry::{retry_with_backoff, RetryConfig};
use crate::targets;
use crate::types::ScanStats;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, error, info, warn};

enum TaskOutcome {
    Matched,
    Filtered,
    Failed,
}

/// Owns the shared pieces of one run and drives the probe fan-out.
pub struct ScanEngine {
    config: ScanConfig,
    criteria: Arc<MatchCriteria>,
    client: HttpClient,
    suffixes: Arc<Vec<String>>,
    sink: Arc<ResultSink>,
}

impl ScanEngine {
    /// Set up a run: client, suffix list and output file.
    ///
    /// Any failure here is fatal and happens before the first probe.
    pub async fn new(config: ScanConfig, criteria: MatchCriteria) -> ScanResult<Self> {
        let client = HttpClient::new(config.timeout)?;
        let suffixes = Arc::new(targets::load_path_suffixes(&config.path)?);
        let sink = Arc::new(ResultSink::create(&config.output).await?);

        Ok(Self {
            config,
            criteria: Arc::new(criteria),
            client,
            suffixes,
            sink,
        })
    }

    /// Cross the target stream with the suffix list and probe every pair.
    ///
    /// Targets arrive over a channel (see `targets::spawn_target_reader`) so
    /// blocking input never ties up a runtime worker. A semaphore permit is
    /// acquired before each task is spawned, so input consumption stalls
    /// while the ceiling is saturated and at most `concurrency` probes are
    /// ever in flight. The permit moves into the task and is released on
    /// every exit path. All tasks are awaited before returning; individual
    /// probe failures never abort the run, but an input stream read error is
    /// fatal once in-flight tasks have drained.
    pub async fn run(
        &self,
        mut target_lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
    ) -> ScanResult<ScanStats> {
        let ceiling = self.config.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(ceiling));
        let retry_config = RetryConfig {
            max_attempts: self.config.max_attempts,
            backoff_step: self.config.backoff_step,
        };

        info!(
            concurrency = ceiling,
            suffixes = self.suffixes.len(),
            "Starting probe run"
        );

        let mut handles = Vec::new();
        let mut input_error: Option<std::io::Error> = None;

        while let Some(target) = target_lines.recv().await {
            let target = match target {
                Ok(target) => target,
                Err(err) => {
                    error!(error = %err, "Failed to read target stream");
                    input_error = Some(err);
                    break;
                }
            };

            for suffix_idx in 0..self.suffixes.len() {
                let permit = Arc::clone(&semaphore)
                    .acquire_owned()
                    .await
                    .map_err(|e| ScanError::General(e.to_string()))?;

                let client = self.client.clone();
                let criteria = Arc::clone(&self.criteria);
                let suffixes = Arc::clone(&self.suffixes);
                let sink = Arc::clone(&self.sink);
                let retry_config = retry_config.clone();
                let target = target.clone();
                let port = self.config.port;

                handles.push(tokio::spawn(async move {
                    let _permit = permit;
                    let suffix = &suffixes[suffix_idx];
                    probe_task(&client, &retry_config, &criteria, &sink, &target, port, suffix)
                        .await
                }));
            }
        }

        // Completion barrier: output is not final until every task is done
        let mut stats = ScanStats::default();
        for handle in handles {
            stats.probed += 1;
            match handle.await {
                Ok(TaskOutcome::Matched) => stats.matched += 1,
                Ok(TaskOutcome::Filtered) => {}
                Ok(TaskOutcome::Failed) => stats.failed += 1,
                Err(err) => {
                    error!(error = %err, "Probe task panicked");
                    stats.failed += 1;
                }
            }
        }

        if let Some(err) = input_error {
            return Err(ScanError::Io(err));
        }

        info!(
            probed = stats.probed,
            matched = stats.matched,
            failed = stats.failed,
            "Probe run complete"
        );

        Ok(stats)
    }
}

async fn probe_task(
    client: &HttpClient,
    retry_config: &RetryConfig,
    criteria: &MatchCriteria,
    sink: &ResultSink,
    target: &str,
    port: u16,
    suffix: &str,
) -> TaskOutcome {
    let label = if suffix.is_empty() {
        target.to_string()
    } else {
        format!("{}{}", target, suffix)
    };

    let outcome = retry_with_backoff(retry_config, &label, || {
        probe::probe_pair(client, target, port, suffix)
    })
    .await;

    match outcome {
        Ok(result) => {
            if !criteria.is_reportable(&result) {
                debug!(target = %result.target, url = %result.url, "Result filtered");
                return TaskOutcome::Filtered;
            }

            match sink.write_record(&result).await {
                Ok(()) => {
                    debug!(target = %result.target, url = %result.url, "Result recorded");
                    TaskOutcome::Matched
                }
                Err(err) => {
                    error!(target = %result.target, error = %err, "Failed to write record");
                    TaskOutcome::Failed
                }
            }
        }
        Err(err) => {
            warn!(target = %target, suffix = %suffix, error = %err, "Probe failed, skipping");
            TaskOutcome::Failed
        }
    }
}
