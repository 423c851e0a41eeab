// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTTP Client
 * Shared reqwest client tuned for reachability probing
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{ScanError, ScanResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("haavi/", env!("CARGO_PKG_VERSION"));

/// Maximum redirect hops per attempt
const MAX_REDIRECTS: usize = 5;

#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Build the shared client used by every probe task.
    ///
    /// Certificate validation is disabled: the point of a banner sweep is to
    /// reach hosts with self-signed, expired or mismatched certificates, and
    /// nothing sensitive is sent. Each attempt is bounded by `timeout`.
    pub fn new(timeout: Duration) -> ScanResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ScanError::General(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Send a GET request; the response body has not been consumed yet.
    pub async fn get(&self, url: &str) -> ScanResult<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        Ok(response)
    }
}
