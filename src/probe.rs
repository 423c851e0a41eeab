// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fetch With Fallback
 * URL resolution, HTTPS-then-HTTP probing, 200-only capture
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{ScanError, ScanResult};
use crate::http_client::HttpClient;
use crate::response;
use crate::types::ProbeResult;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

/// How a target line maps onto probe URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// The target already carries a scheme; there is no meaningful fallback.
    Absolute { url: String, display: String },

    /// Bare host or IP: try HTTPS first, fall back to plain HTTP.
    HostPort {
        https_url: String,
        http_url: String,
        display: String,
    },
}

/// Resolve a target line and path suffix into concrete probe URLs.
pub fn resolve_target(target: &str, port: u16, suffix: &str) -> ResolvedTarget {
    if let Ok(parsed) = Url::parse(target) {
        if matches!(parsed.scheme(), "http" | "https") {
            let base = target.strip_suffix('/').unwrap_or(target);
            return ResolvedTarget::Absolute {
                url: format!("{}{}", base, suffix),
                display: target.to_string(),
            };
        }
    }

    ResolvedTarget::HostPort {
        https_url: format!("https://{}:{}{}", target, port, suffix),
        http_url: format!("http://{}:{}{}", target, port, suffix),
        display: format!("{}:{}", target, port),
    }
}

/// Probe one (target, path) pair once, spanning both schemes where allowed.
///
/// HTTPS is attempted first; any error, timeout or non-200 status triggers a
/// single plain-HTTP attempt. Targets that are already absolute URLs never
/// switch scheme. The error surfaced on total failure is the one from the
/// last attempt made.
pub async fn probe_pair(
    client: &HttpClient,
    target: &str,
    port: u16,
    suffix: &str,
) -> ScanResult<ProbeResult> {
    // Bound as `label`: tracing's `%` shorthand expands through a `display`
    // helper that a local of that name would shadow.
    match resolve_target(target, port, suffix) {
        ResolvedTarget::Absolute {
            url,
            display: label,
        } => fetch_and_capture(client, &label, &url).await,
        ResolvedTarget::HostPort {
            https_url,
            http_url,
            display: label,
        } => match fetch_and_capture(client, &label, &https_url).await {
            Ok(result) => Ok(result),
            Err(err) => {
                debug!(
                    target = %label,
                    error = %err,
                    "HTTPS attempt failed, falling back to HTTP"
                );
                fetch_and_capture(client, &label, &http_url).await
            }
        },
    }
}

/// Fetch one URL and capture headers plus streamed title.
///
/// Only a final status of exactly 200 is usable; anything else is reported
/// as a fetch failure so the caller's fallback and retry machinery engage.
async fn fetch_and_capture(
    client: &HttpClient,
    display: &str,
    url: &str,
) -> ScanResult<ProbeResult> {
    let resp = client.get(url).await?;

    if resp.status() != StatusCode::OK {
        return Err(ScanError::UnexpectedStatus {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    response::capture(display, url, resp).await
}
