// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe Types
 * Shared value types produced and consumed by the probe pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

/// Captured outcome of one successful probe.
///
/// Transient: produced by the response processor, consumed by the match
/// filter and result sink within the same task, then dropped.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Display identifier for the target ("host:port" or the raw URL target)
    pub target: String,

    /// URL the successful attempt was sent to
    pub url: String,

    /// Final HTTP status code (always 200 for recorded results)
    pub status: u16,

    /// Protocol line plus one "Key: Value" line per header, blank-line terminated
    pub header_block: String,

    /// Flat header list in response order, repeated names preserved
    pub headers: Vec<(String, String)>,

    /// Trimmed text of the first `<title>` with content, empty if none
    pub title: String,
}

impl ProbeResult {
    /// Look up a response header by name, case-insensitively.
    ///
    /// Returns the first value when the header is repeated.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// (target, path) pairs dispatched
    pub probed: usize,

    /// Results that passed the match filter and were written
    pub matched: usize,

    /// Pairs that exhausted their retry budget or failed to write
    pub failed: usize,
}
