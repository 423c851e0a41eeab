// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Match Filter
 * Banner, title and header predicates over captured probe results
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::ProbeResult;

/// Substrings that mark a 200 response as an error page in disguise
const NOT_FOUND_MARKERS: [&str; 2] = ["Not Found", "404"];

/// Read-only match configuration, fixed at startup.
///
/// An empty string on any axis means "match unconditionally" for that axis.
#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    /// Substring required in the header block
    pub banner: String,

    /// Substring required in the page title
    pub title: String,

    /// Response header whose value is filtered (empty = no header filter)
    pub header_key: String,

    /// Substring required in the named header's value
    pub header_value: String,
}

impl MatchCriteria {
    /// Decide whether a captured result belongs in the output file.
    pub fn is_reportable(&self, result: &ProbeResult) -> bool {
        // Soft-404 pages are suppressed no matter what the filters say
        if looks_not_found(result) {
            return false;
        }

        let banner_ok = self.banner.is_empty() || result.header_block.contains(&self.banner);
        let title_ok = self.title.is_empty() || result.title.contains(&self.title);
        let header_ok = self.header_key.is_empty()
            || result
                .header(&self.header_key)
                .is_some_and(|value| value.contains(&self.header_value));

        // The second clause restates the first when banner and title are
        // unset; it is kept explicit to pin the historical behavior.
        (banner_ok && title_ok && header_ok)
            || (self.banner.is_empty() && self.title.is_empty() && header_ok)
    }
}

fn looks_not_found(result: &ProbeResult) -> bool {
    NOT_FOUND_MARKERS
        .iter()
        .any(|marker| result.title.contains(marker) || result.header_block.contains(marker))
}
