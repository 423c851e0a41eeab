// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Result File Extractor
 * Pulls target identifiers back out of a prober result file
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::io::{self, BufRead, Write};

/// Marker identifying the record head line of an HTTP result
const RECORD_MARKER: &str = ", http://";

/// Copy the target identifier of every matching record line to `out`.
///
/// The result file is treated as an opaque line-oriented format: any line
/// containing ", http://" contributes everything left of its first comma.
/// Returns the number of extracted targets.
pub fn extract_targets<R: BufRead, W: Write>(input: R, out: &mut W) -> io::Result<usize> {
    let mut count = 0;

    for line in input.lines() {
        let line = line?;
        if line.contains(RECORD_MARKER) {
            let target = line.split(',').next().unwrap_or("");
            writeln!(out, "{}", target)?;
            count += 1;
        }
    }

    out.flush()?;
    Ok(count)
}
