// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Result Sink
 * Serialized, flush-per-record writer for matching probe results
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::ScanResult;
use crate::types::ProbeResult;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;

/// Concurrency-safe append sink for the result file.
///
/// Records are formatted in full before the lock is taken; the write and the
/// flush happen under one mutex guard so concurrent tasks can never
/// interleave partial records, and an interrupted run leaves only complete
/// records on disk.
pub struct ResultSink {
    writer: Mutex<BufWriter<File>>,
}

impl ResultSink {
    /// Create (truncating) the output file. Failure here is fatal.
    pub async fn create(path: &Path) -> ScanResult<Self> {
        let file = File::create(path).await?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append one record and flush it.
    pub async fn write_record(&self, result: &ProbeResult) -> ScanResult<()> {
        let record = format_record(result);
        let mut writer = self.writer.lock().await;
        writer.write_all(record.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

/// Render one output record.
///
/// Layout is a stable contract consumed by the extract companion: the first
/// line is "target, url", then the header block (which ends in a blank
/// line), a blank line, the "Title: " line, and a blank separator line.
pub fn format_record(result: &ProbeResult) -> String {
    format!(
        "{}, {}\n{}\nTitle: {}\n\n",
        result.target, result.url, result.header_block, result.title
    )
}
