// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Target and Path Sources
 * Line-oriented target stream plus path suffix resolution
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::ScanResult;
use std::fs;
use std::io::BufRead;
use std::path::Path;
use tokio::sync::mpsc;

/// Lazy target iterator over a line-oriented input stream.
///
/// Yields trimmed, non-empty lines; read errors are passed through so the
/// engine can abort the run. The input is consumed exactly once per run.
pub fn read_targets<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader.lines().filter_map(|line| match line {
        Ok(line) => {
            let line = line.trim().to_string();
            if line.is_empty() {
                None
            } else {
                Some(Ok(line))
            }
        }
        Err(err) => Some(Err(err)),
    })
}

/// Drain a blocking line reader on a dedicated worker.
///
/// Stdin reads block, so they must not run on a runtime worker thread; the
/// reader is drained on a blocking task and lines reach the engine over the
/// returned channel. The worker stops when the input ends or the receiver
/// is dropped.
pub fn spawn_target_reader<R>(reader: R) -> mpsc::UnboundedReceiver<std::io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        for line in read_targets(reader) {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Resolve the configured path value into the suffix list for this run.
///
/// When the value names an existing regular file it is read as one suffix per
/// line (trimmed, blanks dropped); any read failure there is fatal since it
/// happens before probing starts. Otherwise the value itself is the single
/// suffix, the empty string meaning "probe the root".
pub fn load_path_suffixes(path: &str) -> ScanResult<Vec<String>> {
    if !path.is_empty() && Path::new(path).is_file() {
        let contents = fs::read_to_string(path)?;
        let suffixes = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        return Ok(suffixes);
    }

    Ok(vec![path.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;

    #[test]
    fn test_read_targets_skips_blank_lines() {
        let input = Cursor::new("10.0.0.1\n\n  \nexample.com  \n");
        let targets: Vec<String> = read_targets(input).map(Result::unwrap).collect();
        assert_eq!(targets, vec!["10.0.0.1", "example.com"]);
    }

    #[tokio::test]
    async fn test_spawned_reader_delivers_trimmed_lines() {
        let mut rx = spawn_target_reader(Cursor::new("10.0.0.1\n\n  example.com \n"));
        assert_eq!(rx.recv().await.unwrap().unwrap(), "10.0.0.1");
        assert_eq!(rx.recv().await.unwrap().unwrap(), "example.com");
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_literal_suffix_passes_through() {
        assert_eq!(load_path_suffixes("/admin").unwrap(), vec!["/admin"]);
        assert_eq!(load_path_suffixes("").unwrap(), vec![""]);
    }

    #[test]
    fn test_suffix_file_yields_trimmed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/admin").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  /login ").unwrap();
        file.flush().unwrap();

        let suffixes = load_path_suffixes(file.path().to_str().unwrap()).unwrap();
        assert_eq!(suffixes, vec!["/admin", "/login"]);
    }
}
