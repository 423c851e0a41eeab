// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Response Processor
 * Header block assembly and streaming HTML title extraction
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::{ScanError, ScanResult};
use crate::types::ProbeResult;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use reqwest::header::HeaderMap;
use reqwest::{Response, Version};
use tokio::sync::mpsc;
use tokio::task;

/// Consume a live 200 response into a ProbeResult.
///
/// Headers are captured up front; the body is then streamed through the
/// title scanner chunk by chunk and reading stops as soon as a title has
/// been found, so the body is never buffered in full.
pub async fn capture(display: &str, url: &str, mut resp: Response) -> ScanResult<ProbeResult> {
    let status = resp.status().as_u16();
    let header_block = format_header_block(resp.version(), resp.headers());
    let headers = flatten_headers(resp.headers());

    // The tokenizer's tendrils are not Send, so the scanner lives on a
    // blocking worker and body chunks reach it over a bounded channel. Once
    // a title is captured the worker drops its receiver, the next send
    // fails, and the body read stops early.
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(8);
    let scan = task::spawn_blocking(move || {
        let mut scanner = TitleScanner::new();
        while let Some(chunk) = rx.blocking_recv() {
            if scanner.push(&chunk) {
                break;
            }
        }
        drop(rx);
        scanner.finish()
    });

    while let Some(chunk) = resp.chunk().await? {
        if tx.send(chunk.to_vec()).await.is_err() {
            break;
        }
    }
    drop(tx);

    let title = scan
        .await
        .map_err(|e| ScanError::General(format!("Title scan task failed: {}", e)))?;

    Ok(ProbeResult {
        target: display.to_string(),
        url: url.to_string(),
        status,
        header_block,
        headers,
        title,
    })
}

/// Render the protocol line and headers the way they arrived.
///
/// One "Key: Value" line per field, repeated names repeated, field order as
/// exposed by the header map, terminated by a blank line.
pub fn format_header_block(version: Version, headers: &HeaderMap) -> String {
    let mut block = format!("{:?}\n", version);
    for (name, value) in headers.iter() {
        block.push_str(name.as_str());
        block.push_str(": ");
        block.push_str(&String::from_utf8_lossy(value.as_bytes()));
        block.push('\n');
    }
    block.push('\n');
    block
}

fn flatten_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Token sink that grabs the text following the first `<title>` start tag.
#[derive(Default)]
struct TitleSink {
    in_title: bool,
    buffer: String,
    title: Option<String>,
}

impl TitleSink {
    /// Close out the currently open title, keeping it only if non-blank.
    fn finish_title(&mut self) {
        if self.in_title {
            self.in_title = false;
            let trimmed = self.buffer.trim();
            if !trimmed.is_empty() {
                self.title = Some(trimmed.to_string());
            }
            self.buffer.clear();
        }
    }
}

impl TokenSink for TitleSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.title.is_some() {
            return TokenSinkResult::Continue;
        }

        match token {
            Token::TagToken(tag) => {
                // A self-closing <title/> still opens a capture: the text
                // that follows it is the title.
                if tag.kind == TagKind::StartTag && &*tag.name == "title" {
                    self.in_title = true;
                    self.buffer.clear();
                    // Title content is RCDATA: entities decode, markup does not
                    return TokenSinkResult::RawData(RawKind::Rcdata);
                }
                self.finish_title();
            }
            Token::CharacterTokens(text) => {
                if self.in_title {
                    self.buffer.push_str(&text);
                }
            }
            Token::EOFToken => self.finish_title(),
            _ => {}
        }

        TokenSinkResult::Continue
    }
}

/// Incremental title extractor over a streamed HTML body.
///
/// Feed raw body bytes with `push`; it reports completion so the caller can
/// stop consuming the response early. Multi-byte UTF-8 sequences split across
/// chunk boundaries are carried over to the next push.
pub struct TitleScanner {
    tokenizer: Tokenizer<TitleSink>,
    input: BufferQueue,
    carry: Vec<u8>,
}

impl TitleScanner {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(TitleSink::default(), TokenizerOpts::default()),
            input: BufferQueue::new(),
            carry: Vec::new(),
        }
    }

    /// Feed one body chunk. Returns true once a title has been captured.
    pub fn push(&mut self, chunk: &[u8]) -> bool {
        self.carry.extend_from_slice(chunk);
        let text = take_valid_utf8(&mut self.carry);
        if !text.is_empty() {
            self.input.push_back(StrTendril::from_slice(&text));
            let _ = self.tokenizer.feed(&mut self.input);
        }
        self.tokenizer.sink.title.is_some()
    }

    /// Flush remaining input and return the title, empty if none was found.
    pub fn finish(mut self) -> String {
        if !self.carry.is_empty() {
            let trailing = String::from_utf8_lossy(&self.carry).into_owned();
            self.input.push_back(StrTendril::from_slice(&trailing));
            let _ = self.tokenizer.feed(&mut self.input);
        }
        self.tokenizer.end();
        self.tokenizer.sink.title.take().unwrap_or_default()
    }
}

impl Default for TitleScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Split the decodable prefix out of `buf`, leaving any incomplete trailing
/// UTF-8 sequence in place for the next chunk.
fn take_valid_utf8(buf: &mut Vec<u8>) -> String {
    match std::str::from_utf8(buf) {
        Ok(text) => {
            let text = text.to_string();
            buf.clear();
            text
        }
        Err(err) if err.error_len().is_none() => {
            let valid = err.valid_up_to();
            let text = String::from_utf8_lossy(&buf[..valid]).into_owned();
            buf.drain(..valid);
            text
        }
        Err(_) => {
            // Invalid bytes mid-stream: decode lossily and move on
            let text = String::from_utf8_lossy(buf).into_owned();
            buf.clear();
            text
        }
    }
}
