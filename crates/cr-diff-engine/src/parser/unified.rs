//! Parse one file's unified diff text (as returned by provider APIs).
//!
//! Provider "files changed" endpoints return a bare per-file `patch`
//! field: hunk headers and prefixed lines, usually without any
//! `diff --git` preamble. The parser accepts both shapes and derives old
//! and new line numbers from the hunk headers.

use crate::model::{DiffLine, Hunk};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur during patch parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed hunk header: {0}")]
    InvalidHunkHeader(String),
}

/// Parse raw unified diff text into structured hunks.
///
/// Lines before the first `@@` header (`diff --git`, `index`, `---`,
/// `+++`) are skipped, as are `\ No newline at end of file` markers. The
/// full header line is preserved, including any trailing function
/// context. An empty patch parses to no hunks. If the text continues
/// into another file's `diff` header, parsing stops there.
pub fn parse_patch(patch: &str) -> Result<Vec<Hunk>, ParseError> {
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut old_line = 0u32;
    let mut new_line = 0u32;

    for line in patch.lines() {
        if line.starts_with("@@") {
            let hunk = parse_hunk_header(line)?;
            old_line = hunk.old_start;
            new_line = hunk.new_start;
            hunks.push(hunk);
            continue;
        }

        let Some(hunk) = hunks.last_mut() else {
            // File header junk before the first hunk
            continue;
        };

        if line.starts_with("diff ") {
            break;
        }

        if let Some(content) = line.strip_prefix('+') {
            hunk.lines.push(DiffLine::addition(content, new_line));
            new_line += 1;
        } else if let Some(content) = line.strip_prefix('-') {
            hunk.lines.push(DiffLine::deletion(content, old_line));
            old_line += 1;
        } else if line.starts_with('\\') {
            // "\ No newline at end of file"
        } else {
            let content = line.strip_prefix(' ').unwrap_or(line);
            hunk.lines.push(DiffLine::context(content, old_line, new_line));
            old_line += 1;
            new_line += 1;
        }
    }

    Ok(hunks)
}

/// Parse a `@@ -old,count +new,count @@` header line.
fn parse_hunk_header(line: &str) -> Result<Hunk, ParseError> {
    static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();

    let re = HEADER_REGEX.get_or_init(|| {
        // Counts may be omitted for single-line ranges, e.g. "@@ -3 +3 @@"
        Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").unwrap()
    });

    let captures = re
        .captures(line)
        .ok_or_else(|| ParseError::InvalidHunkHeader(line.to_string()))?;

    let number = |index: usize, default: u32| -> Result<u32, ParseError> {
        match captures.get(index) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| ParseError::InvalidHunkHeader(line.to_string())),
            None => Ok(default),
        }
    };

    let mut hunk = Hunk::new(number(1, 0)?, number(2, 1)?, number(3, 0)?, number(4, 1)?);
    // Keep the original header text, which may carry function context
    hunk.header = line.to_string();
    Ok(hunk)
}
