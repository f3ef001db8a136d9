//! Line-oriented textual diff.
//!
//! Compares two character sources line by line and produces one
//! [`DiffRecord`] per line index where the content differs. Line splitting
//! is line-break agnostic (`\r\n`, `\r` and `\n` all end a line), so the
//! same text authored on different platforms diffs clean. When one source
//! has fewer lines, the missing lines are reported with empty content.
//!
//! Sources are read fully as UTF-8; undecodable content is an environment
//! fault, not a mismatch.

use std::fs;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::Representation;

/// One line-level mismatch between two textual sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRecord {
    /// 1-based line number.
    pub line_number: usize,
    /// Content of that line in the expected source, empty if absent.
    pub expected: String,
    /// Content of that line in the actual source, empty if absent.
    pub actual: String,
}

impl std::fmt::Display for DiffRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line:<{}>, expected:<{}> but was:<{}>",
            self.line_number, self.expected, self.actual
        )
    }
}

/// Diff two in-memory sources. Empty if and only if both split into the
/// same sequence of lines.
pub fn diff_strings(actual: &str, expected: &str) -> Vec<DiffRecord> {
    let actual_lines = split_lines(actual);
    let expected_lines = split_lines(expected);
    let line_count = actual_lines.len().max(expected_lines.len());

    let mut records = Vec::new();
    for index in 0..line_count {
        let actual_line = actual_lines.get(index).copied().unwrap_or("");
        let expected_line = expected_lines.get(index).copied().unwrap_or("");
        if actual_line != expected_line {
            records.push(DiffRecord {
                line_number: index + 1,
                expected: expected_line.to_string(),
                actual: actual_line.to_string(),
            });
        }
    }
    records
}

/// Diff the content of a file against an expected string.
pub fn diff_file_string(actual: &Path, expected: &str) -> Result<Vec<DiffRecord>, CheckError> {
    debug!("diffing {} against expected text", actual.display());
    let actual_content = read_text(actual)?;
    Ok(diff_strings(&actual_content, expected))
}

/// Diff the contents of two files.
pub fn diff_files(actual: &Path, expected: &Path) -> Result<Vec<DiffRecord>, CheckError> {
    debug!("diffing {} against {}", actual.display(), expected.display());
    let actual_content = read_text(actual)?;
    let expected_content = read_text(expected)?;
    Ok(diff_strings(&actual_content, &expected_content))
}

/// Fails unless the two files split into identical lines; the failure
/// message lists every diff record.
pub fn assert_same_textual_content(
    actual: &Path,
    expected: &Path,
    repr: &dyn Representation,
) -> CheckResult {
    let records = diff_files(actual, expected)?;
    if records.is_empty() {
        return Ok(());
    }
    let rendered: Vec<String> = records.iter().map(|r| r.to_string()).collect();
    Err(CheckError::AssertionFailed(
        message::should_have_same_textual_content(
            &actual.display().to_string(),
            &expected.display().to_string(),
            &rendered,
            repr,
        )
        .create(),
    ))
}

fn read_text(path: &Path) -> Result<String, CheckError> {
    fs::read(path)
        .map_err(|e| CheckError::fault(format!("failed to read {}", path.display()), e))
        .and_then(|bytes| {
            String::from_utf8(bytes).map_err(|e| {
                CheckError::fault(
                    format!("content of {} is not valid UTF-8", path.display()),
                    io::Error::new(io::ErrorKind::InvalidData, e),
                )
            })
        })
}

// A trailing line break does not start a new (empty) line; an empty source
// has no lines at all.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut position = 0;
    while position < bytes.len() {
        match bytes[position] {
            b'\n' => {
                lines.push(&text[start..position]);
                position += 1;
                start = position;
            }
            b'\r' => {
                lines.push(&text[start..position]);
                position += 1;
                if bytes.get(position) == Some(&b'\n') {
                    position += 1;
                }
                start = position;
            }
            _ => position += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}
