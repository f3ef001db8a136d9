//! Binary content comparison and digest checks.
//!
//! Byte streams are compared byte for byte (reporting the first mismatching
//! offset) or reduced to a cryptographic digest computed incrementally over
//! a fixed-size buffer, then compared against an expected digest given as
//! raw bytes or as a hex string (case-insensitive).
//!
//! File-backed checks validate the path before any content I/O: the file
//! must exist, be a regular file and be readable; each violation is its own
//! assertion failure. Read errors during streaming are faults. All handles
//! are scoped to the call and released on every exit path.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;
use sha2::digest::Digest;

use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::Representation;

const BUFFER_SIZE: usize = 8 * 1024;

/// The expected digest of a byte source.
pub enum DigestExpectation {
    /// Raw digest bytes.
    Bytes(Vec<u8>),
    /// Hex string, compared case-insensitively.
    Hex(String),
}

impl DigestExpectation {
    /// The expected digest as bytes. An undecodable hex string is a usage
    /// error.
    fn into_bytes(self) -> Result<Vec<u8>, CheckError> {
        match self {
            DigestExpectation::Bytes(bytes) => Ok(bytes),
            DigestExpectation::Hex(text) => hex::decode(text.trim()).map_err(|e| {
                CheckError::usage(format!("expected digest is not a valid hex string: {}", e))
            }),
        }
    }
}

/// Fails unless the two readers produce identical byte streams; the first
/// mismatching offset is reported.
pub fn assert_streams_have_same_content(
    actual: impl Read,
    expected: impl Read,
    actual_name: &str,
    expected_name: &str,
    repr: &dyn Representation,
) -> CheckResult {
    match first_mismatch(actual, expected)? {
        None => Ok(()),
        Some(mismatch) => Err(CheckError::AssertionFailed(
            message::should_have_same_binary_content(
                &actual_name,
                &expected_name,
                mismatch.offset,
                mismatch.actual,
                mismatch.expected,
                repr,
            )
            .create(),
        )),
    }
}

/// Fails unless the two files hold identical bytes.
pub fn assert_same_binary_content(actual: &Path, expected: &Path) -> CheckResult {
    assert_same_binary_content_with(actual, expected, &crate::representation::StandardRepresentation)
}

/// Like [`assert_same_binary_content`] with an explicit representation.
pub fn assert_same_binary_content_with(
    actual: &Path,
    expected: &Path,
    repr: &dyn Representation,
) -> CheckResult {
    let actual_reader = open_validated(actual, repr)?;
    let expected_reader = open_validated(expected, repr)?;
    debug!(
        "comparing binary content of {} and {}",
        actual.display(),
        expected.display()
    );
    assert_streams_have_same_content(
        actual_reader,
        expected_reader,
        &actual.display().to_string(),
        &expected.display().to_string(),
        repr,
    )
}

/// Incrementally digest the file's content with `D`.
pub fn compute_digest<D: Digest>(path: &Path, repr: &dyn Representation) -> Result<Vec<u8>, CheckError> {
    let mut reader = open_validated(path, repr)?;
    debug!("digesting {}", path.display());
    let mut hasher = D::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let read = reader
            .read(&mut buffer)
            .map_err(|e| CheckError::fault(format!("failed to read {}", path.display()), e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hasher.finalize().to_vec())
}

/// Fails unless the file's `D` digest equals the expectation.
pub fn assert_has_digest<D: Digest>(
    path: &Path,
    expected: DigestExpectation,
    repr: &dyn Representation,
) -> CheckResult {
    let expected_bytes = expected.into_bytes()?;
    let actual_bytes = compute_digest::<D>(path, repr)?;
    if actual_bytes == expected_bytes {
        return Ok(());
    }
    Err(CheckError::AssertionFailed(
        message::should_have_digest(
            &path.display().to_string(),
            &hex::encode(&expected_bytes),
            &hex::encode(&actual_bytes),
            repr,
        )
        .create(),
    ))
}

struct Mismatch {
    offset: u64,
    actual: Option<u8>,
    expected: Option<u8>,
}

fn first_mismatch(actual: impl Read, expected: impl Read) -> Result<Option<Mismatch>, CheckError> {
    let mut actual_bytes = BufReader::with_capacity(BUFFER_SIZE, actual).bytes();
    let mut expected_bytes = BufReader::with_capacity(BUFFER_SIZE, expected).bytes();
    let mut offset: u64 = 0;
    loop {
        let a = actual_bytes
            .next()
            .transpose()
            .map_err(|e| CheckError::fault("failed to read actual stream", e))?;
        let e = expected_bytes
            .next()
            .transpose()
            .map_err(|e| CheckError::fault("failed to read expected stream", e))?;
        match (a, e) {
            (None, None) => return Ok(None),
            (a, e) if a == e => offset += 1,
            (a, e) => {
                return Ok(Some(Mismatch {
                    offset,
                    actual: a,
                    expected: e,
                }))
            }
        }
    }
}

// Path validation runs before any content I/O; each violation is a
// dedicated assertion failure so a misplaced fixture reads differently
// from a content mismatch.
fn open_validated(path: &Path, repr: &dyn Representation) -> Result<File, CheckError> {
    let path_text = path.display().to_string();
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CheckError::AssertionFailed(
                message::should_exist(&path_text, repr).create(),
            ));
        }
        Err(e) => return Err(CheckError::fault(format!("failed to stat {}", path_text), e)),
    };
    if !metadata.is_file() {
        return Err(CheckError::AssertionFailed(
            message::should_be_regular_file(&path_text, repr).create(),
        ));
    }
    match File::open(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => Err(
            CheckError::AssertionFailed(message::should_be_readable(&path_text, repr).create()),
        ),
        Err(e) => Err(CheckError::fault(format!("failed to open {}", path_text), e)),
    }
}
