//! Fluent assertion builder for file content.

use std::path::Path;

use sha2::digest::Digest;

use crate::diff;
use crate::digest::{self, DigestExpectation};
use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::{Representation, StandardRepresentation};

use super::unwrap_check;

/// Create an expectation on a file path.
///
/// # Example
///
/// ```rust,ignore
/// use sha2::Sha256;
/// use veracity::expect_file;
///
/// expect_file("fixtures/release.bin")
///     .exists()
///     .has_digest::<Sha256>("dcb3015cd28447644c810af352832c19");
/// ```
pub fn expect_file<P: AsRef<Path> + ?Sized>(path: &P) -> FileAssert<'_> {
    FileAssert {
        path: path.as_ref(),
        repr: Box::new(StandardRepresentation),
    }
}

/// Builder for assertions on a file.
///
/// Content checks acquire their file handles for the duration of a single
/// call and release them on every exit path.
pub struct FileAssert<'a> {
    path: &'a Path,
    repr: Box<dyn Representation + 'a>,
}

impl<'a> FileAssert<'a> {
    pub fn using_representation(mut self, repr: impl Representation + 'a) -> Self {
        self.repr = Box::new(repr);
        self
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert the path exists.
    pub fn exists(&self) -> &Self {
        unwrap_check(self.try_exists());
        self
    }

    /// Assert the path is a regular file.
    pub fn is_file(&self) -> &Self {
        unwrap_check(self.try_is_file());
        self
    }

    /// Assert this file and `other` split into identical lines, regardless
    /// of platform line breaks. The failure message lists one record per
    /// differing line.
    pub fn has_same_textual_content_as(&self, other: &Path) -> &Self {
        unwrap_check(self.try_has_same_textual_content_as(other));
        self
    }

    /// Assert the file's text equals `expected`.
    pub fn has_content(&self, expected: &str) -> &Self {
        unwrap_check(self.try_has_content(expected));
        self
    }

    /// Assert this file and `other` hold identical bytes; the first
    /// mismatching offset is reported.
    pub fn has_same_binary_content_as(&self, other: &Path) -> &Self {
        unwrap_check(self.try_has_same_binary_content_as(other));
        self
    }

    /// Assert the file's `D` digest equals the given hex string
    /// (case-insensitive).
    pub fn has_digest<D: Digest>(&self, expected_hex: &str) -> &Self {
        unwrap_check(self.try_has_digest::<D>(expected_hex));
        self
    }

    /// Assert the file's `D` digest equals the given bytes.
    pub fn has_digest_bytes<D: Digest>(&self, expected: &[u8]) -> &Self {
        unwrap_check(self.try_has_digest_bytes::<D>(expected));
        self
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    pub fn try_exists(&self) -> CheckResult {
        match std::fs::metadata(self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CheckError::AssertionFailed(
                message::should_exist(&self.path_text(), self.repr.as_ref()).create(),
            )),
            Err(e) => Err(CheckError::fault(
                format!("failed to stat {}", self.path.display()),
                e,
            )),
        }
    }

    pub fn try_is_file(&self) -> CheckResult {
        self.try_exists()?;
        let metadata = std::fs::metadata(self.path)
            .map_err(|e| CheckError::fault(format!("failed to stat {}", self.path.display()), e))?;
        if metadata.is_file() {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_be_regular_file(&self.path_text(), self.repr.as_ref()).create(),
        ))
    }

    pub fn try_has_same_textual_content_as(&self, other: &Path) -> CheckResult {
        diff::assert_same_textual_content(self.path, other, self.repr.as_ref())
    }

    pub fn try_has_content(&self, expected: &str) -> CheckResult {
        let records = diff::diff_file_string(self.path, expected)?;
        if records.is_empty() {
            return Ok(());
        }
        let rendered: Vec<String> = records.iter().map(|record| record.to_string()).collect();
        Err(CheckError::AssertionFailed(
            message::file_should_have_content(&self.path_text(), &rendered, self.repr.as_ref())
                .create(),
        ))
    }

    pub fn try_has_same_binary_content_as(&self, other: &Path) -> CheckResult {
        digest::assert_same_binary_content_with(self.path, other, self.repr.as_ref())
    }

    pub fn try_has_digest<D: Digest>(&self, expected_hex: &str) -> CheckResult {
        digest::assert_has_digest::<D>(
            self.path,
            DigestExpectation::Hex(expected_hex.to_string()),
            self.repr.as_ref(),
        )
    }

    pub fn try_has_digest_bytes<D: Digest>(&self, expected: &[u8]) -> CheckResult {
        digest::assert_has_digest::<D>(
            self.path,
            DigestExpectation::Bytes(expected.to_vec()),
            self.repr.as_ref(),
        )
    }

    fn path_text(&self) -> String {
        self.path.display().to_string()
    }
}
