//! Fluent assertion builder for strings.

use regex::Regex;

use crate::diff::diff_strings;
use crate::error::{CheckError, CheckResult};
use crate::message;
use crate::representation::{Representation, StandardRepresentation};

use super::unwrap_check;

/// Create an expectation on a string.
///
/// # Example
///
/// ```rust,ignore
/// use veracity::expect_str;
///
/// expect_str("Success: 42 items")
///     .contains("Success")
///     .matches(r"\d+ items");
/// ```
pub fn expect_str(actual: &str) -> StrAssert<'_> {
    StrAssert {
        actual,
        repr: Box::new(StandardRepresentation),
    }
}

/// Builder for assertions on a string.
pub struct StrAssert<'a> {
    actual: &'a str,
    repr: Box<dyn Representation + 'a>,
}

impl<'a> StrAssert<'a> {
    pub fn using_representation(mut self, repr: impl Representation + 'a) -> Self {
        self.repr = Box::new(repr);
        self
    }

    // =========================================================================
    // Assertion methods (panic on failure)
    // =========================================================================

    /// Assert exact equality. For multi-line strings the failure message
    /// lists one diff record per differing line.
    pub fn is_equal_to(&self, expected: &str) -> &Self {
        unwrap_check(self.try_is_equal_to(expected));
        self
    }

    /// Assert the string contains the given substring.
    pub fn contains(&self, expected: &str) -> &Self {
        unwrap_check(self.try_contains(expected));
        self
    }

    /// Assert the string does not contain the given substring.
    pub fn does_not_contain(&self, expected: &str) -> &Self {
        unwrap_check(self.try_does_not_contain(expected));
        self
    }

    pub fn starts_with(&self, prefix: &str) -> &Self {
        unwrap_check(self.try_starts_with(prefix));
        self
    }

    pub fn ends_with(&self, suffix: &str) -> &Self {
        unwrap_check(self.try_ends_with(suffix));
        self
    }

    /// Assert the string matches the given regex. An invalid pattern is a
    /// usage error, not an assertion failure.
    pub fn matches(&self, pattern: &str) -> &Self {
        unwrap_check(self.try_matches(pattern));
        self
    }

    pub fn does_not_match(&self, pattern: &str) -> &Self {
        unwrap_check(self.try_does_not_match(pattern));
        self
    }

    pub fn is_empty(&self) -> &Self {
        unwrap_check(self.try_is_empty());
        self
    }

    pub fn has_length(&self, expected: usize) -> &Self {
        unwrap_check(self.try_has_length(expected));
        self
    }

    // =========================================================================
    // Non-panicking evaluation
    // =========================================================================

    pub fn try_is_equal_to(&self, expected: &str) -> CheckResult {
        if self.actual == expected {
            return Ok(());
        }
        let multiline = self.actual.contains('\n') || expected.contains('\n');
        let factory = if multiline {
            let rendered: Vec<String> = diff_strings(self.actual, expected)
                .iter()
                .map(|record| record.to_string())
                .collect();
            message::should_have_same_textual_content(
                &self.actual,
                &expected,
                &rendered,
                self.repr.as_ref(),
            )
        } else {
            message::should_be_equal(&self.actual, &expected, self.repr.as_ref())
        };
        Err(CheckError::AssertionFailed(factory.create()))
    }

    pub fn try_contains(&self, expected: &str) -> CheckResult {
        if self.actual.contains(expected) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_contain_text(&self.actual, &expected, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_does_not_contain(&self, expected: &str) -> CheckResult {
        if !self.actual.contains(expected) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_not_contain_text(&self.actual, &expected, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_starts_with(&self, prefix: &str) -> CheckResult {
        if self.actual.starts_with(prefix) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_start_with(&self.actual, &prefix, None, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_ends_with(&self, suffix: &str) -> CheckResult {
        if self.actual.ends_with(suffix) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_end_with(&self.actual, &suffix, None, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_matches(&self, pattern: &str) -> CheckResult {
        let regex = self.compile(pattern)?;
        if regex.is_match(self.actual) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_match_pattern(&self.actual, pattern, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_does_not_match(&self, pattern: &str) -> CheckResult {
        let regex = self.compile(pattern)?;
        if !regex.is_match(self.actual) {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_not_match_pattern(&self.actual, pattern, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_is_empty(&self) -> CheckResult {
        if self.actual.is_empty() {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_be_empty(&self.actual, self.repr.as_ref()).create(),
        ))
    }

    pub fn try_has_length(&self, expected: usize) -> CheckResult {
        let length = self.actual.chars().count();
        if length == expected {
            return Ok(());
        }
        Err(CheckError::AssertionFailed(
            message::should_have_size(&self.actual, length, expected, self.repr.as_ref()).create(),
        ))
    }

    fn compile(&self, pattern: &str) -> Result<Regex, CheckError> {
        Regex::new(pattern)
            .map_err(|e| CheckError::usage(format!("invalid regex pattern '{}': {}", pattern, e)))
    }
}
