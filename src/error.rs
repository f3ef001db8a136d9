//! Check outcomes for the verification engines.
//!
//! Every engine entry point returns a [`CheckResult`] so callers can tell
//! apart the three ways a check can go wrong:
//! - [`CheckError::Usage`] - the caller misused the API (bad arguments),
//! - [`CheckError::AssertionFailed`] - the actual value violated the expected
//!   condition, carrying the fully rendered failure message,
//! - [`CheckError::Fault`] - the environment broke (unreadable file, stream
//!   error) while evaluating the check.
//!
//! The fluent layer decides how to surface each kind; the engines never
//! conflate them.

use thiserror::Error;

/// Outcome of a single verification. `Ok(())` means the check passed.
pub type CheckResult = Result<(), CheckError>;

/// Why a check did not pass.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The check call itself was invalid (e.g. an empty expected-values
    /// slice, an out-of-range index). Raised before any comparison runs.
    #[error("invalid use of assertion: {0}")]
    Usage(String),

    /// The assertion did not hold. The payload is the complete, multi-line
    /// failure message built by an [`ErrorMessageFactory`].
    ///
    /// [`ErrorMessageFactory`]: crate::message::ErrorMessageFactory
    #[error("{0}")]
    AssertionFailed(String),

    /// The environment failed while the check ran: I/O errors, undecodable
    /// file content and the like. Distinct from a logical mismatch so a
    /// broken test environment never masquerades as a failing assertion.
    #[error("{context}: {source}")]
    Fault {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl CheckError {
    /// Build a usage error.
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        CheckError::Usage(message.into())
    }

    /// Build a fault wrapping an I/O error with context.
    pub(crate) fn fault(context: impl Into<String>, source: std::io::Error) -> Self {
        CheckError::Fault {
            context: context.into(),
            source,
        }
    }

    /// True when this is an assertion failure (as opposed to a usage error
    /// or an environment fault).
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, CheckError::AssertionFailed(_))
    }

    /// The rendered assertion failure message, if this is one.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            CheckError::AssertionFailed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_failure_exposes_its_message() {
        let err = CheckError::AssertionFailed("\nExpecting x".to_string());
        assert!(err.is_assertion_failure());
        assert_eq!(err.failure_message(), Some("\nExpecting x"));
    }

    #[test]
    fn usage_error_is_not_an_assertion_failure() {
        let err = CheckError::usage("values must not be empty");
        assert!(!err.is_assertion_failure());
        assert_eq!(err.failure_message(), None);
        assert_eq!(
            err.to_string(),
            "invalid use of assertion: values must not be empty"
        );
    }

    #[test]
    fn fault_keeps_context_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CheckError::fault("reading /tmp/f", io);
        assert!(!err.is_assertion_failure());
        assert!(err.to_string().starts_with("reading /tmp/f"));
    }
}
