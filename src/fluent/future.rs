//! Blocking assertions on asynchronous computations.
//!
//! The one place the library touches async: a future assertion blocks the
//! calling thread on a current-thread runtime until the future completes
//! or the caller's timeout expires. There is no explicit cancellation;
//! giving up is purely the timeout running out.

use std::future::Future;
use std::time::Duration;

use crate::error::{CheckError, CheckResult};
use crate::message;

use super::unwrap_check;

/// Create an expectation on a future.
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use veracity::expect_future;
///
/// let value = expect_future(async { 42 })
///     .succeeds_within(Duration::from_millis(100));
/// assert_eq!(value, 42);
/// ```
pub fn expect_future<F: Future>(future: F) -> FutureAssert<F> {
    FutureAssert { future }
}

/// Builder for assertions on a future. Consumed by the assertion, since
/// driving the future consumes it.
pub struct FutureAssert<F> {
    future: F,
}

impl<F: Future> FutureAssert<F> {
    /// Block until the future completes, up to `timeout`, and return its
    /// output.
    ///
    /// # Panics
    ///
    /// Panics if the timeout expires first, or if no blocking runtime
    /// could be built.
    pub fn succeeds_within(self, timeout: Duration) -> F::Output {
        match self.try_succeeds_within(timeout) {
            Ok(output) => output,
            Err(error) => {
                unwrap_check(Err(error));
                unreachable!()
            }
        }
    }

    /// Assert the future is still pending when `timeout` expires. The
    /// partially driven future is dropped.
    pub fn does_not_complete_within(self, timeout: Duration) {
        unwrap_check(self.try_does_not_complete_within(timeout));
    }

    /// Non-panicking twin of [`succeeds_within`](Self::succeeds_within).
    pub fn try_succeeds_within(self, timeout: Duration) -> Result<F::Output, CheckError> {
        match block_with_timeout(self.future, timeout)? {
            Some(output) => Ok(output),
            None => Err(CheckError::AssertionFailed(
                message::should_be_completed_within(timeout).create(),
            )),
        }
    }

    /// Non-panicking twin of
    /// [`does_not_complete_within`](Self::does_not_complete_within).
    pub fn try_does_not_complete_within(self, timeout: Duration) -> CheckResult {
        match block_with_timeout(self.future, timeout)? {
            None => Ok(()),
            Some(_) => Err(CheckError::AssertionFailed(
                message::should_still_be_pending_after(timeout).create(),
            )),
        }
    }
}

fn block_with_timeout<F: Future>(
    future: F,
    timeout: Duration,
) -> Result<Option<F::Output>, CheckError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .map_err(|e| CheckError::fault("failed to build blocking runtime", e))?;
    Ok(runtime.block_on(async { tokio::time::timeout(timeout, future).await.ok() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_future_succeeds_immediately() {
        let value = expect_future(async { 42 }).succeeds_within(Duration::from_millis(100));
        assert_eq!(value, 42);
    }

    #[test]
    fn slow_future_completes_within_a_generous_timeout() {
        let value = expect_future(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            "done"
        })
        .succeeds_within(Duration::from_secs(5));
        assert_eq!(value, "done");
    }

    #[test]
    fn pending_future_fails_with_the_timeout_in_the_message() {
        let result = expect_future(std::future::pending::<()>())
            .try_succeeds_within(Duration::from_millis(10));
        let message = match result {
            Err(CheckError::AssertionFailed(m)) => m,
            other => panic!("expected assertion failure, got {:?}", other),
        };
        assert!(message.contains("to be completed within"));
        assert!(message.contains("10ms"));
    }

    #[test]
    fn pending_future_passes_the_negated_check() {
        expect_future(std::future::pending::<()>())
            .does_not_complete_within(Duration::from_millis(10));
    }

    #[test]
    fn completed_future_fails_the_negated_check() {
        let result =
            expect_future(async { 1 }).try_does_not_complete_within(Duration::from_millis(50));
        assert!(result.is_err());
    }

    #[test]
    #[should_panic(expected = "to be completed within")]
    fn succeeds_within_panics_on_timeout() {
        expect_future(std::future::pending::<()>()).succeeds_within(Duration::from_millis(10));
    }
}
