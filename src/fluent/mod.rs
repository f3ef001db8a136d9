//! Fluent assertion builders.
//!
//! This module provides the thin, chainable layer over the verification
//! engines:
//! - `expect_slice()` / `expect_map()` - container assertions
//! - `expect_str()` - string assertions
//! - `expect_file()` - file content assertions
//! - `expect_future()` - blocking assertions on an async computation
//!
//! Assertion methods evaluate immediately and panic on failure with the
//! fully rendered message; every one has a non-panicking `try_` twin
//! returning the [`CheckResult`](crate::error::CheckResult) untouched.

mod file;
mod future;
mod map;
mod slice;
mod string;

pub use file::{expect_file, FileAssert};
pub use future::{expect_future, FutureAssert};
pub use map::{expect_map, MapAssert};
pub use slice::{expect_slice, SliceAssert};
pub use string::{expect_str, StrAssert};

use crate::error::{CheckError, CheckResult};

/// Shared surfacing rule for the panicking assertion methods: assertion
/// failures panic with their message verbatim, usage errors and faults
/// panic with their kind spelled out.
pub(crate) fn unwrap_check(result: CheckResult) {
    if let Err(error) = result {
        match error {
            CheckError::AssertionFailed(message) => panic!("assertion failed: {}", message),
            other => panic!("{}", other),
        }
    }
}
