//! Error definitions
//!
//! Diff and poll operations return plain result values; the checks in
//! [`assertions`](crate::assertions) lift failures into [`Error`] so that
//! they compose with `?`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for assertkit
#[derive(Error, Debug)]
pub enum Error {
    /// Two values of the same type differ.
    #[error("{0}")]
    Mismatch(String),

    /// The operands have different types.
    #[error("types differ\n  got: {got}\n  want: {want}")]
    TypeMismatch {
        /// Type of the actual value.
        got: String,
        /// Type of the expected value.
        want: String,
    },

    /// The value has the wrong shape for the requested operation.
    #[error("{0}")]
    Shape(String),

    /// An `eventually` condition did not hold before the deadline.
    #[error(
        "Eventually: condition not met within timeout\n  timeout: {timeout:?}\n  elapsed: {elapsed:?}\n  attempts: {attempts}\n  final interval: {final_interval:?}"
    )]
    ConditionNotMet {
        /// Configured timeout.
        timeout: Duration,
        /// Wall-clock (or virtual) time spent polling.
        elapsed: Duration,
        /// Number of predicate invocations.
        attempts: u32,
        /// Interval in effect when polling stopped.
        final_interval: Duration,
    },

    /// A `never` condition became true.
    #[error(
        "Never: condition became true unexpectedly\n  elapsed: {elapsed:?}\n  attempts: {attempts}\n  final interval: {final_interval:?}"
    )]
    UnexpectedlyTrue {
        /// Time spent polling before the condition held.
        elapsed: Duration,
        /// Number of predicate invocations.
        attempts: u32,
        /// Interval in effect when polling stopped.
        final_interval: Duration,
    },

    /// A boolean, option, result, status or filesystem check failed.
    #[error("{0}")]
    AssertionFailed(String),

    /// Filesystem metadata could not be read.
    #[error("cannot inspect {}: {source}", path.display())]
    Io {
        /// The path being checked.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a value mismatch error.
    #[must_use]
    pub fn mismatch(message: impl Into<String>) -> Self {
        Self::Mismatch(message.into())
    }

    /// Create a shape error.
    #[must_use]
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Create an assertion failure.
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Returns `true` for `eventually` timeouts.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ConditionNotMet { .. })
    }

    /// Returns `true` when the operands had different types.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_not_met_message() {
        let err = Error::ConditionNotMet {
            timeout: Duration::from_secs(1),
            elapsed: Duration::from_millis(1002),
            attempts: 21,
            final_interval: Duration::from_millis(50),
        };
        assert_eq!(
            err.to_string(),
            "Eventually: condition not met within timeout\n  timeout: 1s\n  elapsed: 1.002s\n  attempts: 21\n  final interval: 50ms"
        );
        assert!(err.is_timeout());
    }

    #[test]
    fn test_unexpectedly_true_message() {
        let err = Error::UnexpectedlyTrue {
            elapsed: Duration::ZERO,
            attempts: 1,
            final_interval: Duration::from_millis(50),
        };
        assert_eq!(
            err.to_string(),
            "Never: condition became true unexpectedly\n  elapsed: 0ns\n  attempts: 1\n  final interval: 50ms"
        );
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = Error::TypeMismatch {
            got: "i32".into(),
            want: "str".into(),
        };
        assert_eq!(err.to_string(), "types differ\n  got: i32\n  want: str");
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as _;

        let err = Error::Io {
            path: PathBuf::from("/nope"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("cannot inspect /nope"));
    }
}
