//! HTTP status code checks.
//!
//! Codes are plain `u16`s so any client's status type can be checked
//! through its numeric value.

use std::fmt;

use crate::error::{Error, Result};

/// The class of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// Anything outside 100..=599.
    Invalid,
}

impl StatusClass {
    /// Classify `code`.
    ///
    /// ```rust
    /// use assertkit::assertions::StatusClass;
    ///
    /// assert_eq!(StatusClass::of(404), StatusClass::ClientError);
    /// assert_eq!(StatusClass::of(42), StatusClass::Invalid);
    /// ```
    #[must_use]
    pub fn of(code: u16) -> Self {
        match code {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirect,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Invalid,
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Informational => "informational (1xx)",
            Self::Success => "success (2xx)",
            Self::Redirect => "redirect (3xx)",
            Self::ClientError => "client error (4xx)",
            Self::ServerError => "server error (5xx)",
            Self::Invalid => "invalid",
        })
    }
}

fn expect_class(code: u16, want: StatusClass) -> Result<()> {
    let got = StatusClass::of(code);
    if got == want {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expected {want} status, got {code}\n  class: {got}"
        )))
    }
}

/// Check that `code` is 2xx.
///
/// # Errors
///
/// [`Error::AssertionFailed`] naming the actual code and its class.
pub fn status_success(code: u16) -> Result<()> {
    expect_class(code, StatusClass::Success)
}

/// Check that `code` is 3xx.
///
/// # Errors
///
/// See [`status_success`].
pub fn status_redirect(code: u16) -> Result<()> {
    expect_class(code, StatusClass::Redirect)
}

/// Check that `code` is 4xx.
///
/// # Errors
///
/// See [`status_success`].
pub fn status_client_error(code: u16) -> Result<()> {
    expect_class(code, StatusClass::ClientError)
}

/// Check that `code` is 5xx.
///
/// # Errors
///
/// See [`status_success`].
pub fn status_server_error(code: u16) -> Result<()> {
    expect_class(code, StatusClass::ServerError)
}

/// Check that `code` is exactly `expected`.
///
/// # Errors
///
/// [`Error::AssertionFailed`] otherwise.
pub fn status_is(code: u16, expected: u16) -> Result<()> {
    if code == expected {
        Ok(())
    } else {
        Err(Error::assertion(format!(
            "expected status {expected}, got {code}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert!(status_success(200).is_ok());
        assert!(status_redirect(301).is_ok());
        assert!(status_client_error(418).is_ok());
        assert!(status_server_error(503).is_ok());
    }

    #[test]
    fn test_class_mismatch_message() {
        let err = status_success(404).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected success (2xx) status, got 404\n  class: client error (4xx)"
        );
    }

    #[test]
    fn test_boundaries() {
        assert!(status_success(199).is_err());
        assert!(status_success(299).is_ok());
        assert!(status_server_error(600).is_err());
        assert_eq!(StatusClass::of(100), StatusClass::Informational);
    }

    #[test]
    fn test_exact_status() {
        assert!(status_is(201, 201).is_ok());
        assert_eq!(
            status_is(200, 201).unwrap_err().to_string(),
            "expected status 201, got 200"
        );
    }
}
