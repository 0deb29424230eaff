//! # assertkit
//!
//! > Test assertions that tell you exactly what differs
//!
//! **assertkit** compares values structurally and reports the first
//! difference with just enough context to fix it. It also polls
//! conditions (`eventually` / `never`) on a fixed or backing-off
//! schedule that tests can drive with a mock clock.
//!
//! ## Quick Start
//!
//! ```rust
//! use assertkit::prelude::*;
//! use std::time::Duration;
//!
//! #[derive(Diffable)]
//! pub struct User {
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! let got = User { name: "ann".into(), age: 31 };
//! let want = User { name: "ann".into(), age: 32 };
//!
//! let err = equal(&got, &want).unwrap_err();
//! assert_eq!(err.to_string(), "structs differ at field \"age\"\n  got: 31\n  want: 32");
//!
//! let clock = MockClock::new();
//! let poller = Poller::with_clock(PollerConfig::default(), clock.clone());
//! let report = poller.eventually(|| clock.now() >= Duration::from_millis(300)).unwrap();
//! assert_eq!(report.attempts, 4);
//! ```
//!
//! ## Modules
//!
//! - [`value`] - the [`Diffable`](value::Diffable) trait and the value model
//! - [`diff`] - string, collection, struct and deep diffs
//! - [`poll`] - `eventually` / `never` polling
//! - [`clock`] - real and mock time sources
//! - [`assertions`] - `Result`-returning checks, the [`Assert`](assertions::Assert)
//!   chain, matchers and panicking macros
//! - `logging` - opt-in `tracing` output for test runs (`logging` feature,
//!   on by default)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Lets `#[derive(Diffable)]` expand to `::assertkit::...` inside this crate.
extern crate self as assertkit;

/// Time sources for polling
pub mod clock;

pub mod assertions;
pub mod diff;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod poll;
pub mod value;

/// Prelude for convenient imports
///
/// ```rust
/// use assertkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::matcher::Matcher;
    pub use crate::assertions::{
        contains, equal, has_len, is_empty, is_err, is_false, is_none, is_ok, is_some, is_true,
        not_contains, not_empty, not_equal, Assert,
    };
    pub use crate::clock::{Clock, MockClock, SystemClock};
    pub use crate::diff::{deep_diff, DiffConfig, DiffFormat, Differ};
    pub use crate::error::{Error, Result};
    pub use crate::poll::{PollReport, Poller, PollerConfig};
    pub use crate::value::Diffable;

    #[cfg(feature = "macros")]
    pub use assertkit_macros::Diffable;
}

// Re-exports
pub use error::{Error, Result};

// Re-export the derive when the macros feature is enabled
#[cfg(feature = "macros")]
pub use assertkit_macros::Diffable;
