//! Diagnostic logging for test runs
//!
//! The crate emits `tracing` events: poll start and finish at `debug`,
//! each poll check and diff dispatch at `trace`. Nothing is printed unless
//! a subscriber is installed; [`init_test_logging`] installs one that
//! writes through the test harness's captured output.
//!
//! The filter is read from `ASSERTKIT_LOG`, then `RUST_LOG`, and defaults
//! to `warn`.
//!
//! ```bash
//! ASSERTKIT_LOG=assertkit=trace cargo test -- --nocapture
//! ```

use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "ASSERTKIT_LOG";

/// Filter used when neither variable is set or parses.
pub const DEFAULT_FILTER: &str = "warn";

static INIT_ONCE: Once = Once::new();

/// Install a test-friendly subscriber.
///
/// Safe to call from every test; only the first call does anything. If
/// another global subscriber is already installed it is left in place.
///
/// ```rust
/// assertkit::logging::init_test_logging();
/// assertkit::logging::init_test_logging();
/// ```
pub fn init_test_logging() {
    INIT_ONCE.call_once(|| {
        let installed = tracing_subscriber::registry()
            .with(filter())
            .with(fmt::layer().with_test_writer().compact())
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
