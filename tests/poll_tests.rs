//! Poller behaviour on virtual and real time.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use assertkit::clock::{Clock, MockClock};
use assertkit::poll::{self, poll_on, PollKind, PollOutcome, Poller, PollerConfig};
use assertkit::Error;
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_eventually_third_call() {
    let clock = MockClock::new();
    let calls = AtomicU32::new(0);
    let config = PollerConfig::new(Duration::from_secs(1), ms(50));

    let report = poll_on(clock.clone(), PollKind::Eventually, &config, || {
        calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3
    })
    .unwrap();

    assert_eq!(report.attempts, 3);
    assert_eq!(report.elapsed, ms(100));
    assert_eq!(clock.active_timers(), 0);
}

#[test]
fn test_never_immediate_failure_is_fast() {
    let start = Instant::now();
    let err = poll::never(|| true, Duration::from_secs(5), ms(100)).unwrap_err();
    assert!(start.elapsed() < ms(100));
    match err {
        Error::UnexpectedlyTrue { attempts, .. } => assert_eq!(attempts, 1),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_never_blocks_for_full_timeout() {
    let clock = MockClock::new();
    let report = Poller::with_clock(PollerConfig::new(ms(750), ms(100)), clock.clone())
        .never(|| false)
        .unwrap();
    assert_eq!(report.outcome, PollOutcome::NeverTrue);
    assert_eq!(clock.now(), ms(750));
}

#[test]
fn test_condition_set_by_another_thread() {
    let ready = Arc::new(AtomicU32::new(0));
    let writer = Arc::clone(&ready);
    let handle = thread::spawn(move || {
        thread::sleep(ms(30));
        writer.store(1, Ordering::SeqCst);
    });

    let report = poll::eventually(|| ready.load(Ordering::SeqCst) == 1, Duration::from_secs(2), ms(5))
        .unwrap();
    handle.join().unwrap();
    assert!(report.attempts > 1);
}

#[test]
fn test_backoff_with_cap_on_mock_clock() {
    let clock = MockClock::new();
    let config = PollerConfig::new(Duration::from_secs(2), ms(10))
        .with_backoff(3.0)
        .with_max_interval(ms(200));

    let report = Poller::with_clock(config, clock.clone()).run(PollKind::Eventually, || false);

    assert_eq!(report.outcome, PollOutcome::TimedOut);
    assert_eq!(report.final_interval, ms(200));
    assert_eq!(report.elapsed, Duration::from_secs(2));
    // one sleep per tick plus the final wait for the deadline
    assert_eq!(clock.sleep_count(), report.attempts as usize);
}

#[test]
fn test_invalid_config_is_corrected() {
    let clock = MockClock::new();
    let config = PollerConfig::new(Duration::ZERO, Duration::ZERO)
        .with_backoff(f64::NAN)
        .with_max_interval(ms(1));

    let report = Poller::with_clock(config, clock).run(PollKind::Never, || false);
    assert_eq!(report.timeout, Duration::from_secs(5));
    assert_eq!(report.final_interval, ms(100));
}

#[test]
fn test_timeout_message_format() {
    let clock = MockClock::new();
    let err = Poller::with_clock(PollerConfig::new(ms(300), ms(100)), clock)
        .eventually(|| false)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Eventually: condition not met within timeout\n  timeout: 300ms\n  elapsed: 300ms\n  attempts: 3\n  final interval: 100ms"
    );
}

proptest! {
    #[test]
    fn prop_eventually_returns_within_timeout_plus_interval(
        timeout in 1u64..2_000,
        interval in 1u64..500,
        factor in 1.0f64..3.0,
        succeed_at in prop::option::of(0u64..3_000),
    ) {
        let clock = MockClock::new();
        let watch = clock.clone();
        let config = PollerConfig::new(ms(timeout), ms(interval)).with_backoff(factor);
        let report = Poller::with_clock(config, clock.clone()).run(PollKind::Eventually, || {
            succeed_at.is_some_and(|at| watch.now() >= ms(at))
        });
        prop_assert!(report.elapsed <= ms(timeout) + report.final_interval);
        prop_assert_eq!(clock.active_timers(), 0);
        if report.outcome == PollOutcome::TimedOut {
            prop_assert_eq!(report.elapsed, ms(timeout));
        }
    }

    #[test]
    fn prop_never_without_truth_waits_exactly_timeout(timeout in 1u64..5_000, interval in 1u64..1_000) {
        let clock = MockClock::new();
        let report = Poller::with_clock(PollerConfig::new(ms(timeout), ms(interval)), clock)
            .run(PollKind::Never, || false);
        prop_assert_eq!(report.outcome, PollOutcome::NeverTrue);
        prop_assert_eq!(report.elapsed, ms(timeout));
    }
}
