//! Panicking assertion macros.
//!
//! Each macro runs the matching check from [`assertions`](crate::assertions)
//! and panics with its diagnostic. A trailing format string is printed
//! above the diagnostic.

/// Panic unless two values deep-equal, printing the diff.
///
/// # Example
///
/// ```rust
/// use assertkit::assert_diff_eq;
///
/// assert_diff_eq!(vec![1, 2], vec![1, 2]);
/// assert_diff_eq!("abc", String::from("abc"), "loading {}", "fixture");
/// ```
///
/// ```rust,should_panic
/// use assertkit::assert_diff_eq;
///
/// // panics: slices differ at index 2
/// assert_diff_eq!(vec![1, 2, 4], vec![1, 2, 3]);
/// ```
#[macro_export]
macro_rules! assert_diff_eq {
    ($got:expr, $want:expr $(,)?) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::equal(&$got, &$want) {
            panic!("{}", err);
        }
    };
    ($got:expr, $want:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::equal(&$got, &$want) {
            panic!("{}\n{}", format_args!($($arg)+), err);
        }
    };
}

/// Panic unless a container holds an item.
///
/// ```rust
/// use assertkit::assert_contains;
///
/// assert_contains!("hello world", "world");
/// assert_contains!(vec![1, 2, 3], 2);
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($container:expr, $item:expr $(,)?) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::contains(&$container, &$item) {
            panic!("{}", err);
        }
    };
    ($container:expr, $item:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::contains(&$container, &$item) {
            panic!("{}\n{}", format_args!($($arg)+), err);
        }
    };
}

/// Panic unless a container has the given length.
///
/// ```rust
/// use assertkit::assert_len;
///
/// assert_len!(vec!['a', 'b'], 2);
/// ```
#[macro_export]
macro_rules! assert_len {
    ($container:expr, $len:expr $(,)?) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::has_len(&$container, $len) {
            panic!("{}", err);
        }
    };
    ($container:expr, $len:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) = $crate::assertions::has_len(&$container, $len) {
            panic!("{}\n{}", format_args!($($arg)+), err);
        }
    };
}

/// Panic unless a condition becomes true in time.
///
/// The one-argument form uses the default 5s timeout and 100ms interval.
///
/// ```rust
/// use assertkit::assert_eventually;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// assert_eventually!(
///     || start.elapsed() > Duration::from_millis(10),
///     Duration::from_secs(1),
///     Duration::from_millis(2)
/// );
/// ```
#[macro_export]
macro_rules! assert_eventually {
    ($condition:expr $(,)?) => {
        $crate::assert_eventually!(
            $condition,
            $crate::poll::DEFAULT_TIMEOUT,
            $crate::poll::DEFAULT_INTERVAL
        )
    };
    ($condition:expr, $timeout:expr, $interval:expr $(,)?) => {
        if let ::std::result::Result::Err(err) =
            $crate::assertions::eventually($condition, $timeout, $interval)
        {
            panic!("{}", err);
        }
    };
    ($condition:expr, $timeout:expr, $interval:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) =
            $crate::assertions::eventually($condition, $timeout, $interval)
        {
            panic!("{}\n{}", format_args!($($arg)+), err);
        }
    };
}

/// Panic if a condition becomes true before the timeout.
///
/// ```rust
/// use assertkit::assert_never;
/// use std::time::Duration;
///
/// assert_never!(|| false, Duration::from_millis(20), Duration::from_millis(5));
/// ```
#[macro_export]
macro_rules! assert_never {
    ($condition:expr $(,)?) => {
        $crate::assert_never!(
            $condition,
            $crate::poll::DEFAULT_TIMEOUT,
            $crate::poll::DEFAULT_INTERVAL
        )
    };
    ($condition:expr, $timeout:expr, $interval:expr $(,)?) => {
        if let ::std::result::Result::Err(err) =
            $crate::assertions::never($condition, $timeout, $interval)
        {
            panic!("{}", err);
        }
    };
    ($condition:expr, $timeout:expr, $interval:expr, $($arg:tt)+) => {
        if let ::std::result::Result::Err(err) =
            $crate::assertions::never($condition, $timeout, $interval)
        {
            panic!("{}\n{}", format_args!($($arg)+), err);
        }
    };
}
