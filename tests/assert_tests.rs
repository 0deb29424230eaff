//! Facade checks used the way a test suite would use them.

use std::collections::BTreeMap;
use std::time::Duration;

use assertkit::assertions::matcher::{self as m, AllOfMatcher};
use assertkit::assertions::{self, Assert};
use assertkit::prelude::*;
use assertkit::{assert_contains, assert_diff_eq, assert_len, assert_that};

fn inventory() -> BTreeMap<&'static str, u32> {
    [("apples", 3), ("pears", 0)].into_iter().collect()
}

#[test]
fn test_checks_compose_with_question_mark() -> assertkit::Result<()> {
    let stock = inventory();
    has_len(&stock, 2)?;
    contains(&stock, &"pears")?;
    not_contains(&stock, &"plums")?;
    equal(&stock["apples"], &3u32)?;
    is_some(&stock.get("pears"))?;
    Ok(())
}

#[test]
fn test_missing_key_lists_available_keys() {
    let err = contains(&inventory(), &"plums").unwrap_err();
    assert_eq!(
        err.to_string(),
        "map does not contain key \"plums\"\n  available keys: [\"apples\", \"pears\"]"
    );
}

#[test]
fn test_chain_reports_first_failure_only() {
    let stock = inventory();
    let err = Assert::new()
        .has_len(&stock, 2)
        .equal(&stock["pears"], &5u32)
        .contains(&stock, &"plums")
        .result()
        .unwrap_err();
    assert_eq!(err.to_string(), "values differ\n  got: 0\n  want: 5");
}

#[test]
fn test_chain_with_files_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, "{}").unwrap();

    Assert::new()
        .file_exists(&path)
        .dir_exists(dir.path())
        .path_missing(dir.path().join("missing"))
        .status_success(200)
        .status_redirect(308)
        .status_client_error(404)
        .status_server_error(502)
        .status_is(201, 201)
        .finish();
}

#[test]
fn test_long_string_is_windowed() {
    let got = format!("{}X{}", "a".repeat(60), "b".repeat(60));
    let want = format!("{}Y{}", "a".repeat(60), "b".repeat(60));
    let err = assertions::equal(&got, &want).unwrap_err().to_string();
    assert!(err.starts_with("string values differ at position 60\n  got: ..."));
    assert!(err.len() < got.len() + want.len());
}

#[test]
fn test_matchers() {
    assert_that!(vec![1, 2, 3], m::eq(vec![1, 2, 3]));
    assert_that!("deploy finished", m::contains("finished"));
    assert_that!(vec!['x'], m::not(m::has_len(0)));

    let nonempty_with_two: AllOfMatcher<Vec<i32>> =
        m::all_of(vec![m::boxed(m::has_len(3)), m::boxed(m::contains(2))]);
    assert!(nonempty_with_two.matches(&vec![1, 2, 3]));
    assert!(!nonempty_with_two.matches(&vec![4, 5, 6]));
}

#[test]
#[should_panic(expected = "maps differ at key \"apples\"\n  got: 3\n  want: 4")]
fn test_assert_diff_eq_panics_with_map_diff() {
    let mut want = inventory();
    want.insert("apples", 4);
    assert_diff_eq!(inventory(), want);
}

#[test]
fn test_panicking_macros_pass() {
    assert_diff_eq!(inventory(), inventory());
    assert_contains!("abc", 'b');
    assert_len!(inventory(), 2, "inventory size");
}

#[test]
fn test_eventually_and_never_checks() {
    let start = std::time::Instant::now();
    assertions::eventually(
        || start.elapsed() > Duration::from_millis(15),
        Duration::from_secs(1),
        Duration::from_millis(3),
    )
    .unwrap();
    assertions::never(|| false, Duration::from_millis(15), Duration::from_millis(5)).unwrap();
}

#[cfg(feature = "logging")]
#[test]
fn test_logging_init_is_harmless() {
    assertkit::logging::init_test_logging();
    assert!(is_true(true).is_ok());
}
