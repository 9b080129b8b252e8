//! Tests for `tether compare`.

use crate::support::*;

#[test]
fn test_compare_in_sync() {
    let t = Test::with_env(COMPLETE_ENV);
    assert_success(&t.push(&[]));

    let output = t.compare(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "in sync");
}

#[test]
fn test_compare_reports_key_drift() {
    let t = Test::with_env("HOSTNAME=example.com\nLOCAL_ONLY=1\n");
    t.seed_remote(r#"{"HOSTNAME":"example.com","REMOTE_ONLY":"1"}"#);

    let output = t.compare(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "- REMOTE_ONLY  (remote only)");
    assert_stdout_contains(&output, "+ LOCAL_ONLY  (local only)");
    assert_stdout_excludes(&output, "HOSTNAME");
}

#[test]
fn test_compare_keys_only_ignores_values() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(COMPLETE_JSON);

    let output = t.compare(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "in sync");
}

#[test]
fn test_compare_values_reports_differing_keys() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(COMPLETE_JSON);

    let output = t.compare(&["--values"]);
    assert_success(&output);
    assert_stdout_contains(&output, "~ HOSTNAME  (value differs)");
    assert_output_excludes(&output, "remote.example.com");
}

#[test]
fn test_compare_is_read_only() {
    let t = Test::with_env("HOSTNAME=local\n");
    t.seed_remote(r#"{"HOSTNAME":"remote"}"#);

    assert_success(&t.compare(&["--force"]));
    assert_eq!(t.read_env(), "HOSTNAME=local\n");
    assert_eq!(t.read_remote().unwrap()["HOSTNAME"], "remote");
}

#[test]
fn test_compare_missing_side_fails() {
    let t = Test::with_env(COMPLETE_ENV);

    assert_failure(&t.compare(&[]));
}
