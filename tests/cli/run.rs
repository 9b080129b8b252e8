//! Tests for `tether run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_injects_secrets() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.run_with(&["sh", "-c", "printf %s \"$SMTP_ADDRESS\""]);
    assert_success(&output);
    assert_eq!(stdout(&output), "smtp.example.com");
}

#[cfg(unix)]
#[test]
fn test_run_prefers_remote_values() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(COMPLETE_JSON);

    let output = t.run_with(&["sh", "-c", "printf %s \"$HOSTNAME\""]);
    assert_success(&output);
    assert_eq!(stdout(&output), "remote.example.com");
}

#[cfg(unix)]
#[test]
fn test_run_propagates_exit_code() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.run_with(&["sh", "-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));
}

#[cfg(unix)]
#[test]
fn test_run_refuses_to_start_with_missing_keys() {
    let t = Test::with_env(PARTIAL_ENV);

    let output = t.run_with(&["sh", "-c", "echo started"]);
    assert_failure(&output);
    assert_stdout_excludes(&output, "started");
    assert_stderr_contains(&output, "SMTP_PASSWORD");
}

#[cfg(unix)]
#[test]
fn test_run_remote_with_unsettable_key_falls_back_without_panic() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(r#"{"A=B":"x","HOSTNAME":"remote.example.com"}"#);

    let output = t.run_with(&["sh", "-c", "printf %s \"$HOSTNAME\""]);
    assert_success(&output);
    assert_eq!(stdout(&output), "example.com");
    assert_stderr_contains(&output, "invalid key 'A=B'");
    assert_output_excludes(&output, "panicked");
}

#[test]
fn test_run_missing_program() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.run_with(&["tether-no-such-program-xyz"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "required program not found");
    assert_stderr_contains(&output, "check your PATH");
}

#[test]
fn test_run_requires_command() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.run(&["run"]);
    assert_eq!(output.status.code(), Some(2));
}
