//! Tests for `tether pull`.

use crate::support::*;

#[test]
fn test_pull_writes_env_file() {
    let t = Test::with_remote(COMPLETE_JSON);

    let output = t.pull(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "wrote .env (5 keys)");

    let content = t.read_env();
    assert!(content.contains("HOSTNAME=remote.example.com\n"));
    assert!(content.contains("SMTP_PASSWORD=hunter2\n"));
}

#[test]
fn test_pull_output_is_sorted() {
    let t = Test::with_remote(COMPLETE_JSON);
    assert_success(&t.pull(&[]));

    let keys: Vec<String> = t
        .read_env()
        .lines()
        .map(|l| l.split('=').next().unwrap().to_string())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[cfg(unix)]
#[test]
fn test_pull_sets_private_permissions() {
    let t = Test::with_remote(COMPLETE_JSON);
    assert_success(&t.pull(&[]));

    assert_eq!(file_mode(&t.path(".env")), 0o600);
}

#[test]
fn test_pull_over_different_file_requires_force() {
    let t = Test::with_remote(COMPLETE_JSON);
    t.write_env(COMPLETE_ENV);

    let output = t.pull(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "--force");
    assert!(t.read_env().contains("HOSTNAME=example.com"));

    assert_success(&t.pull(&["--force"]));
    let content = t.read_env();
    assert!(content.contains("HOSTNAME=remote.example.com"));
    assert!(!content.contains("# production"));
}

#[test]
fn test_pull_dry_run_writes_nothing() {
    let t = Test::with_remote(COMPLETE_JSON);

    let output = t.pull(&["--dry-run"]);
    assert_success(&output);
    assert_stderr_contains(&output, "would create .env");
    assert!(!t.path(".env").exists());
}

#[test]
fn test_pull_missing_remote_fails() {
    let t = Test::new();

    let output = t.pull(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "not found");
    assert_stderr_contains(&output, "tether push");
}

#[test]
fn test_pull_quotes_values_with_spaces() {
    let t = Test::with_remote(r#"{"GREETING":"hello world","URL":"a#b"}"#);
    assert_success(&t.pull(&[]));

    let content = t.read_env();
    assert!(content.contains("GREETING=\"hello world\"\n"));
    assert!(content.contains("URL=\"a#b\"\n"));
}

#[test]
fn test_pull_rejects_multiline_values() {
    let t = Test::with_remote(r#"{"CERT":"line1\nline2"}"#);

    let output = t.pull(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "newline");
    assert!(!t.path(".env").exists());
}

#[test]
fn test_pull_refuses_keys_the_env_file_cannot_hold() {
    for payload in [
        r#"{"HOSTNAME":"x","S3_BUCKET":"b"}"#,
        r#"{"HOSTNAME":"x","smtp_port":"25"}"#,
    ] {
        let t = Test::with_remote(payload);

        let output = t.pull(&[]);
        assert_failure(&output);
        assert_stderr_contains(&output, "invalid key");
        assert!(!t.path(".env").exists(), "payload: {}", payload);
    }
}

#[test]
fn test_pull_warns_about_keys_missing_from_remote() {
    let t = Test::with_remote(r#"{"HOSTNAME":"remote.example.com"}"#);

    let output = t.pull(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "the remote secret lacks 4 required keys");
    assert_stderr_contains(&output, "• SMTP_PASSWORD");
    assert_eq!(t.read_env(), "HOSTNAME=remote.example.com\n");
}
