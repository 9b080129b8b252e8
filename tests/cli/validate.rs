//! Tests for `tether validate`.

use crate::support::*;

#[test]
fn test_validate_prefers_remote() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(COMPLETE_JSON);

    let output = t.validate(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "5 keys resolved from remote secret 'myapp/production'");
    assert_stdout_contains(
        &output,
        "  keys  ADMIN_EMAILS, HOSTNAME, SMTP_ADDRESS, SMTP_PASSWORD, SMTP_USER_NAME",
    );
}

#[test]
fn test_validate_falls_back_to_local_file() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.validate(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "resolved from local file .env");
    assert_stderr_contains(&output, "remote secret unavailable");
}

#[test]
fn test_validate_malformed_remote_falls_back() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote("[1, 2, 3]");

    let output = t.validate(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "local file");
}

#[test]
fn test_validate_lists_every_missing_key() {
    let t = Test::with_env(PARTIAL_ENV);

    let output = t.validate(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required keys: SMTP_USER_NAME, SMTP_PASSWORD");
    assert_stderr_contains(&output, "• SMTP_USER_NAME");
    assert_stderr_contains(&output, "• SMTP_PASSWORD");
}

#[test]
fn test_validate_missing_keys_hint_says_what_to_do() {
    let t = Test::with_env(PARTIAL_ENV);

    let output = t.validate(&[]);
    assert_failure(&output);
    let err = stderr(&output);
    assert_eq!(err.matches("SMTP_PASSWORD").count(), 2, "{}", err);
    assert_stderr_contains(&output, "→ set them in the remote secret or the local env file");
}

#[test]
fn test_validate_empty_value_counts_as_missing() {
    let t = Test::with_env(&COMPLETE_ENV.replace("SMTP_PASSWORD=hunter2", "SMTP_PASSWORD="));

    let output = t.validate(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required keys: SMTP_PASSWORD");
}

#[test]
fn test_validate_incomplete_remote_does_not_fall_back() {
    let t = Test::with_env(COMPLETE_ENV);
    t.seed_remote(r#"{"HOSTNAME":"remote.example.com"}"#);

    let output = t.validate(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required keys");
}

#[test]
fn test_validate_without_any_source_fails() {
    let t = Test::new();

    let output = t.validate(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "file not found");
}

#[test]
fn test_validate_custom_required_keys() {
    let t = Test::with_env("DATABASE_URL=postgres://localhost/app\n");

    assert_success(&t.validate(&["--require", "DATABASE_URL"]));

    let output = t.validate(&["--require", "DATABASE_URL", "--require", "REDIS_URL"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "REDIS_URL");
}

#[test]
fn test_validate_rejects_invalid_required_key() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.validate(&["--require", "smtp-host"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key");
}

#[test]
fn test_validate_export_prints_only_exports() {
    let t = Test::with_env(
        "HOSTNAME=example.com\nADMIN_EMAILS=a@example.com\nSMTP_ADDRESS=smtp\nSMTP_USER_NAME=me\nSMTP_PASSWORD=it's\n",
    );

    let output = t.validate(&["--export"]);
    assert_success(&output);
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 5);
    assert!(out.lines().all(|l| l.starts_with("export ")));
    assert!(out.contains("export HOSTNAME='example.com'\n"));
    assert!(out.contains(r"export SMTP_PASSWORD='it'\''s'"));
}

#[cfg(unix)]
#[test]
fn test_validate_export_is_evaluable() {
    let t = Test::with_env(COMPLETE_ENV);
    let output = t.validate(&["--export"]);
    assert_success(&output);

    let shell = std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("{}\nprintf %s \"$SMTP_USER_NAME\"", stdout(&output)))
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&shell.stdout), "mailer");
}

#[cfg(unix)]
#[test]
fn test_validate_warns_about_exposed_file() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_env(COMPLETE_ENV);
    std::fs::set_permissions(t.path(".env"), std::fs::Permissions::from_mode(0o644)).unwrap();

    let output = t.validate(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "readable by other users");
}

#[test]
fn test_validate_never_prints_values() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t.validate(&[]);
    assert_success(&output);
    assert_output_excludes(&output, "hunter2");
}
