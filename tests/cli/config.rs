//! Tests for `.tether.toml` and flag precedence.

use crate::support::*;

#[test]
fn test_config_file_sets_env_file_and_required_keys() {
    let t = Test::new();
    std::fs::write(
        t.path(".tether.toml"),
        "[local]\nenv_file = \"config/app.env\"\n\n[validate]\nrequired = [\"DATABASE_URL\"]\n",
    )
    .unwrap();
    std::fs::create_dir(t.path("config")).unwrap();
    std::fs::write(t.path("config/app.env"), "DATABASE_URL=postgres://db\n").unwrap();

    let output = t.validate(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "1 keys resolved from local file config/app.env");
}

#[test]
fn test_flag_overrides_config_file() {
    let t = Test::with_env(COMPLETE_ENV);
    std::fs::write(t.path(".tether.toml"), "[local]\nenv_file = \"missing.env\"\n").unwrap();

    assert_failure(&t.validate(&[]));
    assert_success(&t.validate(&["--env-file", ".env"]));
}

#[test]
fn test_config_unknown_field_fails() {
    let t = Test::with_env(COMPLETE_ENV);
    std::fs::write(t.path(".tether.toml"), "[remote]\nnmae = \"typo\"\n").unwrap();

    let output = t.validate(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
    assert_stderr_contains(&output, ".tether.toml");
}

#[test]
fn test_explicit_config_path() {
    let t = Test::with_env(COMPLETE_ENV);
    std::fs::write(
        t.path("ci.toml"),
        "[remote]\nname = \"myapp/staging\"\n",
    )
    .unwrap();

    let output = t
        .cmd()
        .env_remove("TETHER_SECRET_NAME")
        .args(["--config", "ci.toml", "push"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t
        .store_dir()
        .join(REGION)
        .join("myapp/staging.json")
        .exists());
}

#[test]
fn test_secret_name_required_for_push() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t
        .cmd()
        .env_remove("TETHER_SECRET_NAME")
        .arg("push")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "--secret-name");
}

#[test]
fn test_without_secret_name_validate_uses_local_only() {
    let t = Test::with_env(COMPLETE_ENV);

    let output = t
        .cmd()
        .env_remove("TETHER_SECRET_NAME")
        .arg("validate")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "local file");
    assert!(!stderr(&output).contains("remote secret unavailable"));
}
