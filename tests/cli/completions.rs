//! Tests for `tether completions`.

use crate::support::*;

#[test]
fn test_completions_bash() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "tether");
    assert_stdout_contains(&output, "validate");
}

#[test]
fn test_completions_zsh_and_elvish() {
    let t = Test::new();

    let output = t.run(&["completions", "zsh"]);
    assert_success(&output);
    assert!(stdout(&output).starts_with("#compdef tether"));

    let output = t.run(&["completions", "elvish"]);
    assert_success(&output);
    assert_stdout_contains(&output, "tether");
}

#[test]
fn test_completions_need_no_config() {
    let t = Test::new();
    std::fs::write(t.path(".tether.toml"), "not toml [").unwrap();

    assert_success(&t.run(&["completions", "zsh"]));
}

#[test]
fn test_completions_unknown_shell() {
    let t = Test::new();

    let output = t.run(&["completions", "tcsh"]);
    assert_eq!(output.status.code(), Some(2));
}
