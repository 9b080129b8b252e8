//! Terminal output helpers.
//!
//! Results go to stdout; errors, warnings, and hints go to stderr so that
//! `eval "$(tether validate --export)"` only ever sees export lines.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Yellow: warnings, drift
//! - Cyan: paths, keys, hints
//! - Dim: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D>(styled: StyledObject<D>) -> StyledObject<D> {
    if colors_enabled() {
        styled
    } else {
        styled.force_styling(false)
    }
}

/// `✓ pushed 5 keys`
pub fn success(msg: &str) {
    println!("{} {}", paint(style("✓").green()), msg);
}

/// `✗ file not found` on stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(style("✗").red()), msg);
}

/// `⚠ remote secret unavailable` on stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint(style("⚠").yellow()), msg);
}

/// `→ run: tether pull` on stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint(style("→").cyan()), paint(style(msg).cyan()));
}

/// Bold section header.
pub fn header(title: &str) {
    println!("{}", paint(style(title).bold()));
}

/// `  keys  HOSTNAME, SMTP_PASSWORD`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(style(label).dim()),
        paint(style(value.to_string()).bold())
    );
}

/// `  • SMTP_PASSWORD` on stderr, for items attached to an error or warning.
pub fn list_item(item: &str) {
    eprintln!("  • {}", item);
}

/// One line of a comparison: `  + KEY  (remote only)`.
pub fn change(marker: char, key: &str, note: &str) {
    let marker = match marker {
        '+' => paint(style(marker).green()),
        '-' => paint(style(marker).red()),
        _ => paint(style(marker).yellow()),
    };
    println!("  {} {}  {}", marker, key, paint(style(note).dim()));
}

/// Path formatted for inline use.
pub fn path(p: impl AsRef<std::path::Path>) -> String {
    paint(style(p.as_ref().display().to_string()).cyan()).to_string()
}

/// Key name formatted for inline use.
pub fn key(k: &str) -> String {
    paint(style(k).cyan()).to_string()
}
