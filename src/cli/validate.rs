//! Validate command - resolve secrets and check required keys.
//!
//! With `--export`, prints `export KEY='value'` lines suitable for
//! `eval "$(tether validate --export)"` in a startup script.

use tracing::debug;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::constants::SECRET_FILE_MODE;
use crate::core::domain::{Resolution, SourceDescriptor};
use crate::core::resolver::Resolver;
use crate::core::validate::has_file_mode;
use crate::error::Result;

pub fn execute(ctx: &Context, require: &[String], export: bool) -> Result<()> {
    let resolution = resolve(ctx, require)?;

    if export {
        print_exports(&resolution);
        return Ok(());
    }

    output::success(&format!(
        "{} keys resolved from {}",
        resolution.map().len(),
        resolution.source()
    ));
    let keys: Vec<&str> = resolution.map().keys().collect();
    output::kv("keys", keys.join(", "));
    Ok(())
}

/// Run the resolver and report degradations on stderr.
///
/// # Errors
///
/// The fallback load error, or `MissingKeys` listing every missing key.
pub(crate) fn resolve(ctx: &Context, require: &[String]) -> Result<Resolution> {
    let settings = ctx.settings();
    let required = ctx.required(require)?;
    let store = ctx.store_or_unavailable()?;

    let mut resolver = Resolver::new(store.as_ref(), &settings.env_file).required(required);
    if let Some(name) = &settings.secret_name {
        resolver = resolver.remote(name.as_str(), settings.region.as_str());
    }

    let report = resolver.run();
    debug!(trail = ?report.trail(), "resolution finished");

    if let Some(e) = report.remote_error() {
        output::warn(&format!(
            "remote secret unavailable ({}), using {}",
            e,
            output::path(&settings.env_file)
        ));
        if let Some(hint) = e.hint() {
            output::hint(&hint);
        }
    }

    if let Some(SourceDescriptor::LocalFile(path)) = report.source() {
        if let Ok(false) = has_file_mode(path, SECRET_FILE_MODE) {
            output::warn(&format!(
                "{} is readable by other users",
                output::path(path)
            ));
            output::hint(&format!("run: chmod 600 {}", path.display()));
        }
    }

    report.into_result()
}

fn print_exports(resolution: &Resolution) {
    for (key, value) in resolution.map().iter() {
        if !is_shell_name(key) {
            output::warn(&format!("skipping {}: not a shell variable name", key));
            continue;
        }
        println!("export {}={}", key, shell_quote(value));
    }
}

fn is_shell_name(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Single-quote `value` for POSIX shells.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
