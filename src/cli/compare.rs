//! Compare command - show drift between the remote secret and the local file.

use crate::cli::context::Context;
use crate::cli::{output, SyncFlags};
use crate::core::domain::ComparisonReport;
use crate::core::sync;
use crate::error::Result;

/// Compare is read-only; `flags` are accepted for symmetry and ignored.
pub fn execute(ctx: &Context, _flags: SyncFlags, values: bool) -> Result<()> {
    let settings = ctx.settings();
    let name = settings.require_secret_name()?;

    let store = ctx.store()?;
    let report = sync::compare(
        store.as_ref(),
        name,
        &settings.region,
        &settings.env_file,
        values,
    )?;

    if report.is_in_sync() {
        output::success(&format!(
            "{} and {} are in sync",
            output::key(name),
            output::path(&settings.env_file)
        ));
        return Ok(());
    }

    output::header(&format!(
        "{} vs {}",
        name,
        settings.env_file.display()
    ));
    print_report(&report, "remote", "local");
    Ok(())
}

/// Print one line per differing key. `a` and `b` name the report's sides.
pub(crate) fn print_report(report: &ComparisonReport, a: &str, b: &str) {
    for key in report.only_in_a() {
        output::change('-', key, &format!("({} only)", a));
    }
    for key in report.only_in_b() {
        output::change('+', key, &format!("({} only)", b));
    }
    for key in report.differing() {
        output::change('~', key, "(value differs)");
    }
}
