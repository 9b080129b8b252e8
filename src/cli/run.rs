//! Run command.
//!
//! Resolves and validates secrets, then executes a command with them in its
//! environment.

use std::process::Command;

use tracing::info;

use crate::cli::context::Context;
use crate::core::export::to_process_environment;
use crate::error::{Error, Result};

/// Run `command` with resolved secrets and exit with its status.
pub fn execute(ctx: &Context, require: &[String], command: &[String]) -> Result<()> {
    let exit_code = run_with_secrets(ctx, require, command)?;
    std::process::exit(exit_code);
}

fn run_with_secrets(ctx: &Context, require: &[String], command: &[String]) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::InvalidArgument("no command specified".to_string()))?;

    let resolution = super::validate::resolve(ctx, require)?;
    let program_path = which::which(program).map_err(|_| Error::MissingTool(program.clone()))?;

    info!(
        program = program.as_str(),
        keys = resolution.map().len(),
        source = %resolution.source(),
        "running command"
    );

    let mut cmd = Command::new(program_path);
    cmd.args(args);
    to_process_environment(resolution.map(), &mut cmd)?;
    drop(resolution);

    let status = cmd.status()?;
    // Killed by a signal: no code, report failure.
    Ok(status.code().unwrap_or(1))
}
