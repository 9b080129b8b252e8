//! Completions command - print a shell completion script for `tether`.
//!
//! The script is rendered into memory before anything reaches stdout, so a
//! closed pipe (`tether completions zsh | head`) surfaces as an I/O error
//! instead of a panic inside the generator.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;
use tracing::debug;

use crate::cli::Cli;
use crate::error::Result;

pub fn execute(shell: Shell) -> Result<()> {
    let script = render(shell);
    debug!(%shell, bytes = script.len(), "generated completions");

    let mut stdout = io::stdout().lock();
    stdout.write_all(&script)?;
    stdout.flush()?;
    Ok(())
}

/// Completion script for `shell`, named after the binary.
pub fn render(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut cmd, bin, &mut script);
    script
}
