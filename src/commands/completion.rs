use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

/// Write a shell completion script for `shell` to `writer`
///
/// # Errors
///
/// Returns an error if flushing the writer fails.
pub fn execute(shell: Shell, writer: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, writer);
    writer.flush()?;
    Ok(())
}
