//! Splitting of the configured `tmux_command`

use anyhow::{Context, Result, bail};

/// Split `tmux_command` into the tmux program and its leading arguments.
///
/// Quoting follows Unix shell rules, but the result is run directly and never
/// handed to a shell.
pub fn parse_command_line(command_line: &str) -> Result<Vec<String>> {
    let trimmed = command_line.trim();
    if trimmed.is_empty() {
        bail!("tmux_command is empty");
    }

    let argv = shell_words::split(trimmed)
        .with_context(|| format!("Failed to split tmux_command {trimmed:?}"))?;
    if argv.is_empty() {
        bail!("tmux_command names no program");
    }

    Ok(argv)
}
