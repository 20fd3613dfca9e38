use anyhow::{Context, Result, bail};
use command_group::{CommandGroup, GroupChild};
use std::env;
use std::io::{self, IsTerminal, Write};
use std::process::{Command, Stdio};
use tracing::{Level, debug, span};

/// Get the pager command using Git's priority order
#[must_use]
pub fn get_pager(ctx: Option<&crate::AppContext>) -> String {
    // 1. Check PAGEDIFF_PAGER environment variable
    if let Ok(pager) = env::var("PAGEDIFF_PAGER") {
        return pager;
    }

    // 2. Check core.pager config (if context available)
    if let Some(ctx) = ctx
        && let Some(pager) = ctx.config.core.pager.as_ref()
    {
        return pager.clone();
    }

    // 3. Check PAGER environment variable
    if let Ok(pager) = env::var("PAGER") {
        return pager;
    }

    // 4. Default to less with Git-style flags
    if which::which("less").is_ok() {
        "less -FRX".to_string()
    } else if which::which("more").is_ok() {
        "more".to_string()
    } else {
        "cat".to_string()
    }
}

/// Parse a pager command string into program and arguments
///
/// Handles shell-like quoting, e.g. `bat --theme='Monokai Extended'`.
///
/// # Errors
///
/// Returns an error if the command has unbalanced quotes or is empty
pub fn parse_pager_command(cmd: &str) -> Result<(String, Vec<String>)> {
    let span = span!(Level::DEBUG, "parse_pager_command", cmd);
    let _guard = span.enter();

    let parts = shell_words::split(cmd)
        .with_context(|| format!("Invalid pager command syntax: '{cmd}'"))?;

    let Some((program, args)) = parts.split_first() else {
        bail!("Empty pager command");
    };

    debug!(program = %program, args = ?args, "Pager command parsed");
    Ok((program.clone(), args.to_vec()))
}

/// Output content through a pager if appropriate, with Git-style behavior
///
/// Content is printed directly when paging is disabled, stdout is not a
/// terminal, or the content fits on one screen.
///
/// # Errors
///
/// Returns an error if writing to stdout or to the pager's stdin fails
pub fn output_through_pager(
    content: &str,
    use_pager: bool,
    ctx: Option<&crate::AppContext>,
) -> Result<()> {
    if env::var("NO_PAGER").is_ok() || !use_pager || !io::stdout().is_terminal() {
        return print_direct(content);
    }

    let line_count = content.lines().count();
    if line_count < terminal_height().saturating_sub(1) {
        return print_direct(content);
    }

    let pager_cmd = get_pager(ctx);
    let (pager, args) = match parse_pager_command(&pager_cmd) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "Falling back to direct output");
            return print_direct(content);
        }
    };

    let mut group = match Command::new(&pager)
        .args(&args)
        .stdin(Stdio::piped())
        .group_spawn()
    {
        Ok(group) => group,
        Err(e) => {
            debug!(error = %e, pager = %pager, "Failed to spawn pager, printing directly");
            return print_direct(content);
        }
    };

    let Some(stdin) = group.inner().stdin.take() else {
        let _ = group.kill();
        let _ = group.wait();
        return print_direct(content);
    };

    pipe_to_pager(&mut group, stdin, content)
}

/// Feed `content` to a spawned pager and wait for it to exit.
///
/// A pager quit early (broken pipe) is not an error. On any other write
/// failure the pager's process group is killed and reaped before the error
/// is returned.
fn pipe_to_pager(group: &mut GroupChild, mut stdin: impl Write, content: &str) -> Result<()> {
    let written = stdin
        .write_all(content.as_bytes())
        .and_then(|()| stdin.flush());
    drop(stdin);

    match written {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
            let _ = group.kill();
            let _ = group.wait();
            Err(anyhow::Error::new(e).context("Failed to write to pager"))
        }
        _ => {
            let status = group.wait().context("Failed to wait for pager process")?;
            debug!(exit_code = ?status.code(), "Pager finished");
            Ok(())
        }
    }
}

/// Print content to stdout and flush.
fn print_direct(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Terminal height, defaulting to 24 if unknown
#[must_use]
pub fn terminal_height() -> usize {
    match crossterm::terminal::size() {
        Ok((_, rows)) if rows > 0 => usize::from(rows),
        _ => 24,
    }
}

/// Terminal width, defaulting to 80 if unknown
#[must_use]
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => usize::from(cols),
        _ => 80,
    }
}

/// Builder for pager output
pub struct PagerOutput<'a> {
    /// Accumulated content to be displayed
    content: String,
    /// Whether to use a pager for output
    use_pager: bool,
    /// Optional context for accessing configuration
    ctx: Option<&'a crate::AppContext>,
}

impl<'a> PagerOutput<'a> {
    /// Create a new pager output builder for the given context
    #[must_use]
    pub const fn new(ctx: &'a crate::AppContext, no_pager: bool) -> Self {
        Self {
            content: String::new(),
            use_pager: !no_pager,
            ctx: Some(ctx),
        }
    }

    /// Append text (no newline added)
    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Append text followed by a newline
    pub fn appendln(&mut self, text: &str) {
        self.content.push_str(text);
        self.content.push('\n');
    }

    /// Display the accumulated content through the configured pager
    ///
    /// # Errors
    ///
    /// Returns an error if output fails
    pub fn show(self) -> Result<()> {
        output_through_pager(&self.content, self.use_pager, self.ctx)
    }
}
