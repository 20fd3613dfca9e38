use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use pagediff::cli::{Cli, Commands};
use pagediff::commands::compare::CompareOptions;
use pagediff::output::{self, Verbosity};
use pagediff::{AppContext, LOG_ENV, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    match run() {
        Ok(status) => process::exit(status),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Install the tracing subscriber. Logs go to stderr so they never mix
/// with rendered output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("pagediff={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Run the selected command and return the process exit status.
fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    if cli.quiet {
        output::set_verbosity(Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(Verbosity::Verbose);
    }

    match cli.command {
        Commands::Compare {
            website,
            file,
            format,
            color,
            width,
            exit_code,
        } => {
            let ctx = AppContext::new_with_pager(cli.no_pager)?;
            let options = CompareOptions {
                format: format.map(Into::into),
                color: color.map(Into::into),
                width,
            };
            let identical = commands::compare::execute(&ctx, &website, &file, &options)?;
            if exit_code && !identical {
                return Ok(1);
            }
        }
        Commands::Classify {
            website,
            file,
            side,
            json,
        } => {
            let ctx = AppContext::new_with_pager(cli.no_pager)?;
            commands::classify::execute(&ctx, &website, &file, side.into(), json)?;
        }
        Commands::Config {
            key,
            value,
            unset,
            list,
        } => {
            let mut ctx = AppContext::new_with_pager(cli.no_pager)?;
            commands::config::execute(&mut ctx, key.as_deref(), value, unset, list)?;
        }
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut io::stdout())?;
        }
    }

    Ok(0)
}
