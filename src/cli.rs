//! Command-line interface definitions for pagediff.
//!
//! This module contains all CLI argument parsing structures using clap's derive macros.
//! The CLI definitions are shared between the main binary and build tools (like xtask)
//! for man page generation.
//!
//! Note: Field-level documentation is provided via clap attributes (#[arg(help = "...")]),
//! so we allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::{ColorMode, OutputFormat};
use crate::engine::Side;

/// Main CLI structure for pagediff.
#[derive(Parser)]
#[command(
    name = "pagediff",
    version = crate::VERSION,
    about = "Compare web page text with a local text file",
    long_about = "Line-oriented comparison of text extracted from a web page against a local \
                  file. Lines match regardless of letter case and surrounding whitespace, and \
                  a line only counts as different when it appears nowhere on the other side."
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable pager output
    #[arg(long, global = true, help = "Disable pager output")]
    pub no_pager: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compare website text with file text
    Compare {
        /// Website text file, or - for stdin
        website: String,

        /// Local text file, or - for stdin
        file: String,

        /// Output format (defaults to display.format)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// When to use colors (defaults to display.color)
        #[arg(long, value_enum)]
        color: Option<ColorArg>,

        /// Column width for the side-by-side view (0 fits the terminal)
        #[arg(short, long)]
        width: Option<usize>,

        /// Exit with status 1 when the texts differ
        #[arg(long)]
        exit_code: bool,
    },

    /// Show which lines of one side would be highlighted
    Classify {
        /// Website text file, or - for stdin
        website: String,

        /// Local text file, or - for stdin
        file: String,

        /// Side whose lines are listed
        #[arg(short, long, value_enum, default_value_t = SideArg::Website)]
        side: SideArg,

        /// Print classified lines as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get and set configuration options
    Config {
        /// Configuration key
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// Unset the configuration key
        #[arg(long)]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    SideBySide,
    Records,
    Unified,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::SideBySide => Self::SideBySide,
            FormatArg::Records => Self::Records,
            FormatArg::Unified => Self::Unified,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

impl From<ColorArg> for ColorMode {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Website,
    File,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Website => Self::Website,
            SideArg::File => Self::File,
        }
    }
}
