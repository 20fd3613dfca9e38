#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)] // Line counters and indices cannot overflow
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # pagediff - Web Page Text vs. File Comparison
//!
//! pagediff compares text extracted from a web page with the text of a local
//! file and reports, line by line, what is missing on either side.
//!
//! ## Features
//!
//! - **Set-membership diff**: a line counts as different only when it appears
//!   nowhere in the other text, so reordered content is not noise
//! - **Forgiving equality**: letter case and surrounding whitespace are ignored
//! - **Deterministic results**: ordered records with stable line numbers and a
//!   JSON payload compatible with existing consumers
//! - **Terminal views**: side-by-side with fuzzy highlighting, record list,
//!   unified hunks
//!
//! ## Architecture
//!
//! - [`engine`]: the diff engine (pure, synchronous)
//! - [`source`]: loading and validating the two input texts
//! - [`render`]: presentation of comparison results
//! - [`commands`]: CLI command implementations
//! - [`config`]: configuration parsing and validation
//! - [`output`]: status messages and color control
//! - [`utils`]: pager, thread pool and layout helpers
//!
//! ## Example Usage
//!
//! ```
//! use pagediff::engine::compare;
//!
//! let result = compare("Welcome\nPricing\nContact", "welcome\ncontact");
//! assert!(!result.is_identical());
//! assert_eq!(result.removed_count(), 1);
//! assert_eq!(result.diffs()[0].source_line.as_deref(), Some("Pricing"));
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Line-oriented text diff engine.
pub mod engine;

/// Status messages and color control.
pub mod output;

/// Result renderers (side-by-side, records, unified, JSON).
pub mod render;

/// Input loading and boundary validation.
pub mod source;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the pagediff binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/pagediff/config";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "PAGEDIFF_CONFIG_PATH";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PAGEDIFF_LOG";

/// Settings shared by every command.
///
/// Holds only configuration; the texts being compared are always passed
/// explicitly to the commands that need them.
///
/// # Examples
///
/// ```no_run
/// use pagediff::AppContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Context with the default config location
/// let ctx = AppContext::new()?;
///
/// // Context with an explicit config file (for testing)
/// let ctx = AppContext::new_explicit("/tmp/pagediff/config".into())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,

    /// Whether to disable pager output for command results.
    pub no_pager: bool,
}

impl AppContext {
    /// Creates a new `AppContext` by loading the configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the configuration
    /// file cannot be read or created.
    pub fn new() -> Result<Self> {
        Self::new_with_pager(false)
    }

    /// Creates a new `AppContext` with an option to disable pager functionality.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the configuration
    /// file cannot be read or created.
    pub fn new_with_pager(no_pager: bool) -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&config_path) {
            output::warning(&format!("Configuration validation failed: {e}"));
        }

        if let Err(e) = utils::thread_pool::configure_from_config(&config) {
            output::warning(&format!("Failed to configure thread pool: {e}"));
        }

        Ok(Self {
            config_path,
            config,
            no_pager,
        })
    }

    /// Creates a new `AppContext` from an explicit config path with the pager disabled.
    ///
    /// The thread pool is left at its defaults.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
            no_pager: true,
        })
    }
}
