pub mod parser;
pub mod validator;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Largest accepted input file by default (16 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// How comparison results are rendered
    #[serde(default)]
    pub display: DisplayConfig,

    /// Limits applied to input files before comparison
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CoreConfig {
    #[serde(default)]
    pub pager: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub color: ColorMode,
    /// Column width for the side-by-side view, 0 fits the terminal
    #[serde(default)]
    pub width: usize,
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
    #[serde(default)]
    pub algorithm: DiffAlgorithm,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
    /// Line count at which highlight classification runs on the thread pool
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,
}

/// Rendering of a comparison result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Two numbered columns with highlighted lines
    #[default]
    SideBySide,
    /// One line per diff record
    Records,
    /// Git-style unified view
    Unified,
    /// JSON payload
    Json,
}

/// When to emit ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

/// Sequence diff algorithm for the unified view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: ColorMode::default(),
            width: 0,
            context_lines: default_context_lines(),
            algorithm: DiffAlgorithm::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
            parallel_threshold: default_parallel_threshold(),
            mmap_threshold: default_mmap_threshold(),
        }
    }
}

impl OutputFormat {
    /// Name as written in the config file and on the command line
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SideBySide => "side-by-side",
            Self::Records => "records",
            Self::Unified => "unified",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "side-by-side" => Ok(Self::SideBySide),
            "records" => Ok(Self::Records),
            "unified" => Ok(Self::Unified),
            "json" => Ok(Self::Json),
            _ => Err(anyhow::anyhow!("Invalid output format: {s}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            _ => Err(anyhow::anyhow!("Invalid color mode: {s}")),
        }
    }
}

impl FromStr for DiffAlgorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "myers" => Ok(Self::Myers),
            "patience" => Ok(Self::Patience),
            _ => Err(anyhow::anyhow!("Invalid diff algorithm: {s}")),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or out-of-range values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            // Create default config if it doesn't exist
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return None;
        }

        match (parts[0], parts[1]) {
            ("core", "pager") => self.core.pager.clone(),
            ("display", "format") => Some(self.display.format.to_string()),
            ("display", "color") => Some(format!("{:?}", self.display.color).to_lowercase()),
            ("display", "width") => Some(self.display.width.to_string()),
            ("display", "context_lines") => Some(self.display.context_lines.to_string()),
            ("display", "algorithm") => {
                Some(format!("{:?}", self.display.algorithm).to_lowercase())
            }
            ("input", "max_file_size") => Some(self.input.max_file_size.to_string()),
            ("input", "allowed_extensions") => Some(self.input.allowed_extensions.join(",")),
            ("performance", "parallel_threads") => {
                Some(self.performance.parallel_threads.to_string())
            }
            ("performance", "parallel_threshold") => {
                Some(self.performance.parallel_threshold.to_string())
            }
            ("performance", "mmap_threshold") => Some(self.performance.mmap_threshold.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown
    /// - The value is invalid for the key
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("core", "pager") => self.core.pager = Some(value),
            ("display", "format") => self.display.format = value.parse()?,
            ("display", "color") => self.display.color = value.parse()?,
            ("display", "width") => {
                let width: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if width != 0 && width < parser::MIN_COLUMN_WIDTH {
                    return Err(anyhow::anyhow!(
                        "Column width must be 0 or at least {}",
                        parser::MIN_COLUMN_WIDTH
                    ));
                }
                self.display.width = width;
            }
            ("display", "context_lines") => {
                let lines: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if lines > parser::MAX_CONTEXT_LINES {
                    return Err(anyhow::anyhow!(
                        "Context lines cannot exceed {}",
                        parser::MAX_CONTEXT_LINES
                    ));
                }
                self.display.context_lines = lines;
            }
            ("display", "algorithm") => self.display.algorithm = value.parse()?,
            ("input", "max_file_size") => {
                let size: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if size == 0 {
                    return Err(anyhow::anyhow!("Maximum file size must be at least 1 byte"));
                }
                self.input.max_file_size = size;
            }
            ("input", "allowed_extensions") => {
                self.input.allowed_extensions = value
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
            }
            ("performance", "parallel_threads") => {
                let threads: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if threads == 0 {
                    return Err(anyhow::anyhow!("Parallel threads must be at least 1"));
                }
                self.performance.parallel_threads = threads;
            }
            ("performance", "parallel_threshold") => {
                self.performance.parallel_threshold = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            ("performance", "mmap_threshold") => {
                self.performance.mmap_threshold = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// Unset a configuration value by key
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key format is invalid (must be section.key)
    /// - The key is unknown or cannot be unset
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        if parts.len() != 2 {
            return Err(anyhow::anyhow!("Invalid configuration key: {key}"));
        }

        match (parts[0], parts[1]) {
            ("core", "pager") => self.core.pager = None,
            _ => return Err(anyhow::anyhow!("Cannot unset configuration key: {key}")),
        }
        Ok(())
    }
}

// Default functions for serde
const fn default_context_lines() -> usize {
    3
}

const fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["txt".to_string()]
}

fn default_parallel_threads() -> usize {
    num_cpus::get().min(8)
}

const fn default_parallel_threshold() -> usize {
    2_000
}

const fn default_mmap_threshold() -> u64 {
    1_048_576 // 1MB
}
