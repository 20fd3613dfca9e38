//! Presentation of comparison results.
//!
//! Renderers consume a [`ComparisonView`] and write to any [`Write`]:
//! - [`side_by_side`]: two numbered columns, highlights from the fuzzy classifier
//! - [`records`]: one line per diff record
//! - [`unified`]: git-style hunks for reading context
//! - JSON: the serialized [`ComparisonResult`]
//!
//! Only the diff records decide whether and how much the texts differ.
//! Highlighting and hunks are display aids layered on top.

/// Diff record list
pub mod records;
/// Side-by-side column view
pub mod side_by_side;
/// Unified hunk view
pub mod unified;

use anyhow::Result;
use similar::Algorithm;
use std::io::Write;

use crate::config::{Config, DiffAlgorithm, OutputFormat};
use crate::engine::{ComparisonResult, ComparisonSummary, TextDocument, compare_documents};

/// Both documents of a comparison together with its result
#[derive(Debug, Clone)]
pub struct ComparisonView {
    /// Document A
    pub website: TextDocument,
    /// Document B
    pub file: TextDocument,
    /// Authoritative result
    pub result: ComparisonResult,
}

impl ComparisonView {
    /// Split both texts and compare them.
    #[must_use]
    pub fn new(website_text: &str, file_text: &str) -> Self {
        let website = TextDocument::parse(website_text);
        let file = TextDocument::parse(file_text);
        let result = compare_documents(&website, &file);
        Self {
            website,
            file,
            result,
        }
    }

    /// Display aggregates for this comparison.
    #[must_use]
    pub fn summary(&self) -> ComparisonSummary {
        self.result.summary(&self.website, &self.file)
    }
}

/// Settings shared by all renderers
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Which renderer to use
    pub format: OutputFormat,
    /// Emit ANSI colors
    pub colorize: bool,
    /// Side-by-side column width; 0 fits the terminal
    pub width: usize,
    /// Unified-view context radius
    pub context_lines: usize,
    /// Unified-view sequence algorithm
    pub algorithm: Algorithm,
    /// Line count at which classification goes parallel
    pub parallel_threshold: usize,
}

impl RenderOptions {
    /// Options from the `[display]` and `[performance]` config sections.
    #[must_use]
    pub fn from_config(config: &Config, colorize: bool) -> Self {
        Self {
            format: config.display.format,
            colorize,
            width: config.display.width,
            context_lines: config.display.context_lines,
            algorithm: config_to_algorithm(config.display.algorithm),
            parallel_threshold: config.performance.parallel_threshold,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default(), false)
    }
}

/// Convert `DiffAlgorithm` config enum to `similar::Algorithm`
#[must_use]
pub const fn config_to_algorithm(algo: DiffAlgorithm) -> Algorithm {
    match algo {
        DiffAlgorithm::Myers => Algorithm::Myers,
        DiffAlgorithm::Patience => Algorithm::Patience,
    }
}

/// Render `view` in the configured format.
///
/// # Errors
///
/// Returns an error if writing fails or JSON serialization fails.
pub fn render(
    view: &ComparisonView,
    options: &RenderOptions,
    writer: &mut dyn Write,
) -> Result<()> {
    match options.format {
        OutputFormat::SideBySide => side_by_side::render(view, options, writer),
        OutputFormat::Records => records::render(view, options, writer),
        OutputFormat::Unified => unified::render(view, options, writer),
        OutputFormat::Json => render_json(&view.result, writer),
    }
}

/// Write the result as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render_json(result: &ComparisonResult, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// Render into a `String`.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn render_to_string(view: &ComparisonView, options: &RenderOptions) -> Result<String> {
    let mut buffer = Vec::new();
    render(view, options, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
