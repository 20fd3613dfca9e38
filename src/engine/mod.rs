//! Line-oriented text diff engine.
//!
//! The engine compares a website-extracted text (side A) with an uploaded file
//! text (side B):
//! - Line splitting with a single line-ending policy ([`TextDocument`])
//! - Case- and surrounding-whitespace-insensitive line equality
//! - Set-membership diff producing ordered [`DiffRecord`]s ([`compare`])
//! - Fuzzy per-line highlight classification for renderers ([`classify`])
//!
//! Everything here is pure and synchronous. Comparisons share no state.

/// Highlight classification used by renderers
pub mod classify;
/// Set-membership comparison
pub mod compare;
/// Line splitting and the equality policy
pub mod document;
/// Comparison result types
pub mod result;

pub use classify::{ClassifiedLine, Side, classify_document, classify_line};
pub use compare::{compare, compare_documents};
pub use document::{LineSet, TextDocument, lines_equal, normalize_line};
pub use result::{ComparisonResult, ComparisonSummary, DiffRecord, DiffType};
