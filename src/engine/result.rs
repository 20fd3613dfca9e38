use serde::Serialize;
use std::fmt;

use super::document::TextDocument;

/// Kind of a diff record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    /// Line present only in the file (B) side
    Added,
    /// Line present only in the website (A) side
    Removed,
    /// Line present on both sides
    Unchanged,
    /// Same-position substitution, reserved for line-aligned renderings
    Changed,
}

impl DiffType {
    /// Lowercase name as used in the JSON payload
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
        }
    }

    /// Single-character marker used by the plain-text renderers
    #[must_use]
    pub const fn marker(&self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Unchanged => ' ',
            Self::Changed => '~',
        }
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One reported unit of difference.
///
/// `line_number` is 1-based and always refers to the document the line came
/// from: the website side for `removed`, the file side for `added`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    /// Record kind
    #[serde(rename = "type")]
    pub diff_type: DiffType,
    /// Line content from the website (A) side
    #[serde(rename = "website")]
    pub source_line: Option<String>,
    /// Line content from the file (B) side
    #[serde(rename = "file")]
    pub target_line: Option<String>,
    /// 1-based display position
    pub line_number: usize,
}

impl DiffRecord {
    /// A line found only on the website side.
    #[must_use]
    pub fn removed(line: &str, line_number: usize) -> Self {
        Self {
            diff_type: DiffType::Removed,
            source_line: Some(line.to_owned()),
            target_line: None,
            line_number,
        }
    }

    /// A line found only on the file side.
    #[must_use]
    pub fn added(line: &str, line_number: usize) -> Self {
        Self {
            diff_type: DiffType::Added,
            source_line: None,
            target_line: Some(line.to_owned()),
            line_number,
        }
    }

    /// The line content this record is about, whichever side it lives on.
    #[must_use]
    pub fn content(&self) -> &str {
        self.source_line
            .as_deref()
            .or(self.target_line.as_deref())
            .unwrap_or_default()
    }
}

/// Outcome of comparing two documents.
///
/// Fields are private so that `identical`, `total_differences` and `diffs`
/// cannot drift apart: the only constructor derives the first two from the
/// third.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// True iff `diffs` is empty
    identical: bool,
    /// Always `diffs.len()`
    total_differences: usize,
    /// Records in line-index order
    #[serde(rename = "simple_diffs")]
    diffs: Vec<DiffRecord>,
}

impl ComparisonResult {
    /// Build a result from an ordered list of records.
    #[must_use]
    pub fn from_diffs(diffs: Vec<DiffRecord>) -> Self {
        Self {
            identical: diffs.is_empty(),
            total_differences: diffs.len(),
            diffs,
        }
    }

    /// Result for two documents that are the same under the equality policy.
    #[must_use]
    pub fn identical() -> Self {
        Self::from_diffs(Vec::new())
    }

    /// Whether the documents compared equal.
    #[must_use]
    pub const fn is_identical(&self) -> bool {
        self.identical
    }

    /// Number of records; always equal to `diffs().len()`.
    #[must_use]
    pub const fn total_differences(&self) -> usize {
        self.total_differences
    }

    /// Records in line-index order.
    #[must_use]
    pub fn diffs(&self) -> &[DiffRecord] {
        &self.diffs
    }

    /// Count of records with the given type.
    #[must_use]
    pub fn count(&self, diff_type: DiffType) -> usize {
        self.diffs
            .iter()
            .filter(|record| record.diff_type == diff_type)
            .count()
    }

    /// Count of `added` records.
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.count(DiffType::Added)
    }

    /// Count of `removed` records.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.count(DiffType::Removed)
    }

    /// Aggregate counts for display next to the two documents.
    #[must_use]
    pub fn summary(&self, website: &TextDocument, file: &TextDocument) -> ComparisonSummary {
        ComparisonSummary {
            website_lines: website.line_count(),
            file_lines: file.line_count(),
            removals: self.removed_count(),
            additions: self.added_count(),
            total_differences: self.total_differences,
        }
    }
}

/// Display aggregates over a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonSummary {
    /// Lines in the website document
    pub website_lines: usize,
    /// Lines in the file document
    pub file_lines: usize,
    /// Number of `removed` records
    pub removals: usize,
    /// Number of `added` records
    pub additions: usize,
    /// Total number of records
    pub total_differences: usize,
}
