//! Per-line highlight classification for renderers.
//!
//! This is a looser test than [`compare`](super::compare): a line is left
//! unmarked when the opposite document contains it exactly, or when it
//! contains (or is contained by) some opposite line. Renderers use it to pick
//! a highlight class for every displayed line. It never changes the
//! authoritative [`ComparisonResult`](super::ComparisonResult).

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{Level, debug, span};

use super::document::{LineSet, TextDocument, normalize_line};
use super::result::DiffType;
use crate::utils::thread_pool;

/// Which input a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Document A, the text extracted from a web page
    Website,
    /// Document B, the text of the uploaded file
    File,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Website => Self::File,
            Self::File => Self::Website,
        }
    }

    /// Class given to a line of this side that has no counterpart.
    #[must_use]
    pub const fn marked_class(self) -> DiffType {
        match self {
            Self::Website => DiffType::Removed,
            Self::File => DiffType::Added,
        }
    }

    /// Lowercase side name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::File => "file",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify one line of `side` against the opposite document's line set.
///
/// Returns [`DiffType::Unchanged`] when the line should not be highlighted,
/// otherwise the side's marked class (`Removed` for the website side,
/// `Added` for the file side).
#[must_use]
pub fn classify_line(line: &str, side: Side, opposite: &LineSet) -> DiffType {
    let normalized = normalize_line(line);

    if opposite.contains_normalized(&normalized) || opposite.overlaps_normalized(&normalized) {
        DiffType::Unchanged
    } else {
        side.marked_class()
    }
}

/// A displayed line with its highlight class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedLine<'a> {
    /// 1-based position in its document
    pub line_number: usize,
    /// Raw line content
    pub content: &'a str,
    /// `Unchanged`, or the side's marked class
    pub class: DiffType,
}

impl ClassifiedLine<'_> {
    /// Whether the renderer should highlight this line.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.class != DiffType::Unchanged
    }
}

/// Classify every line of `document` against `opposite`.
///
/// Documents with at least `parallel_threshold` lines are classified on the
/// shared rayon pool; output order is document order either way.
#[must_use]
pub fn classify_document<'a>(
    document: &'a TextDocument,
    side: Side,
    opposite: &TextDocument,
    parallel_threshold: usize,
) -> Vec<ClassifiedLine<'a>> {
    let span = span!(
        Level::DEBUG,
        "classify_document",
        side = %side,
        lines = document.line_count()
    );
    let _guard = span.enter();

    let opposite_set = opposite.line_set();
    let classify = |(index, line): (usize, &'a String)| ClassifiedLine {
        line_number: index + 1,
        content: line.as_str(),
        class: classify_line(line, side, &opposite_set),
    };

    let parallel = document.line_count() >= parallel_threshold;
    debug!(parallel, "Classifying lines");

    if parallel {
        thread_pool::run_in_pool(|| {
            document
                .lines()
                .par_iter()
                .enumerate()
                .map(classify)
                .collect()
        })
    } else {
        document.lines().iter().enumerate().map(classify).collect()
    }
}
