use tracing::{Level, debug, info, span};

use super::document::{LineSet, TextDocument, normalize_line};
use super::result::{ComparisonResult, DiffRecord};

/// Compare two text bodies line by line.
///
/// `text_a` is the website side, `text_b` the file side. The comparison is a
/// set-membership diff: a line is reported only when its normalized form
/// appears nowhere in the other document. Lines that merely moved are not
/// differences, so `"a\nb"` and `"b\na"` compare identical.
///
/// Records come out in line-index order. When both sides produce a record at
/// the same index the `removed` one comes first. `line_number` is the 1-based
/// index in the record's own document.
///
/// Never fails: empty strings are zero-line documents.
///
/// # Examples
///
/// ```
/// use pagediff::engine::{DiffType, compare};
///
/// let result = compare("a\nb\nc", "a\nc");
/// assert_eq!(result.total_differences(), 1);
/// assert_eq!(result.diffs()[0].diff_type, DiffType::Removed);
/// assert_eq!(result.diffs()[0].line_number, 2);
/// ```
#[must_use]
pub fn compare(text_a: &str, text_b: &str) -> ComparisonResult {
    let website = TextDocument::parse(text_a);
    let file = TextDocument::parse(text_b);
    compare_documents(&website, &file)
}

/// Compare two already split documents. See [`compare`].
#[must_use]
pub fn compare_documents(website: &TextDocument, file: &TextDocument) -> ComparisonResult {
    let span = span!(
        Level::DEBUG,
        "compare",
        website_lines = website.line_count(),
        file_lines = file.line_count()
    );
    let _guard = span.enter();

    if website.normalized() == file.normalized() {
        debug!("Documents equal after normalization");
        return ComparisonResult::identical();
    }

    let website_set = website.line_set();
    let file_set = file.line_set();
    let diffs = membership_records(website, &website_set, file, &file_set);

    let result = ComparisonResult::from_diffs(diffs);
    info!(
        differences = result.total_differences(),
        removed = result.removed_count(),
        added = result.added_count(),
        "Comparison complete"
    );
    result
}

/// Walk both documents index by index and emit a record for every line
/// missing from the opposite document's set.
fn membership_records(
    website: &TextDocument,
    website_set: &LineSet,
    file: &TextDocument,
    file_set: &LineSet,
) -> Vec<DiffRecord> {
    let rows = website.line_count().max(file.line_count());
    let mut diffs = Vec::new();

    for index in 0..rows {
        let line_number = index + 1;

        if let Some(line) = website.line(index)
            && !file_set.contains_normalized(&normalize_line(line))
        {
            diffs.push(DiffRecord::removed(line, line_number));
        }

        if let Some(line) = file.line(index)
            && !website_set.contains_normalized(&normalize_line(line))
        {
            diffs.push(DiffRecord::added(line, line_number));
        }
    }

    diffs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DiffType;

    #[test]
    fn test_identical_texts() {
        let result = compare("line1\nline2", "line1\nline2");
        assert!(result.is_identical());
        assert!(result.diffs().is_empty());
    }

    #[test]
    fn test_same_index_removed_before_added() {
        let result = compare("old", "new");
        let types: Vec<_> = result.diffs().iter().map(|d| d.diff_type).collect();
        assert_eq!(types, vec![DiffType::Removed, DiffType::Added]);
        assert!(result.diffs().iter().all(|d| d.line_number == 1));
    }

    #[test]
    fn test_records_keep_raw_content() {
        let result = compare("  Keep Me  ", "other");
        assert_eq!(result.diffs()[0].source_line.as_deref(), Some("  Keep Me  "));
        assert_eq!(result.diffs()[1].target_line.as_deref(), Some("other"));
    }

    #[test]
    fn test_duplicates_do_not_count() {
        assert!(compare("a\na\na", "a").is_identical());
    }

    #[test]
    fn test_whitespace_only_texts() {
        let result = compare("   ", "\t");
        assert!(result.is_identical());
    }

    #[test]
    fn test_longer_file_side() {
        let result = compare("x", "x\ny\nz");
        let numbers: Vec<_> = result.diffs().iter().map(|d| d.line_number).collect();
        assert_eq!(numbers, vec![2, 3]);
        assert_eq!(result.added_count(), 2);
    }
}
