use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use tracing::{Level, debug, span};

use super::{ComparisonView, RenderOptions};
use crate::config::parser::MIN_COLUMN_WIDTH;
use crate::engine::{ClassifiedLine, DiffType, Side, TextDocument, classify_document};
use crate::utils::{fit_column, pager, plural};

/// Separator between the two columns
const SEPARATOR: &str = " │ ";

/// Render both documents as two numbered columns.
///
/// Differing results get a header with per-side counts, highlighted rows and
/// a summary footer. Identical results get a banner followed by the website
/// text line by line, with no highlighting.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render(
    view: &ComparisonView,
    options: &RenderOptions,
    writer: &mut dyn Write,
) -> Result<()> {
    let span = span!(Level::DEBUG, "render_side_by_side");
    let _guard = span.enter();

    let layout = Layout::new(&view.website, &view.file, options.width);
    debug!(column = layout.column, gutter = layout.gutter, "Layout computed");

    if view.result.is_identical() {
        let banner = "Perfect match! No differences found. The texts are identical.";
        if options.colorize {
            writeln!(writer, "{}", banner.green().bold())?;
        } else {
            writeln!(writer, "{banner}")?;
        }
        writeln!(writer)?;

        for line in unclassified(&view.website) {
            let (cell, _) = layout.cell(Some(&line));
            writeln!(writer, "{}", cell.trim_end())?;
        }
        return Ok(());
    }

    let summary = view.summary();
    let title = format!("Found {} difference(s)", summary.total_differences);
    if options.colorize {
        writeln!(writer, "{}", title.red().bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }
    writeln!(writer)?;

    let left_header = format!(
        "website: {}, {}",
        plural(summary.removals, "removal", "removals"),
        plural(summary.website_lines, "line", "lines")
    );
    let right_header = format!(
        "file: {}, {}",
        plural(summary.additions, "addition", "additions"),
        plural(summary.file_lines, "line", "lines")
    );
    let header_width = layout.gutter + 3 + layout.column;
    let left_header = fit_column(&left_header, header_width);
    let right_header = fit_column(&right_header, header_width);
    if options.colorize {
        writeln!(
            writer,
            "{}{SEPARATOR}{}",
            left_header.red().bold(),
            right_header.green().bold()
        )?;
    } else {
        writeln!(writer, "{left_header}{SEPARATOR}{right_header}")?;
    }
    writeln!(writer, "{}", layout.rule())?;

    let left = classify_document(
        &view.website,
        Side::Website,
        &view.file,
        options.parallel_threshold,
    );
    let right = classify_document(
        &view.file,
        Side::File,
        &view.website,
        options.parallel_threshold,
    );
    write_rows(writer, &layout, &left, &right, options.colorize)?;

    writeln!(writer, "{}", layout.rule())?;
    writeln!(writer, "Summary")?;
    writeln!(writer, "  Total differences: {}", summary.total_differences)?;
    writeln!(writer, "  Website lines: {}", summary.website_lines)?;
    writeln!(writer, "  File lines: {}", summary.file_lines)?;

    Ok(())
}

/// Column geometry shared by all rows
struct Layout {
    /// Width of the line-number gutter
    gutter: usize,
    /// Width of the text part of each column
    column: usize,
}

impl Layout {
    /// Size columns for the two documents.
    ///
    /// A zero `requested` width splits the terminal width evenly.
    fn new(website: &TextDocument, file: &TextDocument, requested: usize) -> Self {
        let longest = website.line_count().max(file.line_count()).max(1);
        let gutter = longest.to_string().len();

        let column = if requested > 0 {
            requested
        } else {
            // Each side: gutter + space + marker + space + text
            let fixed = 2 * (gutter + 3) + SEPARATOR.chars().count();
            (pager::terminal_width().saturating_sub(fixed) / 2).max(MIN_COLUMN_WIDTH)
        };

        Self { gutter, column }
    }

    /// Horizontal rule spanning both columns.
    fn rule(&self) -> String {
        let side = "─".repeat(self.gutter + 3 + self.column);
        format!("{side}─┼─{side}")
    }

    /// One column cell: number, marker and fitted text; blank when `line` is `None`.
    fn cell(&self, line: Option<&ClassifiedLine<'_>>) -> (String, DiffType) {
        match line {
            Some(line) => {
                let marker = if line.is_marked() {
                    line.class.marker()
                } else {
                    ' '
                };
                (
                    format!(
                        "{:>width$} {marker} {}",
                        line.line_number,
                        fit_column(line.content, self.column),
                        width = self.gutter
                    ),
                    line.class,
                )
            }
            None => (" ".repeat(self.gutter + 3 + self.column), DiffType::Unchanged),
        }
    }
}

/// Every line of `document` with no highlight.
fn unclassified(document: &TextDocument) -> Vec<ClassifiedLine<'_>> {
    document
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| ClassifiedLine {
            line_number: index + 1,
            content: line,
            class: DiffType::Unchanged,
        })
        .collect()
}

/// Write aligned rows, pairing lines by index.
fn write_rows(
    writer: &mut dyn Write,
    layout: &Layout,
    left: &[ClassifiedLine<'_>],
    right: &[ClassifiedLine<'_>],
    colorize: bool,
) -> Result<()> {
    for index in 0..left.len().max(right.len()) {
        let (left_cell, left_class) = layout.cell(left.get(index));
        let (right_cell, right_class) = layout.cell(right.get(index));

        let left_cell = paint(left_cell, left_class, colorize);
        let right_cell = paint(right_cell, right_class, colorize);
        writeln!(writer, "{left_cell}{SEPARATOR}{}", right_cell.trim_end())?;
    }
    Ok(())
}

/// Apply the highlight color for `class`.
fn paint(cell: String, class: DiffType, colorize: bool) -> String {
    if !colorize {
        return cell;
    }
    match class {
        DiffType::Removed => cell.on_red().white().to_string(),
        DiffType::Added => cell.on_green().black().to_string(),
        DiffType::Changed => cell.yellow().to_string(),
        DiffType::Unchanged => cell,
    }
}
