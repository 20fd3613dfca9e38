use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use super::{ComparisonView, RenderOptions};
use crate::engine::{DiffRecord, DiffType};
use crate::utils::plural;

/// Render one line per diff record followed by a summary line.
///
/// Line numbers are padded to the widest number in the list.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render(
    view: &ComparisonView,
    options: &RenderOptions,
    writer: &mut dyn Write,
) -> Result<()> {
    let result = &view.result;

    if result.is_identical() {
        writeln!(writer, "No differences found")?;
        return Ok(());
    }

    let width = result
        .diffs()
        .iter()
        .map(|record| record.line_number.to_string().len())
        .max()
        .unwrap_or(1);

    for record in result.diffs() {
        let line = format_record(record, width);
        if options.colorize {
            match record.diff_type {
                DiffType::Removed => writeln!(writer, "{}", line.red())?,
                DiffType::Added => writeln!(writer, "{}", line.green())?,
                _ => writeln!(writer, "{line}")?,
            }
        } else {
            writeln!(writer, "{line}")?;
        }
    }

    writeln!(writer)?;
    let summary = format!(
        "{}: {}, {}",
        plural(result.total_differences(), "difference", "differences"),
        plural(result.removed_count(), "removal", "removals"),
        plural(result.added_count(), "addition", "additions")
    );
    if options.colorize {
        writeln!(writer, "{}", summary.bold())?;
    } else {
        writeln!(writer, "{summary}")?;
    }

    Ok(())
}

/// `"- [  2] content"`
fn format_record(record: &DiffRecord, width: usize) -> String {
    format!(
        "{} [{:>width$}] {}",
        record.diff_type.marker(),
        record.line_number,
        record.content()
    )
}
