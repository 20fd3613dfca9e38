use anyhow::Result;
use colored::Colorize;
use similar::{DiffOp, DiffTag, TextDiff};
use std::io::Write;
use std::ops::Range;
use tracing::{Level, info, span};

use super::{ComparisonView, RenderOptions};
use crate::engine::normalize_line;

/// Render git-style unified hunks between the two documents.
///
/// Lines are aligned on their normalized forms, so case and surrounding
/// whitespace never show up as changes, but the raw lines are printed. The
/// hunks are for reading context only and may list moved lines that the
/// diff records do not count.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn render(
    view: &ComparisonView,
    options: &RenderOptions,
    writer: &mut dyn Write,
) -> Result<()> {
    let span = span!(
        Level::DEBUG,
        "render_unified",
        algorithm = ?options.algorithm,
        context = options.context_lines
    );
    let _guard = span.enter();

    let old_lines = view.website.lines();
    let new_lines = view.file.lines();
    let old_normalized: Vec<String> = old_lines.iter().map(|l| normalize_line(l)).collect();
    let new_normalized: Vec<String> = new_lines.iter().map(|l| normalize_line(l)).collect();
    let old_keys: Vec<&str> = old_normalized.iter().map(String::as_str).collect();
    let new_keys: Vec<&str> = new_normalized.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(options.algorithm)
        .diff_slices(&old_keys, &new_keys);

    write_colored(writer, "--- website", options.colorize.then_some(Color::Red))?;
    write_colored(writer, "+++ file", options.colorize.then_some(Color::Green))?;

    let mut hunks = 0;
    for group in diff.grouped_ops(options.context_lines) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        hunks += 1;

        let old_range = first.old_range().start..last.old_range().end;
        let new_range = first.new_range().start..last.new_range().end;
        let header = format!(
            "@@ -{} +{} @@",
            hunk_range(&old_range),
            hunk_range(&new_range)
        );
        write_colored(writer, &header, options.colorize.then_some(Color::Cyan))?;

        for op in &group {
            write_op(writer, op, old_lines, new_lines, options.colorize)?;
        }
    }

    info!(hunks, "Unified view complete");

    Ok(())
}

/// Colors used by this renderer
#[derive(Clone, Copy)]
enum Color {
    Red,
    Green,
    Cyan,
}

/// Write a line, colored when `color` is set.
fn write_colored(writer: &mut dyn Write, line: &str, color: Option<Color>) -> Result<()> {
    match color {
        Some(Color::Red) => writeln!(writer, "{}", line.red())?,
        Some(Color::Green) => writeln!(writer, "{}", line.green())?,
        Some(Color::Cyan) => writeln!(writer, "{}", line.cyan())?,
        None => writeln!(writer, "{line}")?,
    }
    Ok(())
}

/// Write every line touched by one diff operation.
fn write_op(
    writer: &mut dyn Write,
    op: &DiffOp,
    old_lines: &[String],
    new_lines: &[String],
    colorize: bool,
) -> Result<()> {
    let (tag, old_range, new_range) = op.as_tag_tuple();
    let red = colorize.then_some(Color::Red);
    let green = colorize.then_some(Color::Green);

    match tag {
        DiffTag::Equal => {
            for line in &old_lines[old_range] {
                write_colored(writer, &format!(" {line}"), None)?;
            }
        }
        DiffTag::Delete => {
            for line in &old_lines[old_range] {
                write_colored(writer, &format!("-{line}"), red)?;
            }
        }
        DiffTag::Insert => {
            for line in &new_lines[new_range] {
                write_colored(writer, &format!("+{line}"), green)?;
            }
        }
        DiffTag::Replace => {
            for line in &old_lines[old_range] {
                write_colored(writer, &format!("-{line}"), red)?;
            }
            for line in &new_lines[new_range] {
                write_colored(writer, &format!("+{line}"), green)?;
            }
        }
    }
    Ok(())
}

/// `start,len` with a 1-based start, as in unified diff headers.
fn hunk_range(range: &Range<usize>) -> String {
    let len = range.end - range.start;
    let start = if len == 0 { range.start } else { range.start + 1 };
    format!("{start},{len}")
}
