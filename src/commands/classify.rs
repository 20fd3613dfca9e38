use crate::AppContext;
use crate::engine::{ClassifiedLine, Side, TextDocument, classify_document};
use crate::output;
use crate::source::{self, InputSource, LoadOptions};
use crate::utils::pager::PagerOutput;
use anyhow::Result;
use colored::Colorize;

/// Execute classify command: print the highlight class of every line of one side
///
/// Uses the fuzzy per-line test that drives highlighting, not the diff
/// records. With `json`, prints a JSON array of classified lines.
///
/// # Errors
///
/// Returns an error if:
/// - Either input is rejected at the boundary
/// - JSON serialization or writing the output fails
pub fn execute(
    ctx: &AppContext,
    website: &str,
    file: &str,
    side: Side,
    json: bool,
) -> Result<()> {
    let load_options =
        LoadOptions::from_config(&ctx.config.input, ctx.config.performance.mmap_threshold);
    let inputs = source::load_pair(
        &InputSource::from_arg(website),
        &InputSource::from_arg(file),
        &load_options,
    )?;

    let website_doc = TextDocument::parse(&inputs.website);
    let file_doc = TextDocument::parse(&inputs.file);
    let (document, opposite) = match side {
        Side::Website => (&website_doc, &file_doc),
        Side::File => (&file_doc, &website_doc),
    };

    let lines = classify_document(
        document,
        side,
        opposite,
        ctx.config.performance.parallel_threshold,
    );

    if json {
        let mut rendered = serde_json::to_string_pretty(&lines)?;
        rendered.push('\n');
        let mut pager = PagerOutput::new(ctx, true);
        pager.append(&rendered);
        return pager.show();
    }

    output::apply_color_mode(ctx.config.display.color);
    let marked = lines.iter().filter(|line| line.is_marked()).count();

    let mut pager = PagerOutput::new(ctx, ctx.no_pager);
    let width = lines.len().max(1).to_string().len();
    for line in &lines {
        pager.appendln(&format_line(line, width));
    }
    pager.appendln("");
    pager.appendln(&format!(
        "{}: {marked} of {} {side} lines highlighted",
        "Summary".bold(),
        lines.len()
    ));
    pager.show()
}

/// `"- 12 content"`, colored by class
fn format_line(line: &ClassifiedLine<'_>, width: usize) -> String {
    let marker = if line.is_marked() {
        line.class.marker()
    } else {
        ' '
    };
    let text = format!("{marker} {:>width$} {}", line.line_number, line.content);
    match marker {
        '-' => text.red().to_string(),
        '+' => text.green().to_string(),
        _ => text,
    }
}
