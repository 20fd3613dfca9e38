use crate::AppContext;
use crate::config::{ColorMode, OutputFormat};
use crate::output;
use crate::render::{self, ComparisonView, RenderOptions};
use crate::source::{self, InputSource, LoadOptions};
use crate::utils::pager::PagerOutput;
use anyhow::Result;

/// Command-line overrides for a comparison
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// Output format, overriding `display.format`
    pub format: Option<OutputFormat>,
    /// Color mode, overriding `display.color`
    pub color: Option<ColorMode>,
    /// Column width, overriding `display.width`
    pub width: Option<usize>,
}

/// Build render options from config plus command-line overrides.
///
/// Also applies the effective color mode to the process. JSON is never
/// colored.
#[must_use]
pub fn resolve_render_options(ctx: &AppContext, options: &CompareOptions) -> RenderOptions {
    output::apply_color_mode(options.color.unwrap_or(ctx.config.display.color));

    let mut render_options = RenderOptions::from_config(&ctx.config, output::colors_enabled());
    if let Some(format) = options.format {
        render_options.format = format;
    }
    if let Some(width) = options.width {
        render_options.width = width;
    }
    if render_options.format == OutputFormat::Json {
        render_options.colorize = false;
    }
    render_options
}

/// Execute compare command: load both texts, compare, render
///
/// Returns `true` when the texts are identical under the equality policy.
///
/// # Errors
///
/// Returns an error if:
/// - Either input is rejected at the boundary (missing, empty, not text, too large)
/// - Rendering or writing the output fails
pub fn execute(
    ctx: &AppContext,
    website: &str,
    file: &str,
    options: &CompareOptions,
) -> Result<bool> {
    let website_source = InputSource::from_arg(website);
    let file_source = InputSource::from_arg(file);
    output::verbose(&format!("Comparing {website_source} with {file_source}"));

    let load_options =
        LoadOptions::from_config(&ctx.config.input, ctx.config.performance.mmap_threshold);
    let inputs = source::load_pair(&website_source, &file_source, &load_options)?;

    let view = ComparisonView::new(&inputs.website, &inputs.file);
    let render_options = resolve_render_options(ctx, options);

    let rendered = render::render_to_string(&view, &render_options)?;
    let json = render_options.format == OutputFormat::Json;
    let mut pager = PagerOutput::new(ctx, ctx.no_pager || json);
    pager.append(&rendered);
    pager.show()?;

    Ok(view.result.is_identical())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    #[serial_test::serial]
    fn test_cli_overrides_win() -> Result<()> {
        let temp = tempdir()?;
        let ctx = AppContext::new_explicit(temp.path().join("config"))?;
        let options = CompareOptions {
            format: Some(OutputFormat::Records),
            color: Some(ColorMode::Never),
            width: Some(42),
        };

        let resolved = resolve_render_options(&ctx, &options);
        assert_eq!(resolved.format, OutputFormat::Records);
        assert_eq!(resolved.width, 42);
        assert_eq!(resolved.context_lines, ctx.config.display.context_lines);
        Ok(())
    }

    #[test]
    #[serial_test::serial]
    fn test_json_is_never_colored() -> Result<()> {
        let temp = tempdir()?;
        let ctx = AppContext::new_explicit(temp.path().join("config"))?;
        let options = CompareOptions {
            format: Some(OutputFormat::Json),
            color: Some(ColorMode::Always),
            width: None,
        };

        assert!(!resolve_render_options(&ctx, &options).colorize);
        colored::control::unset_override();
        Ok(())
    }
}
