use crate::AppContext;
use crate::output;
use anyhow::Result;
use colored::Colorize;

/// Execute config command to get/set configuration values
///
/// # Errors
///
/// Returns an error if:
/// - Failed to set or unset configuration value
/// - Failed to save configuration
pub fn execute(
    ctx: &mut AppContext,
    key: Option<&str>,
    value: Option<String>,
    unset: bool,
    list: bool,
) -> Result<()> {
    // If --list flag is set or no key is provided, show all configuration
    if list || key.is_none() {
        show_all_config(ctx);
        return Ok(());
    }

    let key =
        key.ok_or_else(|| anyhow::anyhow!("Key must be provided when not using --list flag"))?;

    if unset {
        ctx.config.unset(key)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Unset {key}"));
    } else if let Some(val) = value {
        ctx.config.set(key, val.clone())?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Set {key} = {val}"));
    } else if let Some(val) = ctx.config.get(key) {
        println!("{val}");
    } else {
        output::warning(&format!("Configuration key '{key}' is not set"));
    }

    Ok(())
}

/// Every key shown by `config --list`, grouped by section
const SECTIONS: &[(&str, &[&str])] = &[
    ("core", &["pager"]),
    (
        "display",
        &["format", "color", "width", "context_lines", "algorithm"],
    ),
    ("input", &["max_file_size", "allowed_extensions"]),
    (
        "performance",
        &["parallel_threads", "parallel_threshold", "mmap_threshold"],
    ),
];

/// Show all configuration values
fn show_all_config(ctx: &AppContext) {
    for (index, (section, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", format!("[{section}]").bold());
        for key in *keys {
            if let Some(value) = ctx.config.get(&format!("{section}.{key}")) {
                println!("  {key} = {value}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_keys_resolve() {
        let config = crate::config::Config::default();
        for (section, keys) in SECTIONS {
            for key in *keys {
                if (*section, *key) == ("core", "pager") {
                    continue;
                }
                assert!(
                    config.get(&format!("{section}.{key}")).is_some(),
                    "{section}.{key} should have a default"
                );
            }
        }
    }
}
