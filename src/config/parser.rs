use super::Config;
use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;

/// Narrowest usable side-by-side column
pub const MIN_COLUMN_WIDTH: usize = 20;

/// Upper bound on unified-view context lines
pub const MAX_CONTEXT_LINES: usize = 100;

/// Parse a configuration file, memory-mapping it when it is large.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, is not valid
/// TOML, or holds out-of-range values.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let metadata = std::fs::metadata(path)?;

    if metadata.len() < 4096 {
        // Small file - read normally
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_config_str(&content)
    } else {
        // Large file - use memory mapping
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and dropped before this function returns.
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        let content = simdutf8::basic::from_utf8(&mmap)
            .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in config file: {e}"))?;

        parse_config_str(content)
    }
}

/// Parse configuration from TOML text and validate it.
///
/// # Errors
///
/// Returns an error if the text is not valid TOML or holds out-of-range values.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.performance.parallel_threads == 0 {
        anyhow::bail!("Parallel threads must be at least 1");
    }

    if config.display.context_lines > MAX_CONTEXT_LINES {
        anyhow::bail!("Context lines cannot exceed {MAX_CONTEXT_LINES}");
    }

    if config.display.width != 0 && config.display.width < MIN_COLUMN_WIDTH {
        anyhow::bail!("Column width must be 0 or at least {MIN_COLUMN_WIDTH}");
    }

    if config.input.max_file_size == 0 {
        anyhow::bail!("Maximum file size must be at least 1 byte");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorMode, OutputFormat};
    use tempfile::tempdir;

    #[test]
    fn test_parse_valid_config() -> Result<()> {
        let toml_content = r#"
[core]
pager = "less -R"

[display]
format = "records"
color = "always"
width = 50

[input]
max_file_size = 1024
allowed_extensions = ["txt", "md"]

[performance]
parallel_threads = 4
parallel_threshold = 100
"#;

        let config = parse_config_str(toml_content)?;
        assert_eq!(config.core.pager.as_deref(), Some("less -R"));
        assert_eq!(config.display.format, OutputFormat::Records);
        assert_eq!(config.display.color, ColorMode::Always);
        assert_eq!(config.input.allowed_extensions.len(), 2);
        assert_eq!(config.performance.parallel_threads, 4);
        Ok(())
    }

    #[test]
    fn test_parse_empty_config() -> Result<()> {
        let config = parse_config_str("")?;
        // Should use defaults
        assert_eq!(config.display.context_lines, 3);
        assert_eq!(config.input.allowed_extensions, vec!["txt"]);
        Ok(())
    }

    #[test]
    fn test_parse_malformed_toml() {
        let malformed = r#"
[display
format = "json"
"#;
        let result = parse_config_str(malformed);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse TOML")
        );
    }

    #[test]
    fn test_parse_zero_parallel_threads() {
        let invalid = "[performance]\nparallel_threads = 0\n";
        assert!(parse_config_str(invalid).is_err());
    }

    #[test]
    fn test_parse_out_of_range_display() {
        assert!(parse_config_str("[display]\ncontext_lines = 1000\n").is_err());
        assert!(parse_config_str("[display]\nwidth = 3\n").is_err());
        assert!(parse_config_str("[display]\nwidth = 0\n").is_ok());
    }

    #[test]
    fn test_parse_unknown_format() {
        assert!(parse_config_str("[display]\nformat = \"html\"\n").is_err());
    }

    #[test]
    fn test_parse_large_config_mmap() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("large.toml");

        // Create a config larger than 4KB to trigger mmap
        let mut large_config = String::from("[input]\nallowed_extensions = [\n");
        for i in 0..999 {
            large_config.push_str(&format!("  \"ext_{i}\",\n"));
        }
        large_config.push_str("  \"txt\"\n]\n");

        std::fs::write(&config_path, &large_config)?;

        let config = parse_config_file(&config_path)?;
        assert_eq!(config.input.allowed_extensions.len(), 1000);

        Ok(())
    }
}
