use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Keys recognized in the configuration file, as `section.key`
const KNOWN_FIELDS: &[&str] = &[
    "core.pager",
    "display.format",
    "display.color",
    "display.width",
    "display.context_lines",
    "display.algorithm",
    "input.max_file_size",
    "input.allowed_extensions",
    "performance.parallel_threads",
    "performance.parallel_threshold",
    "performance.mmap_threshold",
];

/// Reports configuration keys that pagediff does not understand
pub struct ConfigValidator {
    /// Set of valid configuration fields
    known_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with the known configuration fields
    #[must_use]
    pub fn new() -> Self {
        Self {
            known_fields: KNOWN_FIELDS.iter().copied().collect(),
        }
    }

    /// Validate a configuration file and print a warning block for unknown keys
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)?;
        let warnings = self.collect_warnings(&content)?;

        if !warnings.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for warning in warnings {
                eprintln!("  {warning}");
            }
            eprintln!();
        }

        Ok(())
    }

    /// Return one warning per unknown key in `content`
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML
    pub fn collect_warnings(&self, content: &str) -> Result<Vec<String>> {
        let parsed: toml::Value = toml::from_str(content)?;
        let mut unknown = Vec::new();
        self.check_table(&parsed, "", &mut unknown);

        Ok(unknown
            .into_iter()
            .map(|field| format!("Unknown configuration field: {field}"))
            .collect())
    }

    /// Recursively collect unknown leaf keys of a TOML table
    fn check_table(&self, table: &toml::Value, prefix: &str, unknown: &mut Vec<String>) {
        let toml::Value::Table(map) = table else {
            return;
        };

        for (key, value) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if self.known_fields.contains(full_key.as_str()) {
                continue;
            }

            if let toml::Value::Table(_) = value {
                self.check_table(value, &full_key, unknown);
            } else {
                unknown.push(full_key);
            }
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
