#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory with its own config file for CLI runs
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join(".config/pagediff/config");
        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    /// Get the temporary directory path
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the scratch directory
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// `pagediff` command isolated from the user's config and pager
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("pagediff")?;
        cmd.env("HOME", self.path())
            .env("PAGEDIFF_CONFIG_PATH", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("PAGEDIFF_LOG")
            .arg("--no-pager");
        Ok(cmd)
    }
}
