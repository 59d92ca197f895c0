//! Temporary project directories for tests.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::InstallConfigFixture;

/// Test environment with an isolated project directory and settings file
/// location.
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new, empty environment.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let config_path = temp_dir.path().join("config.toml");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
            config_path,
        })
    }

    /// Create an environment whose project holds `fixture` as `install-config.yaml`.
    pub fn with_install_config(fixture: &InstallConfigFixture) -> Result<Self> {
        let env = Self::new()?;
        env.write_install_config(fixture)?;
        Ok(env)
    }

    /// Write `fixture` into the project directory.
    pub fn write_install_config(&self, fixture: &InstallConfigFixture) -> Result<PathBuf> {
        fixture.write_to(&self.project_dir)
    }

    /// Write the settings file at [`config_path`](Self::config_path).
    pub fn write_settings(&self, content: &str) -> Result<&Path> {
        fs::write(&self.config_path, content)?;
        Ok(&self.config_path)
    }

    /// Project directory path.
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }
}
