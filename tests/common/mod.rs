//! Shared helpers for the integration suite.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use assetgraph::test_utils::{InstallConfigFixture, TestEnvironment};

/// Isolated project directory the binary runs in.
pub struct TestProject {
    env: TestEnvironment,
}

impl TestProject {
    /// Empty project with no install config and no settings file.
    pub fn new() -> Result<Self> {
        Ok(Self {
            env: TestEnvironment::new()?,
        })
    }

    /// Project holding `fixture` as `install-config.yaml`.
    pub fn with_install_config(fixture: &InstallConfigFixture) -> Result<Self> {
        Ok(Self {
            env: TestEnvironment::with_install_config(fixture)?,
        })
    }

    pub fn project_path(&self) -> &Path {
        self.env.project_path()
    }

    /// Write a settings file the binary will pick up.
    pub fn write_settings(&self, content: &str) -> Result<()> {
        self.env.write_settings(content)?;
        Ok(())
    }

    /// Write `fixture` under `file_name` in the project directory.
    pub fn write_install_config_as(
        &self,
        fixture: &InstallConfigFixture,
        file_name: &str,
    ) -> Result<PathBuf> {
        fixture.write_as(self.project_path(), file_name)
    }

    /// Run the binary in the project directory.
    pub fn run_assetgraph(&self, args: &[&str]) -> Result<CommandOutput> {
        let output =
            self.command().args(args).output().context("Failed to run assetgraph command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }

    /// Preconfigured command, isolated from the user's settings and `RUST_LOG`.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_assetgraph"));
        cmd.current_dir(self.project_path())
            .env("ASSETGRAPH_CONFIG", &self.env.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// Captured result of one binary run.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command exited with `code`
    pub fn assert_code(&self, code: i32) -> &Self {
        assert_eq!(self.code, Some(code), "Unexpected exit code\nStderr: {}", self.stderr);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}
