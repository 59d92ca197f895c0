//! Loading and defaults for `config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME, CONFIG_PATH_ENV, INSTALL_CONFIG_FILENAME};

/// How `create` renders a resolved asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,

    /// YAML, matching the layout of `install-config.yaml`.
    Yaml,

    /// Human-readable `key: value` lines.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// User settings read from `config.toml`.
///
/// Every key is optional; unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Install config used when `--install-config` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_config: Option<PathBuf>,

    /// Default output format of `create`.
    pub format: OutputFormat,

    /// Log filter used when neither `RUST_LOG` nor `-v`/`-q` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Settings {
    /// Load settings from `path` if given, otherwise from the default location.
    ///
    /// A missing file yields [`Settings::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let Some(path) = path.or_else(Self::default_path) else {
            debug!("no home directory; using default settings");
            return Ok(Self::default());
        };

        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            debug!("no settings file at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
        debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Default settings path: `$ASSETGRAPH_CONFIG`, else `~/.assetgraph/config.toml`.
    ///
    /// Returns `None` only when the variable is unset and there is no home
    /// directory.
    pub fn default_path() -> Option<PathBuf> {
        settings_path(std::env::var_os(CONFIG_PATH_ENV), dirs::home_dir())
    }

    /// Install config to use when the command line names none.
    pub fn install_config_path(&self) -> PathBuf {
        self.install_config.clone().unwrap_or_else(|| PathBuf::from(INSTALL_CONFIG_FILENAME))
    }
}

fn settings_path(env: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match env {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME)),
    }
}
