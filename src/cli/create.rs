//! Resolve an asset and print its value.
//!
//! # Examples
//!
//! ```bash
//! assetgraph create cluster-id
//! assetgraph create cluster-id --install-config prod/install-config.yaml
//! assetgraph create install-config --format yaml
//! ```
//!
//! # Output Format
//!
//! ```text
//! $ assetgraph create cluster-id --format text
//! infraID: prod-x7k2p
//! uuid: 3f1c2a9e-8d4b-4c5e-9f0a-6b7c8d9e0f1a
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use super::Target;
use crate::asset::Resolver;
use crate::config::{OutputFormat, Settings};
use crate::installconfig::{ClusterId, InstallConfigAsset};
use crate::types::InstallConfig;

/// Command to resolve an asset from an install config.
#[derive(Args, Debug)]
pub struct CreateCommand {
    /// Asset to resolve.
    #[arg(value_enum)]
    target: Target,

    /// Install config to read (defaults to the settings file, then
    /// `./install-config.yaml`).
    #[arg(long, value_name = "PATH")]
    install_config: Option<PathBuf>,

    /// Output format (defaults to the settings file, then `json`).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CreateCommand {
    /// Load the install config, resolve the target and print it.
    ///
    /// # Errors
    ///
    /// Returns an error if the install config cannot be loaded, resolution
    /// fails, or the value cannot be rendered.
    pub async fn execute_with_settings(self, settings: &Settings) -> Result<()> {
        let path = self.install_config.clone().unwrap_or_else(|| settings.install_config_path());
        let config = InstallConfig::load_from(&path).await?;
        let format = self.format.unwrap_or(settings.format);

        let rendered = self.run(config, format)?;
        println!("{rendered}");
        Ok(())
    }

    /// Resolve the target against `config` and render it.
    fn run(&self, config: InstallConfig, format: OutputFormat) -> Result<String> {
        let mut resolver = Resolver::default();
        resolver.provide::<InstallConfigAsset>(config);

        let rendered = match self.target {
            Target::InstallConfig => {
                let config = resolver.resolve(&InstallConfigAsset)?;
                render(config.as_ref(), format)?
            }
            Target::ClusterId => render(resolver.resolve(&ClusterId)?.as_ref(), format)?,
        };
        info!("resolved {:?} with {} generate call(s)", self.target, resolver.generation_count());
        Ok(rendered)
    }
}

/// Render a resolved value in the requested format.
///
/// `text` prints one `key: value` line per top-level field, sorted by key;
/// nested values are written as compact JSON.
pub(crate) fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to render value as JSON")
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(value).context("Failed to render value as YAML")?;
            Ok(yaml.trim_end().to_string())
        }
        OutputFormat::Text => {
            let json = serde_json::to_value(value).context("Failed to render value as text")?;
            Ok(render_text(&json))
        }
    }
}

fn render_text(value: &serde_json::Value) -> String {
    let serde_json::Value::Object(fields) = value else {
        return scalar_text(value);
    };
    fields
        .iter()
        .map(|(key, value)| format!("{key}: {}", scalar_text(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn scalar_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
