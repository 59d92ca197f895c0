//! Sample `install-config.yaml` contents.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::INSTALL_CONFIG_FILENAME;

/// Test fixture for `install-config.yaml` files
#[derive(Clone, Debug)]
pub struct InstallConfigFixture {
    pub name: String,
    pub content: String,
}

impl InstallConfigFixture {
    /// Config for `platform` with the given cluster name and no parameters.
    pub fn for_platform(cluster_name: &str, platform: &str) -> Self {
        Self {
            name: format!("{platform}-{cluster_name}"),
            content: format!(
                "apiVersion: v1\nbaseDomain: example.com\nmetadata:\n  name: {}\nplatform:\n  {platform}: {{}}\n",
                yaml_string(cluster_name)
            ),
        }
    }

    /// AWS config with a region.
    pub fn aws(cluster_name: &str) -> Self {
        Self {
            name: format!("aws-{cluster_name}"),
            content: format!(
                r#"
apiVersion: v1
baseDomain: example.com
metadata:
  name: {}
platform:
  aws:
    region: us-east-1
"#,
                yaml_string(cluster_name)
            )
            .trim_start()
            .to_string(),
        }
    }

    /// GCP config; infra IDs are limited to 12 characters.
    pub fn gcp(cluster_name: &str) -> Self {
        Self {
            name: format!("gcp-{cluster_name}"),
            content: format!(
                r#"
apiVersion: v1
baseDomain: example.com
metadata:
  name: {}
platform:
  gcp:
    region: us-east1
    projectID: demo-project
"#,
                yaml_string(cluster_name)
            )
            .trim_start()
            .to_string(),
        }
    }

    /// Config naming a platform that does not exist.
    pub fn unknown_platform() -> Self {
        Self::for_platform("lab", "mainframe")
    }

    /// YAML that does not parse.
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: "metadata:\n  name: [unterminated\nplatform:\n".to_string(),
        }
    }

    /// Write as `install-config.yaml` inside `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        self.write_as(dir, INSTALL_CONFIG_FILENAME)
    }

    /// Write under a custom file name inside `dir`.
    pub fn write_as(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {}", self.name))?;
        Ok(path)
    }
}

// Double-quoted so names with YAML punctuation or Unicode load verbatim.
fn yaml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}
