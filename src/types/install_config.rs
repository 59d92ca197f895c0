//! `install-config.yaml` data model.
//!
//! Only the fields the asset graph reads are modelled strictly; platform
//! parameters are kept as free-form YAML so configs written for richer
//! installers still load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::constants::{DEFAULT_INFRA_ID_MAX_LEN, GCP_INFRA_ID_MAX_LEN};
use crate::core::AssetError;

/// User-supplied cluster install configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    /// Schema version of the file, e.g. `v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    /// Base DNS domain of the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_domain: Option<String>,

    /// Object metadata; `metadata.name` is the cluster name.
    pub metadata: ObjectMeta,

    /// Target platform, exactly one key.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub platform: Platform,
}

/// Minimal object metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Cluster name; arbitrary Unicode is accepted here.
    pub name: String,
}

/// Free-form parameters of a platform section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformParams {
    /// Region, for platforms that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Every other key, preserved as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Target platform section of the install config.
///
/// Serialized externally tagged: `platform: { gcp: { region: us-east1 } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Aws(PlatformParams),
    Azure(PlatformParams),
    #[serde(rename = "baremetal")]
    BareMetal(PlatformParams),
    Gcp(PlatformParams),
    #[serde(rename = "ibmcloud")]
    IbmCloud(PlatformParams),
    Libvirt(PlatformParams),
    None(PlatformParams),
    #[serde(rename = "openstack")]
    OpenStack(PlatformParams),
    Ovirt(PlatformParams),
    #[serde(rename = "vsphere")]
    VSphere(PlatformParams),
}

impl Platform {
    /// The platform selector tag.
    pub fn kind(&self) -> PlatformKind {
        match self {
            Self::Aws(_) => PlatformKind::Aws,
            Self::Azure(_) => PlatformKind::Azure,
            Self::BareMetal(_) => PlatformKind::BareMetal,
            Self::Gcp(_) => PlatformKind::Gcp,
            Self::IbmCloud(_) => PlatformKind::IbmCloud,
            Self::Libvirt(_) => PlatformKind::Libvirt,
            Self::None(_) => PlatformKind::None,
            Self::OpenStack(_) => PlatformKind::OpenStack,
            Self::Ovirt(_) => PlatformKind::Ovirt,
            Self::VSphere(_) => PlatformKind::VSphere,
        }
    }

    /// Parameters of whichever platform is selected.
    pub fn params(&self) -> &PlatformParams {
        match self {
            Self::Aws(p)
            | Self::Azure(p)
            | Self::BareMetal(p)
            | Self::Gcp(p)
            | Self::IbmCloud(p)
            | Self::Libvirt(p)
            | Self::None(p)
            | Self::OpenStack(p)
            | Self::Ovirt(p)
            | Self::VSphere(p) => p,
        }
    }
}

/// Platform selector tag, used to pick naming-constraint policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PlatformKind {
    Aws,
    Azure,
    #[value(name = "baremetal")]
    BareMetal,
    Gcp,
    #[value(name = "ibmcloud")]
    IbmCloud,
    Libvirt,
    None,
    #[value(name = "openstack")]
    OpenStack,
    Ovirt,
    #[value(name = "vsphere")]
    VSphere,
}

impl PlatformKind {
    /// Canonical lowercase platform name as written in `install-config.yaml`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::BareMetal => "baremetal",
            Self::Gcp => "gcp",
            Self::IbmCloud => "ibmcloud",
            Self::Libvirt => "libvirt",
            Self::None => "none",
            Self::OpenStack => "openstack",
            Self::Ovirt => "ovirt",
            Self::VSphere => "vsphere",
        }
    }

    /// Maximum infra ID length resources on this platform tolerate.
    pub fn infra_id_max_len(self) -> usize {
        match self {
            // Instance names are prefixed with the infra ID.
            Self::Gcp => GCP_INFRA_ID_MAX_LEN,
            _ => DEFAULT_INFRA_ID_MAX_LEN,
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl InstallConfig {
    /// Build a config with just a name and platform.
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            api_version: Some("v1".to_string()),
            base_domain: None,
            metadata: ObjectMeta {
                name: name.into(),
            },
            platform,
        }
    }

    /// Cluster name (`metadata.name`).
    pub fn cluster_name(&self) -> &str {
        &self.metadata.name
    }

    /// Parse and validate a config from YAML text.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// - [`AssetError::ConfigParse`] for malformed YAML or unknown platforms
    /// - [`AssetError::InvalidConfig`] when `metadata.name` is empty
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self, AssetError> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| AssetError::ConfigParse {
            path: origin.to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// [`AssetError::ConfigNotFound`] when `path` does not exist, otherwise
    /// the errors of [`from_yaml`](Self::from_yaml) or [`AssetError::Io`].
    pub async fn load_from(path: &Path) -> Result<Self, AssetError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(AssetError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = tokio::fs::read_to_string(path).await?;
        tracing::debug!("loaded install config from {}", path.display());
        Self::from_yaml(&content, &path.display().to_string())
    }

    fn validate(&self) -> Result<(), AssetError> {
        if self.metadata.name.trim().is_empty() {
            return Err(AssetError::InvalidConfig {
                reason: "metadata.name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
