//! Concrete assets derived from the user's install configuration.
//!
//! The graph here is deliberately small:
//!
//! ```text
//! Cluster ID
//! └── Install Config
//! ```
//!
//! [`InstallConfigAsset`] is the upstream input. Its value is loaded from
//! `install-config.yaml` by the caller and seeded into the resolver with
//! [`Resolver::provide`](crate::asset::Resolver::provide); it never
//! generates a value on its own. [`ClusterId`] reads the cluster name and
//! platform from it and derives the cluster's identity.

mod cluster_id;
mod infra_id;

pub use cluster_id::{ClusterId, ClusterIdentity};
pub use infra_id::{generate_infra_id, sanitize_base};

use crate::asset::{Asset, DynAsset, Parents};
use crate::core::AssetError;
use crate::types::InstallConfig;

/// Upstream asset carrying the parsed `install-config.yaml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstallConfigAsset;

impl Asset for InstallConfigAsset {
    type Output = InstallConfig;

    fn name(&self) -> &'static str {
        "Install Config"
    }

    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        Vec::new()
    }

    fn generate(&self, _parents: &Parents<'_>) -> anyhow::Result<InstallConfig> {
        Err(AssetError::NotProvided {
            asset: Asset::name(self).to_string(),
        }
        .into())
    }
}
