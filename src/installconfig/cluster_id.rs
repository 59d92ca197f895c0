//! Cluster identity asset.

use serde::Serialize;
use tracing::debug;

use super::{InstallConfigAsset, generate_infra_id};
use crate::asset::{Asset, DynAsset, Parents, dependency};

/// Unique identity of a cluster.
///
/// `uuid` is globally unique; `infra_id` is a short, readable name prefix
/// for cloud resources. The two are drawn from independent random sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterIdentity {
    /// Canonical 36-character RFC-4122 token.
    pub uuid: String,

    /// Sanitized, length-bounded cluster name with a random suffix.
    #[serde(rename = "infraID")]
    pub infra_id: String,
}

/// Asset deriving [`ClusterIdentity`] from the install config.
///
/// Generation never fails once the install config is available: the
/// cluster name is only sanitized, never validated.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterId;

impl Asset for ClusterId {
    type Output = ClusterIdentity;

    fn name(&self) -> &'static str {
        "Cluster ID"
    }

    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(InstallConfigAsset)]
    }

    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<ClusterIdentity> {
        let config = parents.get::<InstallConfigAsset>()?;
        let platform = config.platform.kind();
        let max_len = platform.infra_id_max_len();

        let infra_id = generate_infra_id(config.cluster_name(), max_len, parents.random());
        let uuid = parents.random().uuid();
        debug!("derived infra ID {infra_id} for platform {platform} (max {max_len})");

        Ok(ClusterIdentity {
            uuid,
            infra_id,
        })
    }
}
