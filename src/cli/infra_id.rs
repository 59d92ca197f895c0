//! Derive an infra ID from a cluster name without an install config.

use anyhow::Result;
use clap::Args;

use crate::constants::{DEFAULT_INFRA_ID_MAX_LEN, MIN_INFRA_ID_MAX_LEN};
use crate::installconfig::generate_infra_id;
use crate::random::{RandomSource, SystemRandom};
use crate::types::PlatformKind;

/// Command to run the infra ID deriver directly.
///
/// ```bash
/// assetgraph infra-id my-cluster               # up to 27 characters
/// assetgraph infra-id "My Cluster" --platform gcp
/// assetgraph infra-id prod --max-len 16
/// ```
#[derive(Args, Debug)]
pub struct InfraIdCommand {
    /// Cluster name to derive from (any Unicode).
    name: String,

    /// Use the length limit of this platform.
    #[arg(long, value_enum, conflicts_with = "max_len")]
    platform: Option<PlatformKind>,

    /// Explicit maximum length (at least 6).
    #[arg(long, value_name = "N", value_parser = parse_max_len)]
    max_len: Option<usize>,
}

impl InfraIdCommand {
    /// Print a freshly derived infra ID.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the other commands.
    pub fn execute(self) -> Result<()> {
        println!("{}", self.derive(&SystemRandom));
        Ok(())
    }

    /// Maximum length selected by the flags.
    fn max_len(&self) -> usize {
        match (self.max_len, self.platform) {
            (Some(n), _) => n,
            (None, Some(platform)) => platform.infra_id_max_len(),
            (None, None) => DEFAULT_INFRA_ID_MAX_LEN,
        }
    }

    fn derive(&self, random: &dyn RandomSource) -> String {
        generate_infra_id(&self.name, self.max_len(), random)
    }
}

// Rejecting small values here keeps the deriver's assertion unreachable
// from the command line.
fn parse_max_len(value: &str) -> Result<usize, String> {
    let n: usize = value.parse().map_err(|_| format!("`{value}` is not a valid length"))?;
    if n < MIN_INFRA_ID_MAX_LEN {
        return Err(format!(
            "must be at least {MIN_INFRA_ID_MAX_LEN} to fit the separator and random suffix"
        ));
    }
    Ok(n)
}
