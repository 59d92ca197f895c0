//! Parent set handed to an asset's `generate` step.

use std::collections::HashMap;

use super::{Asset, AssetKey, Value};
use crate::core::AssetError;
use crate::random::RandomSource;

/// Read-only view of the resolved dependencies of one asset.
///
/// Contains an entry for every declared dependency before `generate` runs.
/// Lookups are keyed by asset type, so `get::<InstallConfigAsset>()` returns
/// the `InstallConfig` value without any string matching.
pub struct Parents<'a> {
    asset: &'static str,
    values: HashMap<AssetKey, (&'static str, Value)>,
    random: &'a dyn RandomSource,
}

impl<'a> Parents<'a> {
    pub(crate) fn new(asset: &'static str, random: &'a dyn RandomSource) -> Self {
        Self {
            asset,
            values: HashMap::new(),
            random,
        }
    }

    pub(crate) fn insert(&mut self, key: AssetKey, name: &'static str, value: Value) {
        self.values.insert(key, (name, value));
    }

    /// Resolved value of dependency `A`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::MissingParent`] when `A` was not among the
    /// declared dependencies of the asset being generated.
    pub fn get<A: Asset>(&self) -> Result<&A::Output, AssetError> {
        self.values
            .get(&AssetKey::of::<A>())
            .and_then(|(_, value)| value.downcast_ref::<A::Output>())
            .ok_or_else(|| AssetError::MissingParent {
                asset: self.asset.to_string(),
                parent: short_type_name(AssetKey::of::<A>().type_name()).to_string(),
            })
    }

    /// Whether dependency `A` is present.
    pub fn contains<A: Asset>(&self) -> bool {
        self.values.contains_key(&AssetKey::of::<A>())
    }

    /// Display names of the resolved parents, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.values().map(|(name, _)| *name)
    }

    /// Number of resolved parents.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the asset has no parents.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Randomness providers for this resolution run.
    pub fn random(&self) -> &dyn RandomSource {
        self.random
    }
}

// `type_name` is the full path; the last segment is what users wrote.
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}
