//! Sequential depth-first asset resolver.
//!
//! The resolver keeps two pieces of state for the lifetime of a run:
//!
//! - a memo table mapping [`AssetKey`] to the generated value, so each
//!   asset is generated at most once
//! - an in-progress stack of the assets currently being resolved, used to
//!   detect cycles and to report the resolution chain on failure
//!
//! Failures are never memoized and never retried.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{Asset, AssetKey, DynAsset, Parents, Value, dedup_dependencies, downcast_output};
use crate::core::AssetError;
use crate::random::{RandomSource, SystemRandom};

/// Resolves assets on the calling thread, memoizing every generated value.
pub struct Resolver {
    memo: HashMap<AssetKey, Value>,
    in_progress: Vec<(AssetKey, &'static str)>,
    random: Arc<dyn RandomSource>,
    generations: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemRandom))
    }
}

impl Resolver {
    /// Create a resolver drawing randomness from `random`.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            memo: HashMap::new(),
            in_progress: Vec::new(),
            random,
            generations: 0,
        }
    }

    /// Seed the memo with a caller-supplied value for asset `A`.
    ///
    /// A provided asset is treated as already resolved and its `generate`
    /// is never called. Providing twice replaces the earlier value.
    pub fn provide<A: Asset>(&mut self, value: A::Output) {
        self.memo.insert(AssetKey::of::<A>(), Arc::new(value));
    }

    /// Resolve `asset` and everything it depends on.
    ///
    /// Repeated calls for the same asset type return the memoized value.
    ///
    /// # Errors
    ///
    /// - [`AssetError::Cycle`] if a dependency cycle is reachable from `asset`
    /// - [`AssetError::Generation`] if any asset in the graph fails to generate
    pub fn resolve<A: Asset>(&mut self, asset: &A) -> Result<Arc<A::Output>, AssetError> {
        let value = self.resolve_dyn(asset)?;
        downcast_output::<A>(value).ok_or_else(|| AssetError::Other {
            message: format!("resolved value of \"{}\" has an unexpected type", Asset::name(asset)),
        })
    }

    /// Memoized value of `A`, if it was resolved or provided in this run.
    pub fn get<A: Asset>(&self) -> Option<Arc<A::Output>> {
        self.memo.get(&AssetKey::of::<A>()).cloned().and_then(downcast_output::<A>)
    }

    /// Whether `A` has a memoized value.
    pub fn is_resolved<A: Asset>(&self) -> bool {
        self.memo.contains_key(&AssetKey::of::<A>())
    }

    /// Number of `generate` calls made by this resolver.
    pub fn generation_count(&self) -> usize {
        self.generations
    }

    /// Resolve an erased asset, returning its shared value.
    pub(crate) fn resolve_dyn(&mut self, asset: &dyn DynAsset) -> Result<Value, AssetError> {
        let key = asset.key();

        if let Some(value) = self.memo.get(&key) {
            trace!("asset \"{}\" already resolved", asset.name());
            return Ok(Arc::clone(value));
        }

        if let Some(start) = self.in_progress.iter().position(|(k, _)| *k == key) {
            let mut chain: Vec<String> =
                self.in_progress[start..].iter().map(|(_, name)| (*name).to_string()).collect();
            chain.push(asset.name().to_string());
            let required_by =
                self.in_progress[..start].iter().rev().map(|(_, name)| (*name).to_string()).collect();
            return Err(AssetError::Cycle {
                chain,
                required_by,
            });
        }

        debug!("resolving asset \"{}\"", asset.name());
        self.in_progress.push((key, asset.name()));
        let result = self.resolve_in_progress(asset);
        self.in_progress.pop();

        let value = result?;
        self.memo.insert(key, Arc::clone(&value));
        Ok(value)
    }

    fn resolve_in_progress(&mut self, asset: &dyn DynAsset) -> Result<Value, AssetError> {
        let random = Arc::clone(&self.random);
        let mut parents = Parents::new(asset.name(), random.as_ref());

        for dep in dedup_dependencies(asset.dependencies()) {
            let value = self.resolve_dyn(dep.as_ref())?;
            parents.insert(dep.key(), dep.name(), value);
        }

        debug!("generating asset \"{}\" with {} parent(s)", asset.name(), parents.len());
        self.generations += 1;
        asset.generate_erased(&parents).map_err(|source| AssetError::Generation {
            asset: asset.name().to_string(),
            chain: self.chain(),
            source,
        })
    }

    /// Names on the in-progress stack, innermost first.
    fn chain(&self) -> Vec<String> {
        self.in_progress.iter().rev().map(|(_, name)| (*name).to_string()).collect()
    }
}
