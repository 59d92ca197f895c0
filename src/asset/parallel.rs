//! Thread-safe resolver that resolves sibling dependencies concurrently.
//!
//! The memo is a [`DashMap`] of per-asset slots. A slot is locked only for
//! the double-checked generate step, never while dependencies are being
//! resolved, so two threads can never wait on each other through the graph.
//! Cycle detection follows the ancestor chain carried by each call instead
//! of shared in-progress state, which keeps it correct under concurrent
//! entry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::{Asset, AssetKey, DynAsset, Parents, Value, dedup_dependencies, downcast_output};
use crate::core::AssetError;
use crate::random::{RandomSource, SystemRandom};

type Slot = Arc<Mutex<Option<Value>>>;
type Ancestors = [(AssetKey, &'static str)];

/// Resolver shareable across threads through `&self`.
///
/// Guarantees the same at-most-once generation as [`Resolver`](super::Resolver)
/// even when several threads request the same asset at the same time.
pub struct ParallelResolver {
    memo: DashMap<AssetKey, Slot>,
    random: Arc<dyn RandomSource>,
    generations: AtomicUsize,
}

impl Default for ParallelResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemRandom))
    }
}

impl ParallelResolver {
    /// Create a resolver drawing randomness from `random`.
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self {
            memo: DashMap::new(),
            random,
            generations: AtomicUsize::new(0),
        }
    }

    /// Seed the memo with a caller-supplied value for asset `A`.
    pub fn provide<A: Asset>(&self, value: A::Output) {
        let value: Value = Arc::new(value);
        self.memo.insert(AssetKey::of::<A>(), Arc::new(Mutex::new(Some(value))));
    }

    /// Resolve `asset` and everything it depends on.
    ///
    /// # Errors
    ///
    /// Same as [`Resolver::resolve`](super::Resolver::resolve).
    pub fn resolve<A: Asset>(&self, asset: &A) -> Result<Arc<A::Output>, AssetError> {
        let value = self.resolve_dyn(asset, &[])?;
        downcast_output::<A>(value).ok_or_else(|| AssetError::Other {
            message: format!("resolved value of \"{}\" has an unexpected type", Asset::name(asset)),
        })
    }

    /// Whether `A` has a memoized value.
    pub fn is_resolved<A: Asset>(&self) -> bool {
        self.cached(AssetKey::of::<A>()).is_some()
    }

    /// Number of `generate` calls made by this resolver.
    pub fn generation_count(&self) -> usize {
        self.generations.load(Ordering::SeqCst)
    }

    fn slot(&self, key: AssetKey) -> Slot {
        // Clone the slot out so the shard lock is released immediately.
        Arc::clone(self.memo.entry(key).or_default().value())
    }

    fn cached(&self, key: AssetKey) -> Option<Value> {
        let slot = self.memo.get(&key).map(|entry| Arc::clone(entry.value()))?;
        let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(Arc::clone)
    }

    fn resolve_dyn(&self, asset: &dyn DynAsset, ancestors: &Ancestors) -> Result<Value, AssetError> {
        let key = asset.key();

        if let Some(value) = self.cached(key) {
            trace!("asset \"{}\" already resolved", asset.name());
            return Ok(value);
        }

        if let Some(start) = ancestors.iter().position(|(k, _)| *k == key) {
            let mut chain: Vec<String> =
                ancestors[start..].iter().map(|(_, name)| (*name).to_string()).collect();
            chain.push(asset.name().to_string());
            let required_by =
                ancestors[..start].iter().rev().map(|(_, name)| (*name).to_string()).collect();
            return Err(AssetError::Cycle {
                chain,
                required_by,
            });
        }

        debug!("resolving asset \"{}\"", asset.name());
        let mut path = ancestors.to_vec();
        path.push((key, asset.name()));

        let deps = dedup_dependencies(asset.dependencies());
        let resolved = self.resolve_siblings(&deps, &path);

        let mut parents = Parents::new(asset.name(), self.random.as_ref());
        for (dep, value) in deps.iter().zip(resolved) {
            parents.insert(dep.key(), dep.name(), value?);
        }

        let slot = self.slot(key);
        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(value) = guard.as_ref() {
            trace!("asset \"{}\" generated by another thread", asset.name());
            return Ok(Arc::clone(value));
        }

        debug!("generating asset \"{}\" with {} parent(s)", asset.name(), parents.len());
        self.generations.fetch_add(1, Ordering::SeqCst);
        let value = asset.generate_erased(&parents).map_err(|source| AssetError::Generation {
            asset: asset.name().to_string(),
            chain: path.iter().rev().map(|(_, name)| (*name).to_string()).collect(),
            source,
        })?;
        *guard = Some(Arc::clone(&value));
        Ok(value)
    }

    /// Resolve dependencies, one scoped thread per dependency when there is
    /// more than one. Results keep the declared order.
    ///
    /// Fan-out happens at every level and is not bounded, so a wide graph
    /// spawns one thread per edge. Siblings sharing a subtree may all walk
    /// it at the same time; the slot check still generates each asset once,
    /// but the dependency walks themselves are repeated. Graphs here are
    /// small and shallow; use [`Resolver`](super::Resolver) for large ones.
    fn resolve_siblings(
        &self,
        deps: &[Box<dyn DynAsset>],
        path: &Ancestors,
    ) -> Vec<Result<Value, AssetError>> {
        if deps.len() <= 1 {
            return deps.iter().map(|dep| self.resolve_dyn(dep.as_ref(), path)).collect();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = deps
                .iter()
                .map(|dep| scope.spawn(move || self.resolve_dyn(dep.as_ref(), path)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        })
    }
}
