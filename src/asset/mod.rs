//! Asset abstraction and dependency resolution.
//!
//! An *asset* is a unit of derivable configuration data. Each asset declares
//! the assets it depends on, and knows how to generate its value once those
//! dependencies are available. Resolution walks the graph depth-first,
//! generates every asset at most once per run, and fails on cycles.
//!
//! # Module Layout
//!
//! - [`Asset`] / [`DynAsset`] - typed asset contract and its object-safe form
//! - [`AssetKey`] - typed identity handle used as the memo key
//! - [`Parents`] - resolved dependencies handed to `generate`
//! - [`Resolver`] - sequential depth-first resolver with memoization
//! - [`ParallelResolver`] - thread-safe resolver resolving siblings concurrently
//! - [`DependencyGraph`] - static view of the declared graph (no generation)
//!
//! # Example
//!
//! ```rust
//! use assetgraph::asset::{Asset, DynAsset, Parents, Resolver, dependency};
//!
//! struct Greeting;
//! struct Shout;
//!
//! impl Asset for Greeting {
//!     type Output = String;
//!     fn name(&self) -> &'static str { "Greeting" }
//!     fn dependencies(&self) -> Vec<Box<dyn DynAsset>> { Vec::new() }
//!     fn generate(&self, _: &Parents<'_>) -> anyhow::Result<String> {
//!         Ok("hello".into())
//!     }
//! }
//!
//! impl Asset for Shout {
//!     type Output = String;
//!     fn name(&self) -> &'static str { "Shout" }
//!     fn dependencies(&self) -> Vec<Box<dyn DynAsset>> { vec![dependency(Greeting)] }
//!     fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<String> {
//!         Ok(parents.get::<Greeting>()?.to_uppercase())
//!     }
//! }
//!
//! let mut resolver = Resolver::default();
//! assert_eq!(*resolver.resolve(&Shout).unwrap(), "HELLO");
//! ```

mod dependency_graph;
mod parallel;
mod parents;
mod resolver;

pub use dependency_graph::{AssetNode, DependencyGraph};
pub use parallel::ParallelResolver;
pub use parents::Parents;
pub use resolver::Resolver;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Type-erased resolved asset value shared between the memo and parent sets.
pub(crate) type Value = Arc<dyn Any + Send + Sync>;

/// A unit of derivable configuration data.
///
/// Implementations are stateless descriptions: the same asset type always
/// declares the same dependencies and generation logic. The resolved value
/// (`Output`) is created once per resolver run and never mutated afterwards.
pub trait Asset: Send + Sync + 'static {
    /// Value produced by [`generate`](Asset::generate).
    type Output: Send + Sync + 'static;

    /// Human-readable label used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Assets that must be resolved before this one, in resolution order.
    ///
    /// Duplicates are tolerated; the resolver deduplicates by [`AssetKey`].
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>>;

    /// Produce this asset's value from its resolved dependencies.
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<Self::Output>;
}

/// Object-safe view of an [`Asset`], implemented for every asset type.
///
/// Dependency lists hold `Box<dyn DynAsset>` so heterogeneous assets can be
/// declared side by side.
pub trait DynAsset: Send + Sync {
    /// Identity of the asset type.
    fn key(&self) -> AssetKey;

    /// Human-readable label.
    fn name(&self) -> &'static str;

    /// Declared dependencies.
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>>;

    /// Generate the value and erase its type.
    fn generate_erased(&self, parents: &Parents<'_>) -> anyhow::Result<Value>;
}

impl<A: Asset> DynAsset for A {
    fn key(&self) -> AssetKey {
        AssetKey::of::<A>()
    }

    fn name(&self) -> &'static str {
        Asset::name(self)
    }

    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        Asset::dependencies(self)
    }

    fn generate_erased(&self, parents: &Parents<'_>) -> anyhow::Result<Value> {
        let output = Asset::generate(self, parents)?;
        Ok(Arc::new(output))
    }
}

/// Box an asset for use in a [`Asset::dependencies`] list.
pub fn dependency<A: Asset>(asset: A) -> Box<dyn DynAsset> {
    Box::new(asset)
}

/// Typed identity of an asset.
///
/// Equality and hashing use the asset type's [`TypeId`]; the carried type
/// name is for display only.
#[derive(Clone, Copy)]
pub struct AssetKey {
    id: TypeId,
    type_name: &'static str,
}

impl AssetKey {
    /// Key for asset type `A`.
    pub fn of<A: Asset>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            type_name: std::any::type_name::<A>(),
        }
    }

    /// Rust type name of the asset, for debugging output.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for AssetKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AssetKey {}

impl Hash for AssetKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetKey({})", self.type_name)
    }
}

/// Drop repeated dependencies, keeping the first occurrence of each key.
pub(crate) fn dedup_dependencies(deps: Vec<Box<dyn DynAsset>>) -> Vec<Box<dyn DynAsset>> {
    let mut seen = std::collections::HashSet::new();
    deps.into_iter().filter(|dep| seen.insert(dep.key())).collect()
}

/// Downcast a memoized value to the output type of `A`.
pub(crate) fn downcast_output<A: Asset>(value: Value) -> Option<Arc<A::Output>> {
    value.downcast::<A::Output>().ok()
}
