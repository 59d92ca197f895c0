//! assetgraph - asset dependency graph resolver for cluster install artifacts
//!
//! Installing a cluster means deriving a set of interrelated artifacts from
//! a user's `install-config.yaml`. Each artifact (an *asset*) declares which
//! other assets it needs, and the resolver generates them in dependency
//! order, each at most once per run.
//!
//! # Architecture Overview
//!
//! ```text
//! install-config.yaml ──load──▶ InstallConfig ──provide──▶ Resolver
//!                                                            │
//!                         ClusterId::generate(parents) ◀─────┘
//!                                   │
//!                                   ▼
//!                    ClusterIdentity { uuid, infraID }
//! ```
//!
//! - Assets are stateless descriptions; values are memoized per resolver.
//! - Cycles are reported with every asset on the cycle and the assets that
//!   led into it, up to the one originally requested.
//! - A failed generation aborts the whole resolution and reports the chain
//!   from the failing asset to the one originally requested.
//! - Randomness is injected through [`random::RandomSource`], so tests can
//!   replay fixed values.
//!
//! # Core Modules
//!
//! - [`asset`] - Asset trait, parent set, sequential and parallel resolvers,
//!   static dependency graph
//! - [`installconfig`] - Install config and cluster identity assets, infra ID
//!   derivation
//! - [`types`] - `install-config.yaml` data model
//! - [`random`] - Randomness providers
//! - [`core`] - Error types and user-facing error formatting
//!
//! ## Supporting Modules
//! - [`cli`] - Command-line interface
//! - [`config`] - Tool settings (`~/.assetgraph/config.toml`)
//! - [`constants`] - Naming limits and file names
//!
//! # Example
//!
//! ```rust
//! use assetgraph::asset::Resolver;
//! use assetgraph::installconfig::{ClusterId, InstallConfigAsset};
//! use assetgraph::types::InstallConfig;
//!
//! let yaml = "metadata:\n  name: prod\nplatform:\n  gcp:\n    region: us-east1\n";
//! let config = InstallConfig::from_yaml(yaml, "inline")?;
//!
//! let mut resolver = Resolver::default();
//! resolver.provide::<InstallConfigAsset>(config);
//!
//! let identity = resolver.resolve(&ClusterId)?;
//! assert!(identity.infra_id.starts_with("prod-"));
//! assert!(identity.infra_id.len() <= 12);
//! # Ok::<(), assetgraph::core::AssetError>(())
//! ```

pub mod asset;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installconfig;
pub mod random;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
