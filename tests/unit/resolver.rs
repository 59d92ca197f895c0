//! Resolver behaviour on a user-defined asset graph:
//!
//! ```text
//! Bootstrap
//! ├── Network
//! │   └── Seed
//! └── Certs
//!     └── Seed
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use assetgraph::asset::{
    Asset, AssetKey, DependencyGraph, DynAsset, ParallelResolver, Parents, Resolver, dependency,
};
use assetgraph::core::{AssetError, user_friendly_error};
use assetgraph::random::SequenceRandom;

static SEED_CALLS: AtomicUsize = AtomicUsize::new(0);

struct Seed;
struct Network;
struct Certs;
struct Bootstrap;

impl Asset for Seed {
    type Output = String;
    fn name(&self) -> &'static str {
        "Seed"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        Vec::new()
    }
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<String> {
        SEED_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(parents.random().alphanumeric(5))
    }
}

impl Asset for Network {
    type Output = String;
    fn name(&self) -> &'static str {
        "Network"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Seed)]
    }
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<String> {
        Ok(format!("net-{}", parents.get::<Seed>()?))
    }
}

impl Asset for Certs {
    type Output = String;
    fn name(&self) -> &'static str {
        "Certs"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Seed), dependency(Seed)]
    }
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<String> {
        Ok(format!("ca-{}", parents.get::<Seed>()?))
    }
}

impl Asset for Bootstrap {
    type Output = Vec<String>;
    fn name(&self) -> &'static str {
        "Bootstrap"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Network), dependency(Certs)]
    }
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<Vec<String>> {
        assert_eq!(parents.len(), 2);
        Ok(vec![parents.get::<Network>()?.clone(), parents.get::<Certs>()?.clone()])
    }
}

#[test]
fn test_shared_dependency_generated_once() {
    let before = SEED_CALLS.load(Ordering::SeqCst);
    let random = Arc::new(SequenceRandom::new().with_suffixes(["k7x2p"]));
    let mut resolver = Resolver::new(random);

    let value = resolver.resolve(&Bootstrap).unwrap();

    assert_eq!(*value, ["net-k7x2p", "ca-k7x2p"]);
    assert_eq!(resolver.generation_count(), 4);
    assert!(SEED_CALLS.load(Ordering::SeqCst) >= before + 1);
    assert!(resolver.is_resolved::<Seed>());
}

#[test]
fn test_parallel_shared_dependency_generated_once() {
    let random = Arc::new(SequenceRandom::new().with_suffixes(["z9z9z"]));
    let resolver = ParallelResolver::new(random.clone());

    let value = resolver.resolve(&Bootstrap).unwrap();

    assert_eq!(*value, ["net-z9z9z", "ca-z9z9z"]);
    assert_eq!(resolver.generation_count(), 4);
    assert_eq!(random.suffix_draws(), 1);
}

#[test]
fn test_provided_value_is_never_generated() {
    let mut resolver = Resolver::default();
    resolver.provide::<Seed>("fixed".to_string());

    let value = resolver.resolve(&Network).unwrap();
    assert_eq!(*value, "net-fixed");
    assert_eq!(resolver.generation_count(), 1);
}

#[test]
fn test_dependency_graph_of_bootstrap() {
    let graph = DependencyGraph::from_root(&Bootstrap);

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    assert!(graph.detect_cycles().is_ok());

    let order: Vec<_> = graph.topological_order().unwrap().iter().map(|n| n.name).collect();
    assert_eq!(order.first(), Some(&"Seed"));
    assert_eq!(order.last(), Some(&"Bootstrap"));

    let tree = graph.to_tree_string(graph.root().unwrap());
    assert_eq!(
        tree,
        "Bootstrap\n├── Network\n│   └── Seed\n└── Certs\n    └── Seed (*)\n"
    );
    assert_eq!(graph.transitive_dependencies(AssetKey::of::<Bootstrap>()).len(), 3);
}

struct Ping;
struct Pong;

impl Asset for Ping {
    type Output = ();
    fn name(&self) -> &'static str {
        "Ping"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Pong)]
    }
    fn generate(&self, _: &Parents<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Asset for Pong {
    type Output = ();
    fn name(&self) -> &'static str {
        "Pong"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Ping)]
    }
    fn generate(&self, _: &Parents<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn test_cycle_names_both_assets_from_either_entry() {
    let err = Resolver::default().resolve(&Ping).unwrap_err();
    assert!(matches!(err, AssetError::Cycle { .. }));
    assert_eq!(err.chain(), ["Ping", "Pong", "Ping"]);

    let err = Resolver::default().resolve(&Pong).unwrap_err();
    assert_eq!(err.chain(), ["Pong", "Ping", "Pong"]);

    let err = ParallelResolver::default().resolve(&Ping).unwrap_err();
    assert!(err.to_string().contains("Ping → Pong → Ping"));

    assert!(DependencyGraph::from_root(&Ping).detect_cycles().is_err());
}

/// Reaches the Ping/Pong cycle without being part of it.
struct Lobby;

impl Asset for Lobby {
    type Output = ();
    fn name(&self) -> &'static str {
        "Lobby"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(Ping)]
    }
    fn generate(&self, _: &Parents<'_>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[test]
fn test_cycle_below_requested_asset_names_it() {
    let errors = [
        Resolver::default().resolve(&Lobby).unwrap_err(),
        ParallelResolver::default().resolve(&Lobby).unwrap_err(),
        DependencyGraph::from_root(&Lobby).detect_cycles().unwrap_err(),
    ];

    for err in errors {
        assert_eq!(err.chain(), ["Ping", "Pong", "Ping"]);
        assert!(
            matches!(&err, AssetError::Cycle { required_by, .. } if required_by == &["Lobby"])
        );
        assert!(err.to_string().contains("(required by: Lobby)"));

        let ctx = user_friendly_error(anyhow::Error::from(err));
        assert!(ctx.details.unwrap().contains("reached from \"Lobby\""));
    }
}

struct NeedsInput;
struct Consumer;

impl Asset for NeedsInput {
    type Output = u16;
    fn name(&self) -> &'static str {
        "Needs Input"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        Vec::new()
    }
    fn generate(&self, _: &Parents<'_>) -> anyhow::Result<u16> {
        anyhow::bail!("port is required")
    }
}

impl Asset for Consumer {
    type Output = u16;
    fn name(&self) -> &'static str {
        "Consumer"
    }
    fn dependencies(&self) -> Vec<Box<dyn DynAsset>> {
        vec![dependency(NeedsInput)]
    }
    fn generate(&self, parents: &Parents<'_>) -> anyhow::Result<u16> {
        Ok(*parents.get::<NeedsInput>()? + 1)
    }
}

#[test]
fn test_generation_failure_reports_chain_and_is_not_memoized() {
    let mut resolver = Resolver::default();

    let err = resolver.resolve(&Consumer).unwrap_err();
    assert_eq!(err.chain(), ["Needs Input", "Consumer"]);
    assert!(err.to_string().contains("port is required"));
    assert!(!resolver.is_resolved::<NeedsInput>());
    assert!(!resolver.is_resolved::<Consumer>());

    resolver.provide::<NeedsInput>(8080);
    assert_eq!(*resolver.resolve(&Consumer).unwrap(), 8081);
}
