use std::sync::Arc;

use assetgraph::asset::{ParallelResolver, Resolver};
use assetgraph::installconfig::{ClusterId, InstallConfigAsset};
use assetgraph::random::SequenceRandom;
use assetgraph::test_utils::InstallConfigFixture;
use assetgraph::types::InstallConfig;

fn load(fixture: &InstallConfigFixture) -> InstallConfig {
    InstallConfig::from_yaml(&fixture.content, &fixture.name).unwrap()
}

#[test]
fn test_cluster_id_resolved_twice_is_one_value() {
    let random = Arc::new(SequenceRandom::new().with_uuids(["a3c0e2f4-1b2d-4e5f-8a9b-0c1d2e3f4a5b"]));
    let mut resolver = Resolver::new(random.clone());
    resolver.provide::<InstallConfigAsset>(load(&InstallConfigFixture::aws("prod")));

    let first = resolver.resolve(&ClusterId).unwrap();
    let second = resolver.resolve(&ClusterId).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.uuid, "a3c0e2f4-1b2d-4e5f-8a9b-0c1d2e3f4a5b");
    assert_eq!(random.uuid_draws(), 1);
    assert_eq!(resolver.generation_count(), 1);
    assert!(resolver.get::<ClusterId>().is_some());
}

#[test]
fn test_gcp_forty_character_name() {
    let name = "abcdefghijklmnopqrstuvwxyz0123456789wxyz";
    assert_eq!(name.len(), 40);

    let mut resolver = Resolver::default();
    resolver.provide::<InstallConfigAsset>(load(&InstallConfigFixture::gcp(name)));

    let identity = resolver.resolve(&ClusterId).unwrap();
    assert_eq!(identity.infra_id.len(), 12);
    assert!(identity.infra_id.starts_with("abcdef-"));
}

#[test]
fn test_unicode_cluster_name() {
    let mut resolver = Resolver::new(Arc::new(SequenceRandom::new()));
    resolver.provide::<InstallConfigAsset>(load(&InstallConfigFixture::aws("prod cluster ☃")));

    let identity = resolver.resolve(&ClusterId).unwrap();
    assert_eq!(identity.infra_id, "prod-cluster---bbbbb");
}

#[test]
fn test_parallel_resolver_matches_sequential() {
    let config = load(&InstallConfigFixture::gcp("My_Cluster!!"));

    let mut sequential = Resolver::new(Arc::new(SequenceRandom::new()));
    sequential.provide::<InstallConfigAsset>(config.clone());
    let parallel = ParallelResolver::new(Arc::new(SequenceRandom::new()));
    parallel.provide::<InstallConfigAsset>(config);

    let a = sequential.resolve(&ClusterId).unwrap();
    let b = parallel.resolve(&ClusterId).unwrap();
    assert_eq!(a, b);
    assert_eq!(b.infra_id, "My-Clu-bbbbb");
}
