//! Unit test suite for assetgraph
//!
//! Library-level tests that exercise the public API without the binary.
//!
//! ```bash
//! cargo test --test unit
//! ```
//!
//! - **resolver**: Custom asset graphs through the public resolver API
//! - **cluster_id**: Cluster identity resolution end to end from YAML
//! - **infra_id_props**: Property tests for infra ID derivation

mod cluster_id;
mod infra_id_props;
mod resolver;
