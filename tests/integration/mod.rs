//! Integration test suite for assetgraph
//!
//! End-to-end tests that run the compiled binary against temporary project
//! directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **create**: Resolving assets from install configs, output formats, settings
//! - **graph**: Dependency tree and resolution order output
//! - **infra_id**: Direct infra ID derivation and argument validation
//! - **errors**: Exit codes and user-facing error messages

#[path = "../common/mod.rs"]
mod common;

mod graph;
mod infra_id;
