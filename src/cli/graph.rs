//! Display the declared dependency graph of an asset.
//!
//! Nothing is generated: the graph is built from `dependencies()` alone, so
//! this works without an install config.
//!
//! # Output Format
//!
//! ```text
//! $ assetgraph graph cluster-id
//! Cluster ID
//! └── Install Config
//!
//! $ assetgraph graph --order
//! Install Config
//! Cluster ID
//! ```
//!
//! Assets reachable through more than one path are expanded once and marked
//! `(*)` afterwards.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::Target;
use crate::asset::DependencyGraph;

/// Command to print an asset's dependency tree or resolution order.
#[derive(Args, Debug)]
pub struct GraphCommand {
    /// Asset whose graph is shown.
    #[arg(value_enum, default_value_t = Target::ClusterId)]
    target: Target,

    /// Print assets in resolution order (dependencies first) instead of a tree.
    #[arg(long)]
    order: bool,
}

impl GraphCommand {
    /// Print the graph.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Cycle`](crate::core::AssetError::Cycle) if the
    /// declared graph is cyclic.
    pub fn execute(self) -> Result<()> {
        let output = self.render()?;
        print!("{output}");

        if !self.order && output.contains("(*)") {
            println!();
            println!("{}", "(*) = already shown above".bright_black());
        }
        Ok(())
    }

    fn render(&self) -> Result<String> {
        let asset = self.target.asset();
        let graph = DependencyGraph::from_root(asset.as_ref());
        graph.detect_cycles()?;

        if self.order {
            let order = graph.topological_order()?;
            Ok(order.iter().map(|node| format!("{node}\n")).collect())
        } else {
            let root = graph.root().context("dependency graph has no root")?;
            Ok(graph.to_tree_string(root))
        }
    }
}
