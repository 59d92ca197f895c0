//! Static dependency graph of declared asset dependencies.
//!
//! Built by walking `dependencies()` from a root asset without generating
//! anything. Used to inspect a graph (`assetgraph graph`) and to find every
//! cycle member before a run starts.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use super::{AssetKey, DynAsset, dedup_dependencies};
use crate::core::AssetError;

/// A node in the graph: one asset type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetNode {
    /// Identity of the asset type.
    pub key: AssetKey,
    /// Display name of the asset.
    pub name: &'static str,
}

impl fmt::Display for AssetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently being visited (in the DFS stack).
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Directed graph where an edge `a -> b` means `a` depends on `b`.
pub struct DependencyGraph {
    graph: DiGraph<AssetNode, ()>,
    node_map: HashMap<AssetKey, NodeIndex>,
    root: Option<NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            root: None,
        }
    }

    /// Build the graph reachable from `root`.
    ///
    /// Every asset type is expanded once, so cyclic declarations terminate.
    pub fn from_root(root: &dyn DynAsset) -> Self {
        let mut graph = Self::new();
        let root_idx = graph.ensure_node(node_of(root));
        graph.root = Some(root_idx);

        let mut expanded = HashSet::new();
        let mut queue: VecDeque<Box<dyn DynAsset>> = dedup_dependencies(root.dependencies()).into();
        expanded.insert(root.key());
        for dep in &queue {
            graph.add_dependency(node_of(root), node_of(dep.as_ref()));
        }

        while let Some(asset) = queue.pop_front() {
            if !expanded.insert(asset.key()) {
                continue;
            }
            for dep in dedup_dependencies(asset.dependencies()) {
                graph.add_dependency(node_of(asset.as_ref()), node_of(dep.as_ref()));
                queue.push_back(dep);
            }
        }

        graph
    }

    /// Add a node to the graph if it doesn't already exist.
    fn ensure_node(&mut self, node: AssetNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node.key) {
            index
        } else {
            let index = self.graph.add_node(node);
            self.node_map.insert(node.key, index);
            index
        }
    }

    /// Record that `from` depends on `to`. Duplicate edges are ignored.
    pub fn add_dependency(&mut self, from: AssetNode, to: AssetNode) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Root asset the graph was built from, if any.
    pub fn root(&self) -> Option<AssetNode> {
        self.root.map(|idx| self.graph[idx])
    }

    /// Detect cycles using DFS with colors.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Cycle`] listing every asset on the first cycle
    /// found, closing on the repeated asset.
    pub fn detect_cycles(&self) -> Result<(), AssetError> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|idx| (idx, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();

        // Start from the root so the reported cycle reads in resolution order.
        let starts = self.root.into_iter().chain(self.graph.node_indices());
        for node in starts {
            if colors.get(&node) == Some(&Color::White) {
                if let Some(start) = self.dfs_visit(node, &mut colors, &mut path) {
                    let name = |idx: &NodeIndex| self.graph[*idx].name.to_string();
                    return Err(AssetError::Cycle {
                        chain: path[start..].iter().map(name).collect(),
                        required_by: path[..start].iter().rev().map(name).collect(),
                    });
                }
            }
        }

        Ok(())
    }

    /// On a cycle, leaves `path` ending with the repeated node and returns
    /// the index where the cycle starts.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<usize> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.ordered_neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                    path.push(neighbor);
                    return Some(start);
                }
                Some(Color::White) => {
                    if let Some(start) = self.dfs_visit(neighbor, colors, path) {
                        return Some(start);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Neighbors in the order the edges were declared.
    ///
    /// petgraph iterates outgoing edges newest first.
    fn ordered_neighbors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut neighbors: Vec<_> = self.graph.neighbors(node).collect();
        neighbors.reverse();
        neighbors
    }

    /// Assets ordered so every dependency comes before its dependents.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Cycle`] if the graph is cyclic.
    pub fn topological_order(&self) -> Result<Vec<AssetNode>, AssetError> {
        self.detect_cycles()?;

        let indices = toposort(&self.graph, None).map_err(|cycle| AssetError::Cycle {
            chain: vec![self.graph[cycle.node_id()].name.to_string()],
            required_by: Vec::new(),
        })?;
        Ok(indices.into_iter().rev().map(|idx| self.graph[idx]).collect())
    }

    /// Everything `node` depends on, directly or indirectly.
    pub fn transitive_dependencies(&self, node: AssetKey) -> HashSet<AssetNode> {
        let mut deps = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some(&node_idx) = self.node_map.get(&node) {
            queue.push_back(node_idx);

            while let Some(current) = queue.pop_front() {
                for neighbor in self.graph.neighbors(current) {
                    if deps.insert(self.graph[neighbor]) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        deps
    }

    /// Direct dependencies of `node`, in declared order.
    pub fn direct_dependencies(&self, node: AssetKey) -> Vec<AssetNode> {
        match self.node_map.get(&node) {
            Some(&idx) => self.ordered_neighbors(idx).into_iter().map(|n| self.graph[n]).collect(),
            None => Vec::new(),
        }
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of assets in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the dependency tree under `root` with box-drawing characters.
    ///
    /// An asset reached a second time is printed once more with `(*)` and
    /// not expanded again.
    pub fn to_tree_string(&self, root: AssetNode) -> String {
        let mut result = format!("{}\n", root.name);
        let mut visited = HashSet::new();
        visited.insert(root.key);

        let deps = self.direct_dependencies(root.key);
        for (i, dep) in deps.iter().enumerate() {
            self.build_tree_string(*dep, &mut result, "", i == deps.len() - 1, &mut visited);
        }
        result
    }

    fn build_tree_string(
        &self,
        node: AssetNode,
        result: &mut String,
        prefix: &str,
        is_last: bool,
        visited: &mut HashSet<AssetKey>,
    ) {
        let connector = if is_last {
            "└── "
        } else {
            "├── "
        };

        if !visited.insert(node.key) {
            result.push_str(&format!("{prefix}{connector}{} (*)\n", node.name));
            return;
        }
        result.push_str(&format!("{prefix}{connector}{}\n", node.name));

        let child_prefix = if is_last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        let deps = self.direct_dependencies(node.key);
        for (i, dep) in deps.iter().enumerate() {
            self.build_tree_string(*dep, result, &child_prefix, i == deps.len() - 1, visited);
        }
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

fn node_of(asset: &dyn DynAsset) -> AssetNode {
    AssetNode {
        key: asset.key(),
        name: asset.name(),
    }
}
