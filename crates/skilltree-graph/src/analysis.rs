//! Read-only diagnostics over a skill tree.
//!
//! Provides:
//! - Conversion to a petgraph `DiGraph` (edges run prerequisite → dependent)
//! - Cycle detection
//! - Roots (no prerequisites) and leaves (no postrequisites)
//!
//! Nothing here rejects edits; the editor allows cyclic trees.

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

use skilltree_core::NodeId;

use crate::store::GraphStore;

/// Overview of a graph's shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GraphSummary {
    /// Number of nodes.
    pub node_count: usize,
    /// Number of prerequisite edges.
    pub edge_count: usize,
    /// Nodes without prerequisites, ascending.
    pub roots: Vec<NodeId>,
    /// Nodes without postrequisites, ascending.
    pub leaves: Vec<NodeId>,
    /// Whether any dependency cycle exists.
    pub has_cycles: bool,
}

/// Builds a petgraph view of the store.
///
/// Returns the graph plus the id → index lookup table.
pub fn to_digraph(store: &GraphStore) -> (DiGraph<NodeId, ()>, HashMap<NodeId, NodeIndex>) {
    let mut graph = DiGraph::with_capacity(store.len(), store.edge_count());
    let mut indices = HashMap::with_capacity(store.len());

    for node in store.nodes_sorted() {
        indices.insert(node.id, graph.add_node(node.id));
    }
    for (pre, post) in store.edges() {
        if let (Some(&from), Some(&to)) = (indices.get(&pre), indices.get(&post)) {
            graph.add_edge(from, to, ());
        }
    }

    (graph, indices)
}

/// Returns `true` if following prerequisites can lead back to the start.
pub fn has_cycles(store: &GraphStore) -> bool {
    let (graph, _) = to_digraph(store);
    is_cyclic_directed(&graph)
}

/// Nodes that have no prerequisites.
pub fn roots(store: &GraphStore) -> Vec<NodeId> {
    store
        .nodes_sorted()
        .into_iter()
        .filter(|n| n.prerequisite_ids.is_empty())
        .map(|n| n.id)
        .collect()
}

/// Nodes that nothing depends on.
pub fn leaves(store: &GraphStore) -> Vec<NodeId> {
    store
        .nodes_sorted()
        .into_iter()
        .filter(|n| n.postrequisite_ids.is_empty())
        .map(|n| n.id)
        .collect()
}

/// Computes a [`GraphSummary`].
pub fn summarize(store: &GraphStore) -> GraphSummary {
    GraphSummary {
        node_count: store.len(),
        edge_count: store.edge_count(),
        roots: roots(store),
        leaves: leaves(store),
        has_cycles: has_cycles(store),
    }
}
