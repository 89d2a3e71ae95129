//! The skill node record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{NodeId, Position, Upgrade};

/// A node in the skill tree.
///
/// Edge sets hold ids, never references, so the graph owns no reference
/// cycles. Only the graph store may construct nodes that enter a graph;
/// the edge sets are kept symmetric by the relationship manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNode {
    /// Identity within the owning graph.
    pub id: NodeId,
    /// Location on the canvas.
    pub position: Position,
    /// Upgrade payload.
    pub upgrade: Upgrade,
    /// Nodes that must precede this one (incoming edges).
    pub prerequisite_ids: BTreeSet<NodeId>,
    /// Nodes that depend on this one (outgoing edges).
    pub postrequisite_ids: BTreeSet<NodeId>,
}

impl SkillNode {
    /// Creates a node with no edges.
    pub fn new(id: NodeId, position: Position, upgrade: Upgrade) -> Self {
        Self {
            id,
            position,
            upgrade,
            prerequisite_ids: BTreeSet::new(),
            postrequisite_ids: BTreeSet::new(),
        }
    }

    /// Number of edges touching this node, in either direction.
    pub fn degree(&self) -> usize {
        self.prerequisite_ids.len() + self.postrequisite_ids.len()
    }

    /// Returns `true` if no edge touches this node.
    pub fn is_isolated(&self) -> bool {
        self.degree() == 0
    }

    /// Returns `true` if `other` is adjacent to this node in either direction.
    pub fn is_connected_to(&self, other: NodeId) -> bool {
        self.prerequisite_ids.contains(&other) || self.postrequisite_ids.contains(&other)
    }
}
