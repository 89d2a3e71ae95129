//! Bidirectional prerequisite/postrequisite edges.
//!
//! Every edge is stored twice: the prerequisite id in the dependent node's
//! `prerequisite_ids`, and the dependent id in the prerequisite's
//! `postrequisite_ids`. All writes go through [`RelationshipManager`], which
//! updates both sides in the same call.
//!
//! Setting B as a postrequisite of A is the same edge as setting A as a
//! prerequisite of B, so [`RelationshipManager::add_postrequisite`] simply
//! forwards to [`RelationshipManager::add_prerequisite`].
//!
//! Cycles are allowed. Callers that need an acyclic tree must check for
//! themselves (see [`crate::analysis::has_cycles`]).

use skilltree_core::{Error, NodeId, Result};

use crate::store::GraphStore;

/// Result of an attempt to add an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new edge was recorded on both endpoints.
    Linked,
    /// The edge already existed; nothing changed.
    AlreadyLinked,
    /// Both endpoints were the same node; nothing changed.
    SelfLoop,
}

impl LinkOutcome {
    /// Returns `true` if the graph changed.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Linked)
    }
}

/// Result of an attempt to remove an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkOutcome {
    /// The edge `prereq -> postreq` was removed from both endpoints.
    Removed {
        /// Prerequisite side of the removed edge
        prereq: NodeId,
        /// Postrequisite side of the removed edge
        postreq: NodeId,
    },
    /// No edge joined the two nodes.
    NotLinked,
}

impl UnlinkOutcome {
    /// Returns `true` if the graph changed.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// Borrowing handle that edits edge sets of nodes in a [`GraphStore`].
///
/// It can never create or destroy node records.
pub struct RelationshipManager<'g> {
    store: &'g mut GraphStore,
}

impl<'g> RelationshipManager<'g> {
    pub(crate) fn new(store: &'g mut GraphStore) -> Self {
        Self { store }
    }

    fn require(&self, id: NodeId) -> Result<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(Error::unknown_node(id))
        }
    }

    /// Makes `prereq` a prerequisite of `node`.
    ///
    /// Unknown ids are rejected before anything is touched. Self-loops and
    /// existing edges are no-ops.
    pub fn add_prerequisite(&mut self, prereq: NodeId, node: NodeId) -> Result<LinkOutcome> {
        self.require(prereq)?;
        self.require(node)?;

        if prereq == node {
            log::debug!("Ignoring self-loop on node {node}");
            return Ok(LinkOutcome::SelfLoop);
        }

        let dependent = self.store.node_mut(node)?;
        if !dependent.prerequisite_ids.insert(prereq) {
            return Ok(LinkOutcome::AlreadyLinked);
        }
        self.store.node_mut(prereq)?.postrequisite_ids.insert(node);

        log::debug!("Linked {prereq} -> {node}");
        Ok(LinkOutcome::Linked)
    }

    /// Makes `postreq` a postrequisite of `node`.
    ///
    /// Identical to `add_prerequisite(node, postreq)`.
    pub fn add_postrequisite(&mut self, node: NodeId, postreq: NodeId) -> Result<LinkOutcome> {
        self.add_prerequisite(node, postreq)
    }

    /// Removes the edge between `a` and `b`, whichever direction it runs.
    pub fn delete_connection(&mut self, a: NodeId, b: NodeId) -> Result<UnlinkOutcome> {
        self.require(a)?;
        self.require(b)?;

        if !self.store.get_node(a).is_some_and(|n| n.is_connected_to(b)) {
            return Ok(UnlinkOutcome::NotLinked);
        }
        let (prereq, postreq) = if self.has_edge(a, b) { (a, b) } else { (b, a) };

        self.store.node_mut(postreq)?.prerequisite_ids.remove(&prereq);
        self.store.node_mut(prereq)?.postrequisite_ids.remove(&postreq);

        log::debug!("Unlinked {prereq} -> {postreq}");
        Ok(UnlinkOutcome::Removed { prereq, postreq })
    }

    /// Removes every edge touching `node` and returns how many were removed.
    ///
    /// Node deletion calls this before the record leaves the store.
    pub fn sever_all(&mut self, node: NodeId) -> Result<usize> {
        let target = self.store.node_mut(node)?;
        let prereqs = std::mem::take(&mut target.prerequisite_ids);
        let postreqs = std::mem::take(&mut target.postrequisite_ids);
        let severed = prereqs.len() + postreqs.len();

        for pre in prereqs {
            if let Ok(other) = self.store.node_mut(pre) {
                other.postrequisite_ids.remove(&node);
            }
        }
        for post in postreqs {
            if let Ok(other) = self.store.node_mut(post) {
                other.prerequisite_ids.remove(&node);
            }
        }

        if severed > 0 {
            log::debug!("Severed {severed} edge(s) of node {node}");
        }
        Ok(severed)
    }

    /// Returns `true` if `prereq -> postreq` exists.
    pub fn has_edge(&self, prereq: NodeId, postreq: NodeId) -> bool {
        self.store
            .get_node(postreq)
            .is_some_and(|n| n.prerequisite_ids.contains(&prereq))
    }
}

// ============================================================================
// Tests
// ============================================================================
