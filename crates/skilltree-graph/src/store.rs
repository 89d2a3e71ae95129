//! The node registry.
//!
//! [`GraphStore`] is the single authority over node records and node ids.
//! Every id-assigning operation (create, load-time insert, renumbering)
//! goes through it, which is what keeps ids unique.
//!
//! # Identity counter
//!
//! The counter is monotonic within a session: deleting a node never hands
//! its id back out. Ids become dense again when [`GraphStore::reassign_ids`]
//! runs, which persistence does before every save. Once `u32::MAX` has been
//! handed out the counter is exhausted and creation fails until the graph
//! is renumbered.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use skilltree_core::{Error, NodeId, Position, Result, SkillNode, Upgrade};

use crate::relations::RelationshipManager;

/// Mapping from old ids to new ids produced by a renumbering.
pub type IdMapping = BTreeMap<NodeId, NodeId>;

// ============================================================================
// InvariantViolation
// ============================================================================

/// A structural problem found by [`GraphStore::check_invariants`].
///
/// None of these can be produced through the public API; the check exists
/// for tests and for diagnosing hand-edited files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// `from` lists `to` as a postrequisite but `to` does not list `from`
    /// as a prerequisite, or vice versa.
    AsymmetricEdge {
        /// Prerequisite side of the edge
        prereq: NodeId,
        /// Postrequisite side of the edge
        postreq: NodeId,
    },
    /// A node references itself.
    SelfLoop {
        /// The offending node
        id: NodeId,
    },
    /// An edge set references a node that is not live.
    DanglingReference {
        /// Node holding the reference
        node: NodeId,
        /// The missing id
        missing: NodeId,
    },
    /// A registry key disagrees with the id stored in the record.
    KeyMismatch {
        /// Registry key
        key: NodeId,
        /// Id inside the record
        id: NodeId,
    },
    /// The identity counter would hand out an id that is already live.
    CounterBehind {
        /// Counter value
        next: NodeId,
        /// Largest live id
        max: NodeId,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsymmetricEdge { prereq, postreq } => {
                write!(f, "edge {prereq} -> {postreq} is only recorded on one side")
            }
            Self::SelfLoop { id } => write!(f, "node {id} references itself"),
            Self::DanglingReference { node, missing } => {
                write!(f, "node {node} references missing node {missing}")
            }
            Self::KeyMismatch { key, id } => {
                write!(f, "registry key {key} holds node {id}")
            }
            Self::CounterBehind { next, max } => {
                write!(f, "next id {next} is not above largest id {max}")
            }
        }
    }
}

// ============================================================================
// GraphStore
// ============================================================================

/// Owner of every skill node and of the identity counter.
#[derive(Clone, Debug)]
pub struct GraphStore {
    nodes: HashMap<NodeId, SkillNode>,
    // None once u32::MAX is taken.
    next_id: Option<NodeId>,
}

impl GraphStore {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: Some(NodeId::new(0)),
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Checks if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Gets a node by id.
    pub fn get_node(&self, id: NodeId) -> Option<&SkillNode> {
        self.nodes.get(&id)
    }

    /// Returns an iterator over all nodes, in no particular order.
    pub fn all_nodes(&self) -> impl Iterator<Item = &SkillNode> {
        self.nodes.values()
    }

    /// Returns all nodes sorted by ascending id.
    pub fn nodes_sorted(&self) -> Vec<&SkillNode> {
        let mut nodes: Vec<&SkillNode> = self.nodes.values().collect();
        nodes.sort_by_key(|n| n.id);
        nodes
    }

    /// The id the next [`create_node`](Self::create_node) call will assign,
    /// or `None` if the id space is exhausted.
    pub fn next_id(&self) -> Option<NodeId> {
        self.next_id
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.postrequisite_ids.len()).sum()
    }

    /// Returns every edge as a `(prerequisite, postrequisite)` pair, sorted.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges: Vec<(NodeId, NodeId)> = self
            .nodes
            .values()
            .flat_map(|n| n.postrequisite_ids.iter().map(move |post| (n.id, *post)))
            .collect();
        edges.sort();
        edges
    }

    /// Returns a handle for editing edges.
    pub fn relations(&mut self) -> RelationshipManager<'_> {
        RelationshipManager::new(self)
    }

    // ========================================================================
    // Creation and removal
    // ========================================================================

    /// Creates a node with no edges and returns its freshly allocated id.
    ///
    /// Without an explicit upgrade the node gets a placeholder named after
    /// its id. Fails with [`Error::InvalidPosition`] for non-finite
    /// coordinates and [`Error::IdSpaceExhausted`] when no id is left.
    pub fn create_node(&mut self, position: Position, upgrade: Option<Upgrade>) -> Result<NodeId> {
        let position = position.validated()?;
        let id = self.next_id.ok_or(Error::IdSpaceExhausted)?;
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        self.next_id = id.checked_next();
        let upgrade = upgrade.unwrap_or_else(|| Upgrade::placeholder(id));
        self.nodes.insert(id, SkillNode::new(id, position, upgrade));
        log::debug!("Created node {id} at ({}, {})", position.x, position.y);
        Ok(id)
    }

    /// Inserts a node under a caller-chosen id (the load path).
    ///
    /// The counter is raised past `id` so later creations never collide;
    /// inserting `u32::MAX` exhausts it.
    pub fn insert_node(&mut self, id: NodeId, position: Position, upgrade: Upgrade) -> Result<()> {
        let position = position.validated()?;
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        self.nodes.insert(id, SkillNode::new(id, position, upgrade));
        if self.next_id.is_some_and(|next| id >= next) {
            self.next_id = id.checked_next();
        }
        Ok(())
    }

    /// Removes a node record that has no edges left.
    ///
    /// Fails with [`Error::StillConnected`] if any edge still touches the
    /// node: edges must be severed through the relationship manager first,
    /// so a removal can never leave dangling references. Use
    /// [`remove_node`](Self::remove_node) to do both.
    pub fn delete_node(&mut self, id: NodeId) -> Result<SkillNode> {
        let node = self.nodes.get(&id).ok_or_else(|| Error::unknown_node(id))?;
        if !node.is_isolated() {
            return Err(Error::StillConnected {
                id,
                edges: node.degree(),
            });
        }
        let node = self.nodes.remove(&id).ok_or_else(|| Error::unknown_node(id))?;
        log::debug!("Deleted node {id}");
        Ok(node)
    }

    /// Severs every edge of a node, then removes it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<SkillNode> {
        self.relations().sever_all(id)?;
        self.delete_node(id)
    }

    // ========================================================================
    // Payload edits
    // ========================================================================

    /// Moves a node to an absolute position.
    pub fn set_position(&mut self, id: NodeId, position: Position) -> Result<()> {
        let node = self.node_mut(id)?;
        node.position = position.validated()?;
        Ok(())
    }

    /// Moves a node by a delta and returns its new position.
    ///
    /// A delta that would leave the node at a non-finite position is
    /// rejected and the node stays where it was.
    pub fn translate_node(&mut self, id: NodeId, dx: f64, dy: f64) -> Result<Position> {
        let node = self.node_mut(id)?;
        node.position = node.position.translated(dx, dy).validated()?;
        Ok(node.position)
    }

    /// Replaces a node's upgrade payload.
    pub fn set_upgrade(&mut self, id: NodeId, upgrade: Upgrade) -> Result<()> {
        self.node_mut(id)?.upgrade = upgrade;
        Ok(())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut SkillNode> {
        self.nodes.get_mut(&id).ok_or_else(|| Error::unknown_node(id))
    }

    // ========================================================================
    // Renumbering
    // ========================================================================

    /// Renumbers the graph densely in canonical layout order.
    ///
    /// Nodes are sorted by ascending `y`, then ascending `x`; nodes at the
    /// same position keep their relative id order.
    pub fn reassign_ids(&mut self) -> IdMapping {
        self.reassign_ids_by(|a, b| a.position.layout_cmp(&b.position))
    }

    /// Renumbers the graph densely in the order given by `cmp`.
    ///
    /// Ids become `0..n-1` and every edge reference is rewritten. The new
    /// registry is built completely before it replaces the old one, so no
    /// partially renumbered graph is ever observable.
    pub fn reassign_ids_by<F>(&mut self, mut cmp: F) -> IdMapping
    where
        F: FnMut(&SkillNode, &SkillNode) -> Ordering,
    {
        let mut order: Vec<&SkillNode> = self.nodes.values().collect();
        order.sort_by(|a, b| cmp(a, b).then_with(|| a.id.cmp(&b.id)));

        let mapping: IdMapping = order
            .iter()
            .enumerate()
            .map(|(new, node)| (node.id, NodeId::new(new as u32)))
            .collect();

        let remap = |ids: &BTreeSet<NodeId>| -> BTreeSet<NodeId> {
            ids.iter().filter_map(|id| mapping.get(id).copied()).collect()
        };

        let rebuilt: HashMap<NodeId, SkillNode> = order
            .iter()
            .filter_map(|node| {
                let new_id = *mapping.get(&node.id)?;
                Some((
                    new_id,
                    SkillNode {
                        id: new_id,
                        position: node.position,
                        upgrade: node.upgrade.clone(),
                        prerequisite_ids: remap(&node.prerequisite_ids),
                        postrequisite_ids: remap(&node.postrequisite_ids),
                    },
                ))
            })
            .collect();

        self.next_id = u32::try_from(rebuilt.len()).ok().map(NodeId::new);
        self.nodes = rebuilt;
        log::debug!("Reassigned ids for {} node(s)", self.nodes.len());
        mapping
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Walks the whole graph and reports every broken invariant.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for (key, node) in &self.nodes {
            if *key != node.id {
                violations.push(InvariantViolation::KeyMismatch {
                    key: *key,
                    id: node.id,
                });
            }
            if node.prerequisite_ids.contains(key) || node.postrequisite_ids.contains(key) {
                violations.push(InvariantViolation::SelfLoop { id: *key });
            }
            for pre in &node.prerequisite_ids {
                match self.nodes.get(pre) {
                    None => violations.push(InvariantViolation::DanglingReference {
                        node: *key,
                        missing: *pre,
                    }),
                    Some(other) if !other.postrequisite_ids.contains(key) => {
                        violations.push(InvariantViolation::AsymmetricEdge {
                            prereq: *pre,
                            postreq: *key,
                        })
                    }
                    Some(_) => {}
                }
            }
            for post in &node.postrequisite_ids {
                match self.nodes.get(post) {
                    None => violations.push(InvariantViolation::DanglingReference {
                        node: *key,
                        missing: *post,
                    }),
                    Some(other) if !other.prerequisite_ids.contains(key) => {
                        violations.push(InvariantViolation::AsymmetricEdge {
                            prereq: *key,
                            postreq: *post,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        if let Some(max) = self.nodes.keys().max()
            && let Some(next) = self.next_id
            && *max >= next
        {
            violations.push(InvariantViolation::CounterBehind { next, max: *max });
        }

        violations
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pos(x: f64, y: f64) -> Position {
        Position::new(x, y)
    }

    // ------------------------------------------------------------------------
    // Creation tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_store_new() {
        let store = GraphStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.next_id(), Some(NodeId::new(0)));
    }

    #[test]
    fn test_create_node_allocates_sequential_ids() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(10.0, 0.0), None).unwrap();
        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_node(b).unwrap().upgrade.name, "Node 1");
        assert!(store.get_node(a).unwrap().is_isolated());
    }

    #[test]
    fn test_create_node_with_upgrade() {
        let mut store = GraphStore::new();
        let id = store.create_node(pos(5.0, 5.0), Some(Upgrade::new("Fireball"))).unwrap();
        assert_eq!(store.get_node(id).unwrap().upgrade.name, "Fireball");
    }

    #[test]
    fn test_insert_node_rejects_duplicate() {
        let mut store = GraphStore::new();
        store
            .insert_node(NodeId::new(3), pos(0.0, 0.0), Upgrade::new("A"))
            .unwrap();
        let err = store
            .insert_node(NodeId::new(3), pos(1.0, 1.0), Upgrade::new("B"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateId { id } if id == NodeId::new(3)));
        assert_eq!(store.get_node(NodeId::new(3)).unwrap().upgrade.name, "A");
    }

    #[test]
    fn test_insert_node_raises_counter() {
        let mut store = GraphStore::new();
        store
            .insert_node(NodeId::new(7), pos(0.0, 0.0), Upgrade::new("A"))
            .unwrap();
        store
            .insert_node(NodeId::new(2), pos(0.0, 0.0), Upgrade::new("B"))
            .unwrap();
        assert_eq!(store.next_id(), Some(NodeId::new(8)));
        assert_eq!(store.create_node(pos(0.0, 0.0), None).unwrap(), NodeId::new(8));
    }

    #[test]
    fn test_create_node_fails_when_id_space_exhausted() {
        let mut store = GraphStore::new();
        store
            .insert_node(NodeId::new(0), pos(0.0, 0.0), Upgrade::new("Low"))
            .unwrap();
        store
            .insert_node(NodeId::new(u32::MAX), pos(60.0, 0.0), Upgrade::new("Max"))
            .unwrap();
        store
            .relations()
            .add_prerequisite(NodeId::new(0), NodeId::new(u32::MAX))
            .unwrap();
        assert_eq!(store.next_id(), None);

        let err = store.create_node(pos(0.0, 60.0), None).unwrap_err();
        assert!(matches!(err, Error::IdSpaceExhausted));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get_node(NodeId::new(u32::MAX)).unwrap().upgrade.name, "Max");
        assert!(store.check_invariants().is_empty());

        store.reassign_ids();
        assert_eq!(store.create_node(pos(0.0, 60.0), None).unwrap(), NodeId::new(2));
        assert_eq!(store.edges(), vec![(NodeId::new(0), NodeId::new(1))]);
    }

    #[test]
    fn test_non_finite_positions_are_rejected() {
        let mut store = GraphStore::new();
        let err = store.create_node(pos(f64::NAN, 0.0), None).unwrap_err();
        assert!(matches!(err, Error::InvalidPosition { .. }));
        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(NodeId::new(0)));

        let a = store.create_node(pos(10.0, 20.0), None).unwrap();
        assert!(store.set_position(a, pos(0.0, f64::INFINITY)).is_err());
        assert!(store.translate_node(a, f64::MAX, 0.0).is_ok());
        assert!(store.translate_node(a, f64::MAX, 0.0).is_err());
        assert_eq!(store.get_node(a).unwrap().position.y, 20.0);
        assert!(store.all_nodes().all(|n| n.position.is_finite()));
        assert!(
            store
                .insert_node(NodeId::new(5), pos(f64::NEG_INFINITY, 0.0), Upgrade::new("X"))
                .is_err()
        );
    }

    // ------------------------------------------------------------------------
    // Removal tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_delete_unknown_node() {
        let mut store = GraphStore::new();
        let err = store.delete_node(NodeId::new(9)).unwrap_err();
        assert!(matches!(err, Error::UnknownNode { .. }));
    }

    #[test]
    fn test_delete_connected_node_is_refused() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(100.0, 0.0), None).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();

        let err = store.delete_node(a).unwrap_err();
        assert!(matches!(err, Error::StillConnected { edges: 1, .. }));
        assert!(store.contains(a));
        assert!(store.check_invariants().is_empty());
    }

    #[test]
    fn test_counter_is_not_rolled_back() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let _b = store.create_node(pos(0.0, 0.0), None).unwrap();
        store.delete_node(a).unwrap();
        let c = store.create_node(pos(0.0, 0.0), None).unwrap();
        assert_eq!(c, NodeId::new(2));
        assert!(store.check_invariants().is_empty());
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(100.0, 0.0), None).unwrap();
        let c = store.create_node(pos(200.0, 0.0), None).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();
        store.relations().add_prerequisite(b, c).unwrap();

        let removed = store.remove_node(b).unwrap();
        assert_eq!(removed.id, b);
        assert!(removed.is_isolated());
        assert!(store.get_node(a).unwrap().postrequisite_ids.is_empty());
        assert!(store.get_node(c).unwrap().prerequisite_ids.is_empty());
        assert_eq!(store.edge_count(), 0);
        assert!(store.check_invariants().is_empty());
    }

    #[test]
    fn test_scenario_delete_prerequisite() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(100.0, 0.0), None).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();

        assert_eq!(
            store.get_node(b).unwrap().prerequisite_ids,
            BTreeSet::from([a])
        );
        assert_eq!(
            store.get_node(a).unwrap().postrequisite_ids,
            BTreeSet::from([b])
        );

        store.remove_node(a).unwrap();
        assert!(store.get_node(b).unwrap().prerequisite_ids.is_empty());
    }

    // ------------------------------------------------------------------------
    // Payload edit tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_translate_and_set_position() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(10.0, 10.0), None).unwrap();
        assert_eq!(store.translate_node(a, 5.0, -5.0).unwrap(), pos(15.0, 5.0));
        store.set_position(a, pos(0.0, 0.0)).unwrap();
        assert_eq!(store.get_node(a).unwrap().position, pos(0.0, 0.0));
        assert!(store.translate_node(NodeId::new(42), 1.0, 1.0).is_err());
    }

    #[test]
    fn test_set_upgrade() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        store
            .set_upgrade(a, Upgrade::new("Dash").with_description("Move fast"))
            .unwrap();
        let node = store.get_node(a).unwrap();
        assert_eq!(node.upgrade.name, "Dash");
        assert_eq!(node.upgrade.description, "Move fast");
    }

    // ------------------------------------------------------------------------
    // Renumbering tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_reassign_ids_orders_by_y_then_x() {
        let mut store = GraphStore::new();
        let low_right = store.create_node(pos(100.0, 200.0), Some(Upgrade::new("LR"))).unwrap();
        let top = store.create_node(pos(500.0, 0.0), Some(Upgrade::new("T"))).unwrap();
        let low_left = store.create_node(pos(0.0, 200.0), Some(Upgrade::new("LL"))).unwrap();

        let mapping = store.reassign_ids();

        assert_eq!(mapping[&top], NodeId::new(0));
        assert_eq!(mapping[&low_left], NodeId::new(1));
        assert_eq!(mapping[&low_right], NodeId::new(2));
        assert_eq!(store.get_node(NodeId::new(0)).unwrap().upgrade.name, "T");
        assert_eq!(store.get_node(NodeId::new(1)).unwrap().upgrade.name, "LL");
        assert_eq!(store.get_node(NodeId::new(2)).unwrap().upgrade.name, "LR");
        assert_eq!(store.next_id(), Some(NodeId::new(3)));
    }

    #[test]
    fn test_reassign_ids_rewrites_edges() {
        let mut store = GraphStore::new();
        let b = store.create_node(pos(0.0, 100.0), Some(Upgrade::new("B"))).unwrap();
        let a = store.create_node(pos(0.0, 0.0), Some(Upgrade::new("A"))).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();

        let mapping = store.reassign_ids();
        let new_a = mapping[&a];
        let new_b = mapping[&b];

        assert_eq!(store.edges(), vec![(new_a, new_b)]);
        assert_eq!(store.get_node(new_a).unwrap().upgrade.name, "A");
        assert!(store.check_invariants().is_empty());
    }

    #[test]
    fn test_reassign_ids_fills_gaps() {
        let mut store = GraphStore::new();
        let ids: Vec<NodeId> = (0..5)
            .map(|i| store.create_node(pos(0.0, f64::from(i)), None).unwrap())
            .collect();
        store.delete_node(ids[1]).unwrap();
        store.delete_node(ids[3]).unwrap();

        store.reassign_ids();

        let live: Vec<NodeId> = store.nodes_sorted().iter().map(|n| n.id).collect();
        assert_eq!(live, vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)]);
        assert_eq!(store.next_id(), Some(NodeId::new(3)));
    }

    #[test]
    fn test_reassign_ids_ties_keep_id_order() {
        let mut store = GraphStore::new();
        let first = store.create_node(pos(0.0, 0.0), Some(Upgrade::new("first"))).unwrap();
        let second = store.create_node(pos(0.0, 0.0), Some(Upgrade::new("second"))).unwrap();
        store.delete_node(first).unwrap();
        let third = store.create_node(pos(0.0, 0.0), Some(Upgrade::new("third"))).unwrap();

        let mapping = store.reassign_ids();
        assert_eq!(mapping[&second], NodeId::new(0));
        assert_eq!(mapping[&third], NodeId::new(1));
    }

    #[test]
    fn test_reassign_ids_by_custom_order() {
        let mut store = GraphStore::new();
        store.create_node(pos(0.0, 0.0), Some(Upgrade::new("zeta"))).unwrap();
        store.create_node(pos(0.0, 0.0), Some(Upgrade::new("alpha"))).unwrap();

        store.reassign_ids_by(|a, b| a.upgrade.name.cmp(&b.upgrade.name));
        assert_eq!(store.get_node(NodeId::new(0)).unwrap().upgrade.name, "alpha");
    }

    #[test]
    fn test_reassign_ids_empty_graph() {
        let mut store = GraphStore::new();
        assert!(store.reassign_ids().is_empty());
        assert_eq!(store.next_id(), Some(NodeId::new(0)));
    }

    // ------------------------------------------------------------------------
    // Diagnostics tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_check_invariants_detects_asymmetry() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(0.0, 0.0), None).unwrap();
        store.node_mut(b).unwrap().prerequisite_ids.insert(a);

        let violations = store.check_invariants();
        assert_eq!(
            violations,
            vec![InvariantViolation::AsymmetricEdge { prereq: a, postreq: b }]
        );
    }

    #[test]
    fn test_check_invariants_detects_dangling() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        store
            .node_mut(a)
            .unwrap()
            .postrequisite_ids
            .insert(NodeId::new(99));

        let violations = store.check_invariants();
        assert_eq!(violations.len(), 1);
        assert!(violations[0].to_string().contains("missing node 99"));
    }

    #[test]
    fn test_edges_sorted() {
        let mut store = GraphStore::new();
        let a = store.create_node(pos(0.0, 0.0), None).unwrap();
        let b = store.create_node(pos(0.0, 0.0), None).unwrap();
        let c = store.create_node(pos(0.0, 0.0), None).unwrap();
        store.relations().add_prerequisite(c, a).unwrap();
        store.relations().add_prerequisite(a, b).unwrap();
        assert_eq!(store.edges(), vec![(a, b), (c, a)]);
        assert_eq!(store.edge_count(), 2);
    }
}
