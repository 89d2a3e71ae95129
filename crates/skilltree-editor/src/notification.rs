//! Outbound view updates.

use serde::Serialize;
use skilltree_core::{NodeId, Position};

use crate::state::MouseState;

/// A change to the graph itself, as opposed to transient view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// A node was created.
    Added(NodeId),
    /// A node and all of its connections were removed.
    Removed(NodeId),
    /// A new prerequisite edge was recorded.
    Linked {
        /// Prerequisite side
        prereq: NodeId,
        /// Dependent side
        postreq: NodeId,
    },
    /// A prerequisite edge was removed.
    Unlinked {
        /// Prerequisite side
        prereq: NodeId,
        /// Dependent side
        postreq: NodeId,
    },
    /// A drag finished and these nodes came to rest.
    Moved(Vec<NodeId>),
    /// A node's upgrade payload was replaced.
    Edited(NodeId),
}

/// Something presentation should react to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    /// The set of selected nodes changed (ascending ids).
    SelectionChanged(Vec<NodeId>),
    /// The node under the pointer changed.
    HoverChanged(Option<NodeId>),
    /// The number of nodes being dragged changed.
    DragCountChanged(usize),
    /// The interaction mode changed.
    MouseStateChanged {
        /// New mode
        state: MouseState,
        /// Name of the pending source node, while one exists
        context: Option<String>,
    },
    /// Nodes changed position; edges touching them need redrawing.
    NodesMoved(Vec<NodeId>),
    /// Draw (or move) the temporary line from the pending node to the pointer.
    RubberLine {
        /// Pending node position
        from: Position,
        /// Pointer position
        to: Position,
    },
    /// Remove the temporary line.
    RubberLineCleared,
    /// Scroll the viewport by this amount (opposite to the pointer delta).
    ViewportScrolled {
        /// Horizontal scroll
        dx: f64,
        /// Vertical scroll
        dy: f64,
    },
    /// The graph changed and should be persisted.
    GraphMutated(Mutation),
}

impl Notification {
    /// Returns `true` for [`Notification::GraphMutated`].
    pub fn is_mutation(&self) -> bool {
        matches!(self, Notification::GraphMutated(_))
    }

    /// Returns the mutation, if this is one.
    pub fn as_mutation(&self) -> Option<&Mutation> {
        match self {
            Notification::GraphMutated(m) => Some(m),
            _ => None,
        }
    }
}
