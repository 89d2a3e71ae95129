//! Inbound input events.
//!
//! Hit-testing belongs to presentation: every event that happens "on" a
//! node carries that node's id, and `None` means empty canvas.

use serde::{Deserialize, Serialize};
use skilltree_core::{NodeId, Position};

/// Mouse button that produced a press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left button: select, drag, and pick targets.
    Primary,
    /// Middle button: pan.
    Middle,
    /// Right button: context menus (resolved by presentation).
    Secondary,
}

/// Entries of the node and canvas context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextActionKind {
    /// Create a blank skill at the menu position (canvas menu).
    AddSkill,
    /// Remove the node and all of its connections.
    DeleteNode,
    /// Start picking a prerequisite for the node.
    SetPrerequisite,
    /// Start picking a postrequisite for the node.
    SetPostrequisite,
    /// Start picking a node whose connection to this one is removed.
    DeleteConnections,
}

impl ContextActionKind {
    /// Returns `true` for actions that need a target node.
    pub fn needs_target(&self) -> bool {
        !matches!(self, ContextActionKind::AddSkill)
    }
}

/// One unit of user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// A mouse button went down.
    PointerPress {
        /// Which button
        button: PointerButton,
        /// Canvas position of the pointer
        position: Position,
        /// Node under the pointer
        target: Option<NodeId>,
    },
    /// The pointer moved.
    PointerMove {
        /// Canvas position of the pointer
        position: Position,
        /// Node under the pointer
        hover: Option<NodeId>,
    },
    /// A mouse button went up.
    PointerRelease {
        /// Which button
        button: PointerButton,
        /// Canvas position of the pointer
        position: Position,
        /// Node under the pointer
        target: Option<NodeId>,
    },
    /// A context menu entry was chosen.
    ContextAction {
        /// The chosen entry
        kind: ContextActionKind,
        /// Node the menu was opened on
        target: Option<NodeId>,
        /// Canvas position the menu was opened at
        position: Position,
    },
    /// The delete key was pressed.
    DeleteKeyPressed,
    /// The current interaction was abandoned (escape, focus loss).
    Cancel,
}

impl EditorEvent {
    /// Shorthand for [`EditorEvent::PointerPress`].
    pub fn press(button: PointerButton, position: Position, target: Option<NodeId>) -> Self {
        Self::PointerPress {
            button,
            position,
            target,
        }
    }

    /// Shorthand for [`EditorEvent::PointerMove`].
    pub fn moved(position: Position, hover: Option<NodeId>) -> Self {
        Self::PointerMove { position, hover }
    }

    /// Shorthand for [`EditorEvent::PointerRelease`].
    pub fn release(button: PointerButton, position: Position, target: Option<NodeId>) -> Self {
        Self::PointerRelease {
            button,
            position,
            target,
        }
    }

    /// Shorthand for [`EditorEvent::ContextAction`].
    pub fn context(kind: ContextActionKind, target: Option<NodeId>, position: Position) -> Self {
        Self::ContextAction {
            kind,
            target,
            position,
        }
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerPress { .. } => "pointer_press",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerRelease { .. } => "pointer_release",
            Self::ContextAction { .. } => "context_action",
            Self::DeleteKeyPressed => "delete_key",
            Self::Cancel => "cancel",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Constructor tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_constructors() {
        let p = Position::new(1.0, 2.0);
        assert_eq!(
            EditorEvent::press(PointerButton::Middle, p, None),
            EditorEvent::PointerPress {
                button: PointerButton::Middle,
                position: p,
                target: None
            }
        );
        assert_eq!(EditorEvent::moved(p, None).name(), "pointer_move");
    }

    #[test]
    fn test_event_serde_uses_snake_case_kinds() {
        let event = EditorEvent::context(
            ContextActionKind::SetPrerequisite,
            Some(NodeId::new(3)),
            Position::new(0.0, 0.0),
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"set_prerequisite\""));
        let back: EditorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ------------------------------------------------------------------------
    // Context action tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_needs_target() {
        assert!(!ContextActionKind::AddSkill.needs_target());
        assert!(ContextActionKind::DeleteNode.needs_target());
        assert!(ContextActionKind::DeleteConnections.needs_target());
    }
}
