//! Pointer interaction modes.

use serde::{Deserialize, Serialize};

/// What the pointer is currently doing.
///
/// The editor starts in [`MouseState::Idle`] and always returns there; there
/// is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseState {
    /// No interaction in progress.
    #[default]
    Idle,

    /// Selected nodes follow the pointer until the primary button is released.
    Dragging,

    /// The viewport follows the pointer until the middle button is released.
    Panning,

    /// Waiting for a click on the node that becomes the pending node's prerequisite.
    SelectingPrerequisite,

    /// Waiting for a click on the node that becomes the pending node's postrequisite.
    SelectingPostrequisite,

    /// Waiting for a click on the node whose connection to the pending node is removed.
    DeletingConnection,
}

impl MouseState {
    /// Returns `true` while a pending source node waits for a target click.
    pub fn is_selecting(&self) -> bool {
        matches!(
            self,
            MouseState::SelectingPrerequisite
                | MouseState::SelectingPostrequisite
                | MouseState::DeletingConnection
        )
    }

    /// Returns `true` if a rubber line from the pending node follows the pointer.
    pub fn shows_rubber_line(&self) -> bool {
        matches!(
            self,
            MouseState::SelectingPrerequisite | MouseState::SelectingPostrequisite
        )
    }

    /// Returns `true` if the delete key acts in this state.
    pub fn accepts_delete(&self) -> bool {
        matches!(self, MouseState::Idle | MouseState::Dragging)
    }

    /// Returns `true` if no interaction is in progress.
    pub fn is_idle(&self) -> bool {
        matches!(self, MouseState::Idle)
    }
}

impl std::fmt::Display for MouseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MouseState::Idle => write!(f, "idle"),
            MouseState::Dragging => write!(f, "dragging"),
            MouseState::Panning => write!(f, "panning"),
            MouseState::SelectingPrerequisite => write!(f, "selecting_prerequisite"),
            MouseState::SelectingPostrequisite => write!(f, "selecting_postrequisite"),
            MouseState::DeletingConnection => write!(f, "deleting_connection"),
        }
    }
}
