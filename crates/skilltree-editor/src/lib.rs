//! Skill tree interaction state machine.
//!
//! # Modules
//!
//! - [`state`]: The pointer mode ([`MouseState`])
//! - [`event`]: Inbound input events
//! - [`notification`]: Outbound view updates
//! - [`editor`]: The state machine itself
//! - [`session`]: Editor plus persistence with autosave
//!
//! # Example
//!
//! ```
//! use skilltree_core::{NodeId, Position};
//! use skilltree_editor::{ContextActionKind, Editor, EditorEvent, MouseState, PointerButton};
//!
//! let mut editor = Editor::default();
//! editor
//!     .handle(EditorEvent::context(ContextActionKind::AddSkill, None, Position::new(0.0, 0.0)))
//!     .unwrap();
//! editor
//!     .handle(EditorEvent::context(ContextActionKind::AddSkill, None, Position::new(0.0, 120.0)))
//!     .unwrap();
//! let (a, b) = (NodeId::new(0), NodeId::new(1));
//!
//! // "Set node as prerequisite" on B, then click A.
//! editor
//!     .handle(EditorEvent::context(ContextActionKind::SetPrerequisite, Some(b), Position::new(0.0, 120.0)))
//!     .unwrap();
//! assert_eq!(editor.state(), MouseState::SelectingPrerequisite);
//! editor
//!     .handle(EditorEvent::release(PointerButton::Primary, Position::new(0.0, 0.0), Some(a)))
//!     .unwrap();
//!
//! assert_eq!(editor.state(), MouseState::Idle);
//! assert!(editor.store().get_node(b).unwrap().prerequisite_ids.contains(&a));
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod editor;
pub mod event;
pub mod notification;
pub mod session;
pub mod state;

pub use editor::Editor;
pub use event::{ContextActionKind, EditorEvent, PointerButton};
pub use notification::{Mutation, Notification};
pub use session::Session;
pub use state::MouseState;
