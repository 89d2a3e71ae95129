//! Skill tree designer: umbrella crate.
//!
//! This crate re-exports the skill tree components for convenience.
//! Use feature flags to leave out persistence or the editor.

#![doc = include_str!("../README.md")]

pub use skilltree_core as core;
pub use skilltree_graph as graph;

#[cfg(feature = "persist")]
pub use skilltree_persist as persist;

#[cfg(feature = "editor")]
pub use skilltree_editor as editor;

pub use skilltree_core::{Error, NodeId, Position, Result, SkillNode, Upgrade, UpgradeType};
pub use skilltree_graph::GraphStore;
