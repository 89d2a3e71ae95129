#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Skill Tree Core
//!
//! Core types and errors shared by the graph, persistence, and editor crates.

pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use types::{DEFAULT_GRID_SIZE, NodeId, Position, SkillNode, Upgrade, UpgradeType};
