//! Skill tree graph infrastructure.
//!
//! Nodes live in an arena keyed by [`NodeId`](skilltree_core::NodeId); edges
//! are id sets on both endpoints. The [`GraphStore`] is the only owner of
//! node records, and [`RelationshipManager`] the only writer of edge sets.
//!
//! # Example
//!
//! ```rust
//! use skilltree_core::Position;
//! use skilltree_graph::GraphStore;
//!
//! let mut store = GraphStore::new();
//! let a = store.create_node(Position::new(0.0, 0.0), None).unwrap();
//! let b = store.create_node(Position::new(100.0, 0.0), None).unwrap();
//!
//! store.relations().add_prerequisite(a, b).unwrap();
//! assert!(store.get_node(b).unwrap().prerequisite_ids.contains(&a));
//!
//! store.remove_node(a).unwrap();
//! assert!(store.get_node(b).unwrap().prerequisite_ids.is_empty());
//! ```

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analysis;
pub mod relations;
pub mod store;

pub use analysis::{GraphSummary, has_cycles, leaves, roots, summarize, to_digraph};
pub use relations::{LinkOutcome, RelationshipManager, UnlinkOutcome};
pub use store::{GraphStore, IdMapping, InvariantViolation};
