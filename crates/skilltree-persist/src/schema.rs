//! On-disk JSON layout.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "node_id": 0, "x": 0.0, "y": 0.0,
//!       "upgrade": { "name": "Slash", "description": "", "type": "active_ability" },
//!       "prerequisites": [], "postrequisites": [1] }
//!   ]
//! }
//! ```
//!
//! Both edge directions are written even though each is derivable from the
//! other, so a file with one side truncated still loads every edge.
//!
//! Older files were a bare array of nodes without ids or edges; those are
//! still accepted and get ids in file order.

use serde::{Deserialize, Serialize};
use std::path::Path;

use skilltree_core::{Error, NodeId, Position, Result, Upgrade};
use skilltree_graph::GraphStore;

/// One node as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Stored id. Absent only in legacy files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Upgrade payload.
    pub upgrade: Upgrade,
    /// Ids of this node's prerequisites.
    #[serde(default)]
    pub prerequisites: Vec<NodeId>,
    /// Ids of this node's postrequisites.
    #[serde(default)]
    pub postrequisites: Vec<NodeId>,
}

impl NodeRecord {
    /// The record's canvas position.
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A complete save file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    /// Every node in the graph.
    pub nodes: Vec<NodeRecord>,
}

impl SaveFile {
    /// Snapshots a graph, ordered by ascending id.
    pub fn from_store(store: &GraphStore) -> Self {
        let nodes = store
            .nodes_sorted()
            .into_iter()
            .map(|node| NodeRecord {
                node_id: Some(node.id),
                x: node.position.x,
                y: node.position.y,
                upgrade: node.upgrade.clone(),
                prerequisites: node.prerequisite_ids.iter().copied().collect(),
                postrequisites: node.postrequisite_ids.iter().copied().collect(),
            })
            .collect();
        Self { nodes }
    }

    /// Parses file contents. `path` is only used for error messages.
    ///
    /// Returns the file and whether it used the legacy bare-array layout.
    /// The layout is chosen by the first non-whitespace character, so parse
    /// errors name the offending field and its line and column.
    pub fn parse(path: &Path, contents: &str) -> Result<(Self, bool)> {
        let invalid = |e: serde_json::Error| {
            Error::corrupt_file(path, format!("invalid save data: {e}"))
        };
        if contents.trim_start().starts_with('[') {
            let nodes: Vec<NodeRecord> = serde_json::from_str(contents).map_err(invalid)?;
            Ok((Self { nodes }, true))
        } else {
            let file: Self = serde_json::from_str(contents).map_err(invalid)?;
            Ok((file, false))
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
