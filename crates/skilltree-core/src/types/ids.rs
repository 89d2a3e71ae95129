//! Node identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a skill node within one graph instance.
///
/// Ids are dense small integers handed out by the graph store. They are
/// only stable between renumberings; every save renumbers the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from its raw value.
    ///
    /// # Examples
    ///
    /// ```
    /// use skilltree_core::NodeId;
    ///
    /// let id = NodeId::new(3);
    /// assert_eq!(id.get(), 3);
    /// assert_eq!(id.to_string(), "3");
    /// ```
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the id that follows this one, or `None` at `u32::MAX`.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl std::str::FromStr for NodeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
