//! Core types for skill trees.

mod ids;
mod node;
mod position;
mod proptests;
mod upgrade;

pub use ids::NodeId;
pub use node::SkillNode;
pub use position::{DEFAULT_GRID_SIZE, Position};
pub use upgrade::{Upgrade, UpgradeType};
