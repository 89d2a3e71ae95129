//! Upgrade payloads carried by skill nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::NodeId;

/// Kind of upgrade a skill node grants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeType {
    /// Unlocks a weapon.
    WeaponUnlock,
    /// Unlocks a character class.
    ClassUnlock,
    /// Grants an ability the player triggers.
    ActiveAbility,
    /// Grants an always-on ability (the default).
    #[default]
    PassiveAbility,
}

impl UpgradeType {
    /// All upgrade types, in declaration order.
    pub const ALL: [UpgradeType; 4] = [
        UpgradeType::WeaponUnlock,
        UpgradeType::ClassUnlock,
        UpgradeType::ActiveAbility,
        UpgradeType::PassiveAbility,
    ];

    /// Returns the snake_case name used in save files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::WeaponUnlock => "weapon_unlock",
            Self::ClassUnlock => "class_unlock",
            Self::ActiveAbility => "active_ability",
            Self::PassiveAbility => "passive_ability",
        }
    }
}

impl fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for UpgradeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.name() == key || t.name().replace('_', "") == key)
            .ok_or_else(|| format!("unknown upgrade type '{s}'"))
    }
}

/// The upgrade a skill node grants: display name, description, and kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Human-readable name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Kind of upgrade.
    #[serde(rename = "type", default)]
    pub upgrade_type: UpgradeType,
}

impl Upgrade {
    /// Creates an upgrade with the given name and an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            upgrade_type: UpgradeType::default(),
        }
    }

    /// Placeholder upgrade for a freshly added node, named after its id.
    pub fn placeholder(id: NodeId) -> Self {
        Self::new(format!("Node {id}"))
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the upgrade type.
    pub fn with_type(mut self, upgrade_type: UpgradeType) -> Self {
        self.upgrade_type = upgrade_type;
        self
    }
}
