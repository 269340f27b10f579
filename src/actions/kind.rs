//! Action kinds and usage domains

use serde::{Deserialize, Serialize};

/// Where an action may be used from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionUsage {
    Arena,
    Reserves,
    Both,
}

/// The abilities a unit can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Move,
    Melee,
    Ranged,
    Push,
    Spawn,
    Favor,
    Special,
    Elevation,
}

impl ActionKind {
    /// Parse a definition-file ability name; None for unknown names
    pub fn from_name(name: &str) -> Option<ActionKind> {
        match name {
            "Move" => Some(ActionKind::Move),
            "Melee" => Some(ActionKind::Melee),
            "Ranged" => Some(ActionKind::Ranged),
            "Push" => Some(ActionKind::Push),
            "Spawn" => Some(ActionKind::Spawn),
            "Favor" => Some(ActionKind::Favor),
            "Special" => Some(ActionKind::Special),
            "Elevation" => Some(ActionKind::Elevation),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Move => "Move",
            ActionKind::Melee => "Melee",
            ActionKind::Ranged => "Ranged",
            ActionKind::Push => "Push",
            ActionKind::Spawn => "Spawn",
            ActionKind::Favor => "Favor",
            ActionKind::Special => "Special",
            ActionKind::Elevation => "Elevation",
        }
    }

    /// Usage domain gating valid-target queries
    pub fn usage(&self) -> ActionUsage {
        match self {
            ActionKind::Spawn => ActionUsage::Reserves,
            _ => ActionUsage::Arena,
        }
    }

    pub fn action_point_cost(&self) -> i32 {
        1
    }
}
