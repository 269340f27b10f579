//! The six-stat block and its derived base values

use serde::{Deserialize, Serialize};

/// A unit's base attributes, supplied once at setup as immutable data
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stats {
    pub might: i32,
    pub endurance: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub perception: i32,
    pub charisma: i32,
}

impl Stats {
    pub fn push_strength(&self) -> i32 {
        5 + self.might
    }

    pub fn max_energy(&self) -> i32 {
        5 + self.endurance
    }

    pub fn move_speed(&self) -> i32 {
        5 + self.agility
    }

    pub fn sight_distance(&self) -> i32 {
        5 + self.perception
    }

    pub fn xp_gain(&self) -> i32 {
        5 + self.intelligence
    }

    pub fn max_favor(&self) -> i32 {
        10 - self.charisma
    }

    pub fn physical_armor(&self) -> i32 {
        10 + self.endurance.max(self.agility)
    }

    pub fn magic_armor(&self) -> i32 {
        10 + self.intelligence.max(self.perception)
    }
}
