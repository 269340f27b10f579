//! Immutable match-setup definitions
//!
//! Teams, players, stats, gear, and perk/ability names arrive as plain data
//! records, supplied once at setup. The core never re-reads them at runtime
//! except through the modifier queries.

pub mod loader;

use serde::{Deserialize, Serialize};

use crate::stats::gear::Gear;
use crate::stats::stat_block::Stats;

/// One player's definition: stat block, gear, and named perks/abilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    pub name: String,
    pub stats: Stats,
    #[serde(default)]
    pub gear: Gear,
    /// Ability names resolved to actions at unit setup; unknown names are
    /// skipped with a warning
    #[serde(default)]
    pub abilities: Vec<String>,
    /// Perk names resolved at unit setup; unknown names are skipped
    #[serde(default)]
    pub perks: Vec<String>,
}

/// A team roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDef {
    pub name: String,
    pub players: Vec<PlayerDef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_def_defaults() {
        let toml = r#"
            name = "Vex"
            [stats]
            might = 3
            endurance = 2
            agility = 1
            intelligence = 0
            perception = 2
            charisma = 1
        "#;
        let def: PlayerDef = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Vex");
        assert_eq!(def.stats.might, 3);
        assert!(def.abilities.is_empty());
        assert!(def.gear.weapon.is_none());
    }
}
