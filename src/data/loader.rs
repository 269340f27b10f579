//! Load team definitions from TOML files

use std::path::Path;

use crate::core::error::Result;
use crate::data::TeamDef;

/// Parse a team definition from TOML text
pub fn team_from_str(content: &str) -> Result<TeamDef> {
    Ok(toml::from_str(content)?)
}

/// Load a team definition from a TOML file on disk
pub fn team_from_file(path: &Path) -> Result<TeamDef> {
    let content = std::fs::read_to_string(path)?;
    team_from_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEAM_TOML: &str = r#"
        name = "Harbor Wardens"

        [[players]]
        name = "Brakka"
        abilities = ["Move", "Melee", "Spawn"]
        perks = ["BattleHardened"]

        [players.stats]
        might = 4
        endurance = 3
        agility = 1
        intelligence = 0
        perception = 1
        charisma = 1

        [players.gear.weapon]
        name = "Boarding Axe"
        slot = "Weapon"
        physical_attack_bonus = 2

        [[players]]
        name = "Sel"
        abilities = ["Move", "Ranged", "Spawn", "Favor"]
        perks = ["EagleEye"]

        [players.stats]
        might = 1
        endurance = 1
        agility = 3
        intelligence = 2
        perception = 4
        charisma = 2
    "#;

    #[test]
    fn test_team_parses() {
        let team = team_from_str(TEAM_TOML).unwrap();
        assert_eq!(team.name, "Harbor Wardens");
        assert_eq!(team.players.len(), 2);
        assert_eq!(team.players[0].perks, vec!["BattleHardened"]);
        assert_eq!(
            team.players[0].gear.weapon.as_ref().unwrap().physical_attack_bonus,
            2
        );
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(team_from_str("name = ").is_err());
    }
}
