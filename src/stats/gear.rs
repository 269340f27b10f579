//! Equipment slots and gear bonus totals

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Helm,
    ChestPlate,
    Weapon,
    Ring,
}

/// One piece of equipment, an immutable data record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub slot: EquipmentSlot,
    #[serde(default)]
    pub physical_attack_bonus: i32,
    #[serde(default)]
    pub magical_attack_bonus: i32,
    #[serde(default)]
    pub armor_bonus: i32,
    #[serde(default)]
    pub durability: i32,
    #[serde(default)]
    pub weight: f32,
}

/// A unit's four equipment slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gear {
    pub helm: Option<Equipment>,
    pub chest_plate: Option<Equipment>,
    pub weapon: Option<Equipment>,
    pub ring: Option<Equipment>,
}

impl Gear {
    fn pieces(&self) -> [&Option<Equipment>; 4] {
        [&self.helm, &self.chest_plate, &self.weapon, &self.ring]
    }

    pub fn total_physical_attack_bonus(&self) -> i32 {
        self.pieces()
            .iter()
            .filter_map(|p| p.as_ref())
            .map(|e| e.physical_attack_bonus)
            .sum()
    }

    pub fn total_magical_attack_bonus(&self) -> i32 {
        self.pieces()
            .iter()
            .filter_map(|p| p.as_ref())
            .map(|e| e.magical_attack_bonus)
            .sum()
    }

    pub fn total_armor_bonus(&self) -> i32 {
        self.pieces()
            .iter()
            .filter_map(|p| p.as_ref())
            .map(|e| e.armor_bonus)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Equipment {
        Equipment {
            name: "Arming Sword".to_string(),
            slot: EquipmentSlot::Weapon,
            physical_attack_bonus: 2,
            magical_attack_bonus: 0,
            armor_bonus: 0,
            durability: 100,
            weight: 1.5,
        }
    }

    fn helm() -> Equipment {
        Equipment {
            name: "Kettle Helm".to_string(),
            slot: EquipmentSlot::Helm,
            physical_attack_bonus: 0,
            magical_attack_bonus: 0,
            armor_bonus: 1,
            durability: 80,
            weight: 2.0,
        }
    }

    #[test]
    fn test_empty_gear_no_bonuses() {
        let gear = Gear::default();
        assert_eq!(gear.total_physical_attack_bonus(), 0);
        assert_eq!(gear.total_armor_bonus(), 0);
    }

    #[test]
    fn test_bonuses_sum_across_slots() {
        let gear = Gear {
            weapon: Some(sword()),
            helm: Some(helm()),
            ..Gear::default()
        };
        assert_eq!(gear.total_physical_attack_bonus(), 2);
        assert_eq!(gear.total_armor_bonus(), 1);
        assert_eq!(gear.total_magical_attack_bonus(), 0);
    }
}
