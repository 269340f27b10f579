//! Perks - permanent modifier sources attached to a unit
//!
//! Perks answer the modifier engine's tag queries and may intercept the
//! energy-depleted event to prevent death. State-carrying perks (AlertCounter)
//! reset on turn start.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stats::kinds::{DerivedStatKind, RollModifierKind, StatKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perk {
    /// +2 sight distance, +2 perception rolls
    EagleEye,
    /// +1 move speed, +1 dodge rolls
    Lightfoot,
    /// +1 physical armor
    BattleHardened,
    /// +3 heal rolls
    EnhancedHealing,
    /// 25% chance to shrug off a killing blow and heal a little
    DivineIntervention,
    /// One free counter per turn against attackers in unseen cells
    AlertCounter { available: bool },
}

impl Perk {
    /// Parse a definition-file perk name; None for unknown names
    pub fn from_name(name: &str) -> Option<Perk> {
        match name {
            "EagleEye" => Some(Perk::EagleEye),
            "Lightfoot" => Some(Perk::Lightfoot),
            "BattleHardened" => Some(Perk::BattleHardened),
            "EnhancedHealing" => Some(Perk::EnhancedHealing),
            "DivineIntervention" => Some(Perk::DivineIntervention),
            "AlertCounter" => Some(Perk::AlertCounter { available: true }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Perk::EagleEye => "EagleEye",
            Perk::Lightfoot => "Lightfoot",
            Perk::BattleHardened => "BattleHardened",
            Perk::EnhancedHealing => "EnhancedHealing",
            Perk::DivineIntervention => "DivineIntervention",
            Perk::AlertCounter { .. } => "AlertCounter",
        }
    }

    pub fn stat_bonus(&self, _kind: StatKind) -> i32 {
        0
    }

    pub fn roll_bonus(&self, kind: RollModifierKind) -> i32 {
        match (self, kind) {
            (Perk::EagleEye, RollModifierKind::Perception) => 2,
            (Perk::Lightfoot, RollModifierKind::Dodge) => 1,
            (Perk::EnhancedHealing, RollModifierKind::HealAmount) => 3,
            _ => 0,
        }
    }

    pub fn derived_bonus(&self, kind: DerivedStatKind) -> i32 {
        match (self, kind) {
            (Perk::EagleEye, DerivedStatKind::SightDistance) => 2,
            (Perk::Lightfoot, DerivedStatKind::MoveSpeed) => 1,
            (Perk::BattleHardened, DerivedStatKind::PhysicalArmor) => 1,
            _ => 0,
        }
    }

    /// Called at turn start for the owning unit's team
    pub fn reset(&mut self) {
        if let Perk::AlertCounter { available } = self {
            *available = true;
        }
    }

    /// Energy-depleted interception: Some(heal) when the perk saves the unit
    pub fn try_prevent_death(&self, rng: &mut impl Rng) -> Option<i32> {
        match self {
            Perk::DivineIntervention => {
                if rng.gen_range(0.0..1.0) < 0.25 {
                    Some(5)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Consume the counter-attack charge if it is available
    pub fn take_counter_charge(&mut self) -> bool {
        if let Perk::AlertCounter { available } = self {
            if *available {
                *available = false;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_name_round_trip() {
        for name in ["EagleEye", "Lightfoot", "BattleHardened", "EnhancedHealing", "DivineIntervention", "AlertCounter"] {
            let perk = Perk::from_name(name).unwrap();
            assert_eq!(perk.name(), name);
        }
        assert!(Perk::from_name("Unknown").is_none());
    }

    #[test]
    fn test_eagle_eye_bonuses() {
        let perk = Perk::EagleEye;
        assert_eq!(perk.derived_bonus(DerivedStatKind::SightDistance), 2);
        assert_eq!(perk.roll_bonus(RollModifierKind::Perception), 2);
        assert_eq!(perk.roll_bonus(RollModifierKind::Dodge), 0);
    }

    #[test]
    fn test_alert_counter_single_charge() {
        let mut perk = Perk::AlertCounter { available: true };
        assert!(perk.take_counter_charge());
        assert!(!perk.take_counter_charge());

        perk.reset();
        assert!(perk.take_counter_charge());
    }

    #[test]
    fn test_divine_intervention_sometimes_saves() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let perk = Perk::DivineIntervention;
        let saves = (0..1000)
            .filter(|_| perk.try_prevent_death(&mut rng).is_some())
            .count();
        // 25% chance; allow a generous band
        assert!(saves > 150 && saves < 350, "saves = {}", saves);
    }

    #[test]
    fn test_non_divine_perks_never_save() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(Perk::Lightfoot.try_prevent_death(&mut rng).is_none());
    }
}
