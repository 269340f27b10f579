//! Status effects - temporary modifier sources with turn-based durations

use serde::{Deserialize, Serialize};

use crate::stats::kinds::{DerivedStatKind, RollModifierKind, StatKind};

/// Active status effects on a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusEffect {
    /// Damage applied at every turn start, softened by the heal modifier
    DamageOverTime {
        damage_per_turn: i32,
        duration_turns: u32,
        elapsed_turns: u32,
    },
    /// -2 move speed, -2 dodge while active
    Slowed {
        duration_turns: u32,
        elapsed_turns: u32,
    },
}

/// What a status did on its turn-start tick
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusTick {
    pub damage: i32,
    pub expired: bool,
}

impl StatusEffect {
    pub fn damage_over_time(damage_per_turn: i32, duration_turns: u32) -> Self {
        StatusEffect::DamageOverTime {
            damage_per_turn,
            duration_turns,
            elapsed_turns: 0,
        }
    }

    pub fn slowed(duration_turns: u32) -> Self {
        StatusEffect::Slowed {
            duration_turns,
            elapsed_turns: 0,
        }
    }

    pub fn stat_bonus(&self, _kind: StatKind) -> i32 {
        0
    }

    pub fn roll_bonus(&self, kind: RollModifierKind) -> i32 {
        match (self, kind) {
            (StatusEffect::Slowed { .. }, RollModifierKind::Dodge) => -2,
            _ => 0,
        }
    }

    pub fn derived_bonus(&self, kind: DerivedStatKind) -> i32 {
        match (self, kind) {
            (StatusEffect::Slowed { .. }, DerivedStatKind::MoveSpeed) => -2,
            _ => 0,
        }
    }

    /// Advance one turn. `heal_modifier` offsets damage-over-time.
    pub fn turn_start(&mut self, heal_modifier: i32) -> StatusTick {
        match self {
            StatusEffect::DamageOverTime {
                damage_per_turn,
                duration_turns,
                elapsed_turns,
            } => {
                if *elapsed_turns < *duration_turns {
                    *elapsed_turns += 1;
                    StatusTick {
                        damage: (*damage_per_turn - heal_modifier).max(0),
                        expired: *elapsed_turns >= *duration_turns,
                    }
                } else {
                    StatusTick { damage: 0, expired: true }
                }
            }
            StatusEffect::Slowed {
                duration_turns,
                elapsed_turns,
            } => {
                if *elapsed_turns < *duration_turns {
                    *elapsed_turns += 1;
                    StatusTick {
                        damage: 0,
                        expired: *elapsed_turns >= *duration_turns,
                    }
                } else {
                    StatusTick { damage: 0, expired: true }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_damages_each_turn_then_expires() {
        let mut dot = StatusEffect::damage_over_time(6, 2);

        let first = dot.turn_start(0);
        assert_eq!(first.damage, 6);
        assert!(!first.expired);

        let second = dot.turn_start(0);
        assert_eq!(second.damage, 6);
        assert!(second.expired);
    }

    #[test]
    fn test_heal_modifier_softens_dot() {
        let mut dot = StatusEffect::damage_over_time(6, 3);
        assert_eq!(dot.turn_start(2).damage, 4);
        // Heal modifier beyond the damage never heals
        assert_eq!(dot.turn_start(10).damage, 0);
    }

    #[test]
    fn test_slowed_penalties_while_active() {
        let slowed = StatusEffect::slowed(2);
        assert_eq!(slowed.derived_bonus(DerivedStatKind::MoveSpeed), -2);
        assert_eq!(slowed.roll_bonus(RollModifierKind::Dodge), -2);
        assert_eq!(slowed.roll_bonus(RollModifierKind::Hide), 0);
    }

    #[test]
    fn test_slowed_expires() {
        let mut slowed = StatusEffect::slowed(1);
        assert!(slowed.turn_start(0).expired);
    }
}
