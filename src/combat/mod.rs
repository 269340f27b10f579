//! Combat resolution - d20 rolls against armor
//!
//! A roll of `uniform(1, 20) + modifier` meets or beats the target's armor to
//! hit. Push and favor rolls reuse the same die.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One resolved attack roll
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttackRoll {
    pub die: i32,
    pub modifier: i32,
    pub armor: i32,
    pub hit: bool,
}

impl AttackRoll {
    pub fn total(&self) -> i32 {
        self.die + self.modifier
    }
}

/// Roll the d20
pub fn roll_d20(rng: &mut impl Rng) -> i32 {
    rng.gen_range(1..=20)
}

/// Resolve a hit test: `d20 + modifier >= armor`
pub fn resolve_attack(rng: &mut impl Rng, modifier: i32, armor: i32) -> AttackRoll {
    let die = roll_d20(rng);
    AttackRoll {
        die,
        modifier,
        armor,
        hit: die + modifier >= armor,
    }
}
