//! Stats, gear, perks, statuses, and the modifier engine
//!
//! Every roll and derived value is a sum of base stat, perk bonuses, status
//! bonuses, gear bonuses, and (for attack rolls) the situational terrain
//! modifier. ADDITIVE stacking only.

pub mod gear;
pub mod kinds;
pub mod modifiers;
pub mod perk;
pub mod stat_block;
pub mod status;

pub use gear::{Equipment, EquipmentSlot, Gear};
pub use kinds::{DerivedStatKind, RollModifierKind, StatKind};
pub use perk::Perk;
pub use stat_block::Stats;
pub use status::{StatusEffect, StatusTick};
