//! Modifier tags queried by the modifier engine

use serde::{Deserialize, Serialize};

/// Base stat tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Might,
    Endurance,
    Agility,
    Intelligence,
    Perception,
    Charisma,
}

/// Roll bonus tags (applied to specific d20 rolls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollModifierKind {
    PhysicalAttackHit,
    MagicAttackHit,
    ShoveThrow,
    HealAmount,
    FavorAttrition,
    Dodge,
    Hide,
    Perception,
    TerrainManipulation,
    Flair,
    IndividualFavor,
    BuffHit,
}

/// Derived stat tags (applied to computed values, not rolls)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DerivedStatKind {
    PushThrowDistance,
    MaxEnergy,
    MoveSpeed,
    SightDistance,
    XpGain,
    MaxFavor,
    PhysicalArmor,
    MagicArmor,
}
