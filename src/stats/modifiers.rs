//! The modifier engine - pure functions over units and the battlefield
//!
//! Every named modifier stacks the same way: base stat, perk bonuses, status
//! bonuses, gear (where applicable), and for attack rolls the situational
//! terrain modifier (elevation advantage, cover, terrain type).

use tracing::debug;

use crate::core::constants::COVER_PENALTY;
use crate::grid::cover::{CoverLevel, CoverMap, Direction};
use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::stats::kinds::{DerivedStatKind, RollModifierKind, StatKind};
use crate::unit::Unit;

fn perk_stat_bonus(unit: &Unit, kind: StatKind) -> i32 {
    unit.perks().iter().map(|p| p.stat_bonus(kind)).sum()
}

fn perk_roll_bonus(unit: &Unit, kind: RollModifierKind) -> i32 {
    unit.perks().iter().map(|p| p.roll_bonus(kind)).sum()
}

fn perk_derived_bonus(unit: &Unit, kind: DerivedStatKind) -> i32 {
    unit.perks().iter().map(|p| p.derived_bonus(kind)).sum()
}

fn status_roll_bonus(unit: &Unit, kind: RollModifierKind) -> i32 {
    unit.statuses().iter().map(|s| s.roll_bonus(kind)).sum()
}

fn status_derived_bonus(unit: &Unit, kind: DerivedStatKind) -> i32 {
    unit.statuses().iter().map(|s| s.derived_bonus(kind)).sum()
}

/// Physical attack-hit modifier against a specific target
pub fn physical_hit_modifier(
    unit: &Unit,
    target: &Unit,
    field: &GridField,
    cover: &CoverMap,
) -> i32 {
    let stat = unit.stats().might + perk_stat_bonus(unit, StatKind::Might);
    let gear = unit.gear().total_physical_attack_bonus();
    let perk_roll = perk_roll_bonus(unit, RollModifierKind::PhysicalAttackHit);
    let statuses = status_roll_bonus(unit, RollModifierKind::PhysicalAttackHit);
    let terrain = terrain_modifier(unit, target, field, cover);

    let total = stat + gear + perk_roll + statuses + terrain;
    debug!(
        unit = %unit.name,
        stat,
        gear,
        perk_roll,
        statuses,
        terrain,
        total,
        "physical hit modifier"
    );
    total
}

/// Magic attack-hit modifier against a specific target
pub fn magic_hit_modifier(unit: &Unit, target: &Unit, field: &GridField, cover: &CoverMap) -> i32 {
    let stat = unit.stats().intelligence + perk_stat_bonus(unit, StatKind::Intelligence);
    let gear = unit.gear().total_magical_attack_bonus();
    let perk_roll = perk_roll_bonus(unit, RollModifierKind::MagicAttackHit);
    let statuses = status_roll_bonus(unit, RollModifierKind::MagicAttackHit);
    let terrain = terrain_modifier(unit, target, field, cover);

    let total = stat + gear + perk_roll + statuses + terrain;
    debug!(
        unit = %unit.name,
        stat,
        gear,
        perk_roll,
        statuses,
        terrain,
        total,
        "magic hit modifier"
    );
    total
}

/// Situational attack-roll modifier: elevation advantage minus cover, plus
/// the (currently neutral) terrain-type table.
pub fn terrain_modifier(attacker: &Unit, target: &Unit, field: &GridField, cover: &CoverMap) -> i32 {
    let mut modifier = 0;

    let elevation_difference =
        field.elevation_at(attacker.position) - field.elevation_at(target.position);
    if elevation_difference > 0 {
        modifier += elevation_difference / 2;
    }

    let direction = attack_direction(attacker.position, target.position);
    if cover.cover_at(target.position, direction) != CoverLevel::None {
        modifier -= COVER_PENALTY;
    }

    if let Some(terrain) = field.terrain_at(target.position) {
        modifier += terrain.attack_modifier();
    }

    modifier
}

/// Quantize an attack into one of 8 compass directions by delta signs.
///
/// dx = dz = 0 (attacking one's own cell) falls back to North; target lists
/// never contain the attacker's cell, so the fallback is unreachable through
/// action resolution.
pub fn attack_direction(from: GridPosition, to: GridPosition) -> Direction {
    let dx = (to.x - from.x).signum();
    let dz = (to.z - from.z).signum();

    match (dx, dz) {
        (0, 1) => Direction::North,
        (1, 0) => Direction::East,
        (0, -1) => Direction::South,
        (-1, 0) => Direction::West,
        (1, 1) => Direction::NorthEast,
        (1, -1) => Direction::SouthEast,
        (-1, -1) => Direction::SouthWest,
        (-1, 1) => Direction::NorthWest,
        _ => Direction::North,
    }
}

pub fn push_modifier(unit: &Unit) -> i32 {
    unit.stats().might
}

pub fn heal_modifier(unit: &Unit) -> i32 {
    unit.stats().endurance + perk_roll_bonus(unit, RollModifierKind::HealAmount)
        + status_roll_bonus(unit, RollModifierKind::HealAmount)
}

pub fn favor_attrition_modifier(unit: &Unit) -> i32 {
    -unit.stats().endurance + perk_roll_bonus(unit, RollModifierKind::FavorAttrition)
        + status_roll_bonus(unit, RollModifierKind::FavorAttrition)
}

pub fn dodge_modifier(unit: &Unit) -> i32 {
    unit.stats().agility + perk_roll_bonus(unit, RollModifierKind::Dodge)
        + status_roll_bonus(unit, RollModifierKind::Dodge)
}

pub fn hide_modifier(unit: &Unit) -> i32 {
    unit.stats().agility + perk_roll_bonus(unit, RollModifierKind::Hide)
        + status_roll_bonus(unit, RollModifierKind::Hide)
}

pub fn perception_modifier(unit: &Unit) -> i32 {
    unit.stats().perception + perk_roll_bonus(unit, RollModifierKind::Perception)
        + status_roll_bonus(unit, RollModifierKind::Perception)
}

pub fn favor_modifier(unit: &Unit) -> i32 {
    unit.stats().charisma + perk_roll_bonus(unit, RollModifierKind::IndividualFavor)
        + status_roll_bonus(unit, RollModifierKind::IndividualFavor)
}

pub fn push_strength(unit: &Unit) -> i32 {
    unit.stats().push_strength()
        + perk_derived_bonus(unit, DerivedStatKind::PushThrowDistance)
        + status_derived_bonus(unit, DerivedStatKind::PushThrowDistance)
}

pub fn max_energy(unit: &Unit) -> i32 {
    unit.stats().max_energy()
        + perk_derived_bonus(unit, DerivedStatKind::MaxEnergy)
        + status_derived_bonus(unit, DerivedStatKind::MaxEnergy)
}

pub fn move_speed(unit: &Unit) -> i32 {
    unit.stats().move_speed()
        + perk_derived_bonus(unit, DerivedStatKind::MoveSpeed)
        + status_derived_bonus(unit, DerivedStatKind::MoveSpeed)
}

pub fn sight_distance(unit: &Unit) -> i32 {
    unit.stats().sight_distance()
        + perk_derived_bonus(unit, DerivedStatKind::SightDistance)
        + status_derived_bonus(unit, DerivedStatKind::SightDistance)
}

pub fn xp_gain(unit: &Unit) -> i32 {
    unit.stats().xp_gain()
        + perk_derived_bonus(unit, DerivedStatKind::XpGain)
        + status_derived_bonus(unit, DerivedStatKind::XpGain)
}

pub fn max_favor(unit: &Unit) -> i32 {
    unit.stats().max_favor()
        + perk_derived_bonus(unit, DerivedStatKind::MaxFavor)
        + status_derived_bonus(unit, DerivedStatKind::MaxFavor)
}

pub fn physical_armor(unit: &Unit) -> i32 {
    let total = unit.stats().physical_armor()
        + perk_derived_bonus(unit, DerivedStatKind::PhysicalArmor)
        + status_derived_bonus(unit, DerivedStatKind::PhysicalArmor)
        + unit.gear().total_armor_bonus();
    debug!(unit = %unit.name, total, "physical armor");
    total
}

pub fn magic_armor(unit: &Unit) -> i32 {
    unit.stats().magic_armor()
        + perk_derived_bonus(unit, DerivedStatKind::MagicArmor)
        + status_derived_bonus(unit, DerivedStatKind::MagicArmor)
}
