//! The unit aggregate
//!
//! A unit composes one player's stat block, gear, perks, statuses, resource
//! pools, action points, and its set of action instances. It is either in the
//! arena (occupying a cell) or parked in its team's reserve grid.

pub mod pools;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::actions::instance::ActionInstance;
use crate::actions::kind::ActionKind;
use crate::core::constants::ACTION_POINTS_MAX;
use crate::core::types::{TeamId, UnitId};
use crate::data::PlayerDef;
use crate::grid::position::GridPosition;
use crate::stats::gear::Gear;
use crate::stats::modifiers;
use crate::stats::perk::Perk;
use crate::stats::stat_block::Stats;
use crate::stats::status::StatusEffect;
use crate::unit::pools::{EnergyPool, FavorPool};

/// What happened during a unit's turn-start processing
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnStartReport {
    pub dot_damage: i32,
    pub favor_attrition: i32,
    pub depleted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    team: TeamId,
    stats: Stats,
    gear: Gear,
    perks: Vec<Perk>,
    statuses: Vec<StatusEffect>,

    /// Arena cell while `in_arena`, reserve slot otherwise
    pub position: GridPosition,
    pub in_arena: bool,

    energy: EnergyPool,
    favor: FavorPool,
    action_points: i32,

    pub actions: Vec<ActionInstance>,
}

impl Unit {
    /// Build a unit from an immutable player definition. Unknown ability or
    /// perk names are logged and skipped; the unit is degraded, not invalid.
    pub fn from_player(team: TeamId, def: &PlayerDef) -> Self {
        let mut perks = Vec::new();
        for perk_name in &def.perks {
            match Perk::from_name(perk_name) {
                Some(perk) => perks.push(perk),
                None => warn!(player = %def.name, perk = %perk_name, "unknown perk, skipping"),
            }
        }

        let mut actions = Vec::new();
        for ability_name in &def.abilities {
            match ActionKind::from_name(ability_name) {
                Some(kind) => {
                    if actions.iter().all(|a: &ActionInstance| a.kind() != kind) {
                        actions.push(ActionInstance::new(kind));
                    }
                }
                None => warn!(player = %def.name, ability = %ability_name, "unknown ability, skipping"),
            }
        }

        let mut unit = Self {
            id: UnitId::new(),
            name: def.name.clone(),
            team,
            stats: def.stats,
            gear: def.gear.clone(),
            perks,
            statuses: Vec::new(),
            position: GridPosition::default(),
            in_arena: false,
            energy: EnergyPool::new(0),
            favor: FavorPool::new(0),
            action_points: ACTION_POINTS_MAX,
            actions,
        };

        let max_energy = modifiers::max_energy(&unit);
        let max_favor = modifiers::max_favor(&unit);
        unit.energy = EnergyPool::new(max_energy);
        unit.favor = FavorPool::new(max_favor);
        unit
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn gear(&self) -> &Gear {
        &self.gear
    }

    pub fn perks(&self) -> &[Perk] {
        &self.perks
    }

    pub fn perks_mut(&mut self) -> &mut [Perk] {
        &mut self.perks
    }

    pub fn statuses(&self) -> &[StatusEffect] {
        &self.statuses
    }

    pub fn add_status(&mut self, status: StatusEffect) {
        self.statuses.push(status);
    }

    pub fn energy(&self) -> &EnergyPool {
        &self.energy
    }

    pub fn favor(&self) -> &FavorPool {
        &self.favor
    }

    pub fn action_points(&self) -> i32 {
        self.action_points
    }

    pub fn set_action_points(&mut self, points: i32) {
        self.action_points = points;
    }

    pub fn can_spend_action_points(&self, kind: ActionKind) -> bool {
        self.action_points >= kind.action_point_cost()
    }

    pub fn spend_action_points(&mut self, kind: ActionKind) {
        self.action_points -= kind.action_point_cost();
    }

    pub fn action(&self, kind: ActionKind) -> Option<&ActionInstance> {
        self.actions.iter().find(|a| a.kind() == kind)
    }

    pub fn action_mut(&mut self, kind: ActionKind) -> Option<&mut ActionInstance> {
        self.actions.iter_mut().find(|a| a.kind() == kind)
    }

    pub fn has_active_action(&self) -> bool {
        self.actions.iter().any(|a| a.is_active())
    }

    /// Returns true when the damage depleted the unit's energy
    pub fn damage(&mut self, amount: i32) -> bool {
        self.energy.damage(amount)
    }

    pub fn heal(&mut self, amount: i32) {
        self.energy.heal(amount);
    }

    pub fn add_favor(&mut self, amount: i32) {
        self.favor.add(amount);
    }

    /// Spend all personal favor (ultimate actions take the whole pool)
    pub fn use_favor(&mut self) -> i32 {
        self.favor.drain()
    }

    /// Consult death-prevention perks; applies the heal and reports true if
    /// the unit was saved.
    pub fn try_prevent_death(&mut self, rng: &mut impl Rng) -> bool {
        for i in 0..self.perks.len() {
            if let Some(heal) = self.perks[i].try_prevent_death(rng) {
                self.energy.heal(heal);
                return true;
            }
        }
        false
    }

    /// Turn-start processing for a unit whose team just came up: action
    /// points reset, perk resets, status ticks, favor attrition.
    pub fn on_turn_started(&mut self, rng: &mut impl Rng) -> TurnStartReport {
        self.action_points = ACTION_POINTS_MAX;

        for perk in &mut self.perks {
            perk.reset();
        }

        let heal_modifier = modifiers::heal_modifier(self);
        let mut statuses = std::mem::take(&mut self.statuses);
        let mut dot_damage = 0;
        statuses.retain_mut(|status| {
            let tick = status.turn_start(heal_modifier);
            dot_damage += tick.damage;
            !tick.expired
        });
        self.statuses = statuses;

        let depleted = if dot_damage > 0 {
            self.energy.damage(dot_damage)
        } else {
            false
        };

        let attrition_roll: i32 = rng.gen_range(1..=8);
        let favor_attrition = (attrition_roll + modifiers::favor_attrition_modifier(self)).max(0);
        self.favor.remove(favor_attrition);

        TurnStartReport {
            dot_damage,
            favor_attrition,
            depleted,
        }
    }
}
