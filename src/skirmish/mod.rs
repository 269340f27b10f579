//! The composition root - one skirmish between two teams
//!
//! `SkirmishState` owns every system and wires them in dependency order:
//! grid, cover, visibility, pathfinding scratch, turn rotation, units,
//! territory, and the team resource pools. It validates setup invariants at
//! construction, gates actions on the turn/action-point economy, drives the
//! active action machine each fixed tick, and routes the opportunity-attack
//! reaction between a suspended move and the threatening enemy's melee.
//!
//! Illegal action attempts are silent no-ops; only construction problems are
//! errors.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actions::ctx::{is_applicable, meets_requirements, valid_positions, ActionCtx};
use crate::actions::elevation::ElevationSignal;
use crate::actions::instance::ActionInstance;
use crate::actions::kind::ActionKind;
use crate::actions::melee::MeleeSignal;
use crate::actions::move_action::MoveSignal;
use crate::actions::push::PushSignal;
use crate::actions::ranged::RangedSignal;
use crate::actions::ritual::{FavorSignal, SpecialSignal};
use crate::actions::spawn::SpawnSignal;
use crate::combat;
use crate::core::constants::{
    BENCHED_ACTION_POINTS, MELEE_DAMAGE, RANGED_DAMAGE, TEAM_ENERGY_MAX, TEAM_FAVOR_MAX,
    TICK_SECONDS,
};
use crate::core::error::{Result, RingfieldError};
use crate::core::types::{TeamId, Tick, UnitId};
use crate::data::TeamDef;
use crate::events::{EventLog, GameEvent};
use crate::grid::cover::CoverMap;
use crate::grid::field::{GridConfig, GridField};
use crate::grid::position::GridPosition;
use crate::grid::reserve::ReserveGrid;
use crate::grid::zone::{CellRect, Zone};
use crate::pathfinding;
use crate::sight::VisibilityTracker;
use crate::stats::modifiers;
use crate::territory::TerritorySystem;
use crate::turn::TurnEngine;
use crate::unit::Unit;

/// Skirmish-wide parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirmishConfig {
    pub grid: GridConfig,
    pub seed: u64,
    pub tick_seconds: f32,
}

impl Default for SkirmishConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            seed: 42,
            tick_seconds: TICK_SECONDS,
        }
    }
}

/// One team's setup: roster definition plus authored spawn zones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSetup {
    pub def: TeamDef,
    pub spawn_zones: Vec<CellRect>,
}

/// Shared team-level resource track (energy reserve, favor track)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TeamPool {
    pub amount: i32,
    pub max: i32,
}

impl TeamPool {
    pub fn normalized(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.amount as f32 / self.max as f32
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveAction {
    unit: UnitId,
    kind: ActionKind,
}

#[derive(Debug, Clone, Copy)]
struct Reaction {
    reactor: UnitId,
    mover: UnitId,
    missed: bool,
}

pub struct SkirmishState {
    config: SkirmishConfig,
    pub field: GridField,
    pub cover: CoverMap,
    pub visibility: VisibilityTracker,
    pub turn: TurnEngine,
    pub territory: TerritorySystem,
    units: Vec<Unit>,
    reserves: AHashMap<TeamId, ReserveGrid>,
    spawn_zones: AHashMap<TeamId, Vec<Zone>>,
    team_energy: AHashMap<TeamId, TeamPool>,
    team_favor: AHashMap<TeamId, TeamPool>,
    team_names: AHashMap<TeamId, String>,
    tick: Tick,
    active: Option<ActiveAction>,
    reaction: Option<Reaction>,
    rng: ChaCha8Rng,
}

impl SkirmishState {
    /// Build and wire the whole match over a generated arena. Setup
    /// invariants (empty rosters, missing spawn zones, bad grid parameters)
    /// fail here; nothing after construction returns an error.
    pub fn new(config: SkirmishConfig, home: TeamSetup, away: TeamSetup) -> Result<Self> {
        Self::build(config, home, away, false)
    }

    /// Same wiring over an all-Plain, elevation-zero arena. Useful for tools
    /// and tests that need predictable terrain.
    pub fn with_flat_arena(config: SkirmishConfig, home: TeamSetup, away: TeamSetup) -> Result<Self> {
        Self::build(config, home, away, true)
    }

    fn build(config: SkirmishConfig, home: TeamSetup, away: TeamSetup, flat: bool) -> Result<Self> {
        for setup in [&home, &away] {
            if setup.def.players.is_empty() {
                return Err(RingfieldError::InvalidSetup(format!(
                    "team '{}' has no players",
                    setup.def.name
                )));
            }
            if setup.spawn_zones.is_empty() {
                return Err(RingfieldError::InvalidSetup(format!(
                    "team '{}' has no spawn zones",
                    setup.def.name
                )));
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let field = if flat {
            GridField::flat(config.grid)?
        } else {
            GridField::generate(config.grid, &mut rng)?
        };
        let cover = CoverMap::build(&field);

        let home_id = TeamId::new();
        let away_id = TeamId::new();
        let team_ids = [home_id, away_id];

        let mut units = Vec::new();
        let mut reserves = AHashMap::new();
        let mut spawn_zones = AHashMap::new();
        let mut team_energy = AHashMap::new();
        let mut team_favor = AHashMap::new();
        let mut team_names = AHashMap::new();

        for (team_id, setup) in team_ids.iter().zip([&home, &away]) {
            let mut reserve = ReserveGrid::default();
            for player in &setup.def.players {
                let mut unit = Unit::from_player(*team_id, player);
                if let Some(slot) = reserve.add_unit(unit.id) {
                    unit.position = slot;
                }
                unit.in_arena = false;
                units.push(unit);
            }
            reserves.insert(*team_id, reserve);
            spawn_zones.insert(
                *team_id,
                setup.spawn_zones.iter().map(|r| Zone::from_rect(*r)).collect(),
            );
            team_energy.insert(*team_id, TeamPool { amount: TEAM_ENERGY_MAX, max: TEAM_ENERGY_MAX });
            team_favor.insert(*team_id, TeamPool { amount: 0, max: TEAM_FAVOR_MAX });
            team_names.insert(*team_id, setup.def.name.clone());
        }

        let territory = TerritorySystem::new(&field, &team_ids, &mut rng);
        let visibility = VisibilityTracker::new(&team_ids);
        let turn = TurnEngine::new(team_ids.to_vec());

        Ok(Self {
            config,
            field,
            cover,
            visibility,
            turn,
            territory,
            units,
            reserves,
            spawn_zones,
            team_energy,
            team_favor,
            team_names,
            tick: 0,
            active: None,
            reaction: None,
            rng,
        })
    }

    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    fn unit_index(&self, id: UnitId) -> Option<usize> {
        self.units.iter().position(|u| u.id == id)
    }

    pub fn team_name(&self, team: TeamId) -> &str {
        self.team_names.get(&team).map(|s| s.as_str()).unwrap_or("")
    }

    pub fn team_energy(&self, team: TeamId) -> Option<TeamPool> {
        self.team_energy.get(&team).copied()
    }

    pub fn team_favor(&self, team: TeamId) -> Option<TeamPool> {
        self.team_favor.get(&team).copied()
    }

    pub fn reserve(&self, team: TeamId) -> Option<&ReserveGrid> {
        self.reserves.get(&team)
    }

    /// No action or reaction in flight
    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.reaction.is_none()
    }

    /// Legality query for UIs and the AI: all targets `unit` may pick for
    /// `kind` right now.
    pub fn valid_action_positions(&self, unit_id: UnitId, kind: ActionKind) -> Vec<GridPosition> {
        let Some(unit) = self.unit(unit_id) else {
            return Vec::new();
        };
        let zones = self.team_spawn_zones(unit.team());
        let ctx = ActionCtx {
            field: &self.field,
            visibility: &self.visibility,
            units: &self.units,
            spawn_zones: zones,
        };
        valid_positions(kind, unit, &ctx)
    }

    fn team_spawn_zones(&self, team: TeamId) -> &[Zone] {
        self.spawn_zones.get(&team).map(|z| z.as_slice()).unwrap_or(&[])
    }

    /// Greedy AI choice for a unit, scored over its full legal target set
    pub fn best_ai_action(&self, unit_id: UnitId) -> Option<crate::ai::AiAction> {
        let unit = self.unit(unit_id)?;
        let ctx = ActionCtx {
            field: &self.field,
            visibility: &self.visibility,
            units: &self.units,
            spawn_zones: self.team_spawn_zones(unit.team()),
        };
        crate::ai::best_action(unit, &ctx)
    }

    /// Attempt an action. Illegal attempts (wrong turn, no points, bad
    /// target, usage-domain mismatch, action already running) change nothing
    /// and return None; a started action returns the events so far.
    pub fn try_take_action(
        &mut self,
        unit_id: UnitId,
        kind: ActionKind,
        target: GridPosition,
    ) -> Option<EventLog> {
        if !self.is_idle() {
            return None;
        }

        let index = self.unit_index(unit_id)?;
        let unit = &self.units[index];
        let team = unit.team();
        if team != self.turn.current_team() {
            return None;
        }
        if unit.action(kind).is_none() {
            return None;
        }
        if !unit.can_spend_action_points(kind)
            || !is_applicable(kind, unit)
            || !meets_requirements(kind, unit)
        {
            return None;
        }

        let ctx = ActionCtx {
            field: &self.field,
            visibility: &self.visibility,
            units: &self.units,
            spawn_zones: self.team_spawn_zones(team),
        };
        if !valid_positions(kind, unit, &ctx).contains(&target) {
            return None;
        }

        // Move needs its waypoints up front
        let path = if kind == ActionKind::Move {
            let budget = modifiers::move_speed(unit);
            match pathfinding::find_path(
                &self.field,
                &self.visibility,
                &self.units,
                team,
                unit.position,
                target,
                budget,
            ) {
                Some((path, _)) => Some(path),
                None => return None,
            }
        } else {
            None
        };

        let mut events = EventLog::new();
        let tick = self.tick;
        let unit = &mut self.units[index];
        unit.spend_action_points(kind);
        events.push(
            tick,
            GameEvent::ActionPointsChanged { unit: unit_id, remaining: unit.action_points() },
        );

        let target_unit = self.field.unit_at(target);
        let Some(instance) = self.units[index].action_mut(kind) else {
            return None;
        };
        match instance {
            ActionInstance::Move(machine) => {
                if let Some(path) = path {
                    machine.begin(path);
                }
            }
            ActionInstance::Melee(machine) => {
                if let Some(target_unit) = target_unit {
                    machine.begin(target_unit);
                }
            }
            ActionInstance::Ranged(machine) => {
                if let Some(target_unit) = target_unit {
                    machine.begin(target_unit);
                }
            }
            ActionInstance::Push(machine) => {
                if let Some(target_unit) = target_unit {
                    machine.begin(target_unit);
                }
            }
            ActionInstance::Spawn(machine) => machine.begin(target),
            ActionInstance::Favor(machine) => machine.begin(),
            ActionInstance::Special(machine) => machine.begin(),
            ActionInstance::Elevation(machine) => machine.begin(target),
        }

        debug!(unit = %self.units[index].name, action = kind.name(), %target, "action started");
        events.push(tick, GameEvent::ActionStarted { unit: unit_id, kind });
        self.active = Some(ActiveAction { unit: unit_id, kind });

        // The very first step can already leave an enemy's threat range
        if kind == ActionKind::Move {
            self.check_move_threat(unit_id, &mut events);
        }
        Some(events)
    }

    /// Test the mover's upcoming step for an opportunity attack and suspend
    /// the move behind a reaction when one triggers.
    fn check_move_threat(&mut self, mover: UnitId, events: &mut EventLog) {
        let Some(index) = self.unit_index(mover) else {
            return;
        };
        let Some(ActionInstance::Move(mut machine)) =
            self.units[index].action(ActionKind::Move).cloned()
        else {
            return;
        };

        if let Some((entered, next)) = machine.upcoming_step() {
            let team = self.units[index].team();
            if let Some(enemy) = pathfinding::opportunity_attacker(&self.units, team, entered, next)
            {
                if self.begin_reaction(enemy, mover, events) {
                    machine.suspend_for_reaction(enemy);
                }
            }
        }
        self.store_machine(index, ActionInstance::Move(machine));
    }

    /// Advance the simulation one fixed step
    pub fn run_tick(&mut self) -> EventLog {
        let mut events = EventLog::new();
        self.tick += 1;

        if self.reaction.is_some() {
            self.drive_reaction(&mut events);
        } else if self.active.is_some() {
            self.drive_active(&mut events);
        }

        events
    }

    /// Tick until the current action (and any reaction) finishes
    pub fn run_until_idle(&mut self, max_ticks: u32) -> EventLog {
        let mut events = EventLog::new();
        for _ in 0..max_ticks {
            if self.is_idle() {
                break;
            }
            events.extend(self.run_tick());
        }
        events
    }

    /// Rotate to the next team. No-op while an action is in flight.
    pub fn next_turn(&mut self) -> EventLog {
        let mut events = EventLog::new();
        if !self.is_idle() {
            return events;
        }

        let team = self.turn.next_turn();
        let turn = self.turn.turn_number();
        events.push(self.tick, GameEvent::TurnChanged { team, turn });

        let mut depleted = Vec::new();
        for index in 0..self.units.len() {
            if self.units[index].team() != team || !self.units[index].in_arena {
                continue;
            }
            let report = self.units[index].on_turn_started(&mut self.rng);
            let unit = &self.units[index];
            events.push(
                self.tick,
                GameEvent::ActionPointsChanged { unit: unit.id, remaining: unit.action_points() },
            );
            if report.dot_damage > 0 {
                events.push(
                    self.tick,
                    GameEvent::UnitEnergyChanged { unit: unit.id, energy: unit.energy().current() },
                );
            }
            if report.favor_attrition > 0 {
                events.push(
                    self.tick,
                    GameEvent::UnitFavorChanged { unit: unit.id, favor: unit.favor().current() },
                );
            }
            if report.depleted {
                depleted.push(unit.id);
            }
        }

        for unit_id in depleted {
            self.handle_energy_depleted(unit_id, &mut events);
        }

        self.territory.on_turn_changed(self.tick, &mut events);
        events
    }

    fn drive_active(&mut self, events: &mut EventLog) {
        let Some(active) = self.active else {
            return;
        };
        let Some(index) = self.unit_index(active.unit) else {
            self.active = None;
            return;
        };
        let dt = self.config.tick_seconds;

        let Some(instance) = self.units[index].action(active.kind).cloned() else {
            self.active = None;
            return;
        };

        let finished = match instance {
            ActionInstance::Move(mut machine) => {
                if let Some(MoveSignal::Arrived { from, to }) = machine.tick(dt) {
                    self.store_machine(index, ActionInstance::Move(machine));
                    self.relocate_unit(active.unit, from, to, events);
                    self.check_move_threat(active.unit, events);
                    self.units[index]
                        .action(ActionKind::Move)
                        .map(|a| !a.is_active())
                        .unwrap_or(true)
                } else {
                    let finished = !machine.is_active;
                    self.store_machine(index, ActionInstance::Move(machine));
                    finished
                }
            }
            ActionInstance::Melee(mut machine) => {
                if let Some(MeleeSignal::Resolve { target }) = machine.tick(dt) {
                    self.resolve_attack_between(active.unit, target, MELEE_DAMAGE, true, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Melee(machine));
                finished
            }
            ActionInstance::Ranged(mut machine) => {
                if let Some(RangedSignal::Resolve { target }) = machine.tick(dt) {
                    self.resolve_attack_between(active.unit, target, RANGED_DAMAGE, true, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Ranged(machine));
                finished
            }
            ActionInstance::Push(mut machine) => {
                if let Some(PushSignal::Resolve { target }) = machine.tick(dt) {
                    self.resolve_push(active.unit, target, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Push(machine));
                finished
            }
            ActionInstance::Spawn(mut machine) => {
                if let Some(SpawnSignal::Materialize { at }) = machine.tick(dt) {
                    self.materialize_unit(active.unit, at, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Spawn(machine));
                finished
            }
            ActionInstance::Favor(mut machine) => {
                if let Some(FavorSignal::Resolve) = machine.tick(dt) {
                    self.resolve_favor_ritual(active.unit, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Favor(machine));
                finished
            }
            ActionInstance::Special(mut machine) => {
                if let Some(SpecialSignal::Unleash) = machine.tick(dt) {
                    self.resolve_special(active.unit, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Special(machine));
                finished
            }
            ActionInstance::Elevation(mut machine) => {
                if let Some(ElevationSignal::Reshape { center, range, amount }) = machine.tick(dt) {
                    self.reshape_terrain(center, range, amount, events);
                }
                let finished = !machine.is_active;
                self.store_machine(index, ActionInstance::Elevation(machine));
                finished
            }
        };

        // A move suspended mid-tick stays active while the reaction resolves
        if finished && self.reaction.is_none() {
            events.push(
                self.tick,
                GameEvent::ActionCompleted { unit: active.unit, kind: active.kind },
            );
            self.active = None;
            self.refresh_visibility(events);
        }
    }

    fn store_machine(&mut self, index: usize, instance: ActionInstance) {
        let kind = instance.kind();
        if let Some(slot) = self.units[index].action_mut(kind) {
            *slot = instance;
        }
    }

    /// Start the threatening enemy's melee as a reaction against the mover.
    /// Returns false when the enemy cannot make the attack.
    fn begin_reaction(&mut self, enemy: UnitId, mover: UnitId, events: &mut EventLog) -> bool {
        let Some(enemy_index) = self.unit_index(enemy) else {
            return false;
        };
        let Some(ActionInstance::Melee(mut machine)) =
            self.units[enemy_index].action(ActionKind::Melee).cloned()
        else {
            return false;
        };

        machine.begin(mover);
        self.store_machine(enemy_index, ActionInstance::Melee(machine));
        self.reaction = Some(Reaction { reactor: enemy, mover, missed: false });
        events.push(self.tick, GameEvent::OpportunityAttackTriggered { enemy, mover });
        events.push(self.tick, GameEvent::ActionStarted { unit: enemy, kind: ActionKind::Melee });
        true
    }

    fn drive_reaction(&mut self, events: &mut EventLog) {
        let Some(reaction) = self.reaction else {
            return;
        };
        let Some(reactor_index) = self.unit_index(reaction.reactor) else {
            self.finish_reaction(reaction, true, events);
            return;
        };
        let dt = self.config.tick_seconds;

        let Some(ActionInstance::Melee(mut machine)) =
            self.units[reactor_index].action(ActionKind::Melee).cloned()
        else {
            self.finish_reaction(reaction, true, events);
            return;
        };

        if let Some(MeleeSignal::Resolve { target }) = machine.tick(dt) {
            // Opportunity swings don't chain into counters
            let hit =
                self.resolve_attack_between(reaction.reactor, target, MELEE_DAMAGE, false, events);
            if let Some(r) = self.reaction.as_mut() {
                r.missed = !hit;
            }
        }

        let finished = !machine.is_active;
        self.store_machine(reactor_index, ActionInstance::Melee(machine));

        if finished {
            let missed = self.reaction.map(|r| r.missed).unwrap_or(true);
            events.push(
                self.tick,
                GameEvent::ActionCompleted { unit: reaction.reactor, kind: ActionKind::Melee },
            );
            self.finish_reaction(reaction, missed, events);
        }
    }

    fn finish_reaction(&mut self, reaction: Reaction, missed: bool, events: &mut EventLog) {
        self.reaction = None;
        if let Some(mover_index) = self.unit_index(reaction.mover) {
            let mover_position = self.units[mover_index].position;
            if let Some(ActionInstance::Move(machine)) =
                self.units[mover_index].action_mut(ActionKind::Move)
            {
                machine.resume(missed);
            }
            if !missed {
                events.push(
                    self.tick,
                    GameEvent::MoveHalted { unit: reaction.mover, at: mover_position },
                );
            }
        }
        self.refresh_visibility(events);
    }

    /// The single notification point for unit relocation: occupancy, unit
    /// position, UnitMoved event, territory, visibility.
    fn relocate_unit(
        &mut self,
        unit_id: UnitId,
        from: GridPosition,
        to: GridPosition,
        events: &mut EventLog,
    ) {
        self.field.unit_moved(unit_id, from, to);
        if let Some(index) = self.unit_index(unit_id) {
            self.units[index].position = to;
        }
        events.push(self.tick, GameEvent::UnitMoved { unit: unit_id, from, to });

        self.territory
            .on_unit_position_changed(from, &self.units, self.tick, events);
        self.territory
            .on_unit_position_changed(to, &self.units, self.tick, events);
        self.refresh_visibility(events);
    }

    fn refresh_visibility(&mut self, events: &mut EventLog) {
        for team in self.turn.teams().to_vec() {
            self.visibility.recompute_team(team, &self.field, &self.units);
            events.push(self.tick, GameEvent::TeamVisibilityChanged { team });
        }
    }

    /// Roll an attack from `attacker` against `target`, apply damage on a
    /// hit, and fire the distinguishable hit/missed signals. Returns whether
    /// the attack hit.
    fn resolve_attack_between(
        &mut self,
        attacker_id: UnitId,
        target_id: UnitId,
        damage: i32,
        allow_counter: bool,
        events: &mut EventLog,
    ) -> bool {
        let (Some(attacker_index), Some(target_index)) =
            (self.unit_index(attacker_id), self.unit_index(target_id))
        else {
            return false;
        };

        let modifier = modifiers::physical_hit_modifier(
            &self.units[attacker_index],
            &self.units[target_index],
            &self.field,
            &self.cover,
        );
        let armor = modifiers::physical_armor(&self.units[target_index]);
        let roll = combat::resolve_attack(&mut self.rng, modifier, armor);
        debug!(
            attacker = %self.units[attacker_index].name,
            target = %self.units[target_index].name,
            die = roll.die,
            total = roll.total(),
            armor,
            hit = roll.hit,
            "attack roll"
        );

        if !roll.hit {
            events.push(self.tick, GameEvent::AttackMissed { attacker: attacker_id, target: target_id });
            return false;
        }

        let depleted = self.units[target_index].damage(damage);
        events.push(
            self.tick,
            GameEvent::AttackHit { attacker: attacker_id, target: target_id, damage },
        );
        events.push(
            self.tick,
            GameEvent::UnitEnergyChanged {
                unit: target_id,
                energy: self.units[target_index].energy().current(),
            },
        );

        if depleted {
            self.handle_energy_depleted(target_id, events);
        } else if allow_counter {
            self.try_counter_attack(target_id, attacker_id, events);
        }

        true
    }

    /// An alert defender struck from an unseen cell may counter once per turn
    fn try_counter_attack(&mut self, defender_id: UnitId, attacker_id: UnitId, events: &mut EventLog) {
        let (Some(defender_index), Some(attacker_index)) =
            (self.unit_index(defender_id), self.unit_index(attacker_id))
        else {
            return;
        };

        let defender_team = self.units[defender_index].team();
        let attacker_pos = self.units[attacker_index].position;
        if self.visibility.is_visible(defender_team, attacker_pos) {
            return;
        }

        let charged = self.units[defender_index]
            .perks_mut()
            .iter_mut()
            .any(|perk| perk.take_counter_charge());
        if !charged {
            return;
        }

        events.push(
            self.tick,
            GameEvent::CounterAttackTriggered { defender: defender_id, attacker: attacker_id },
        );
        // Counters don't chain into further counters
        self.resolve_attack_between(defender_id, attacker_id, MELEE_DAMAGE, false, events);
    }

    fn resolve_push(&mut self, attacker_id: UnitId, target_id: UnitId, events: &mut EventLog) {
        let (Some(attacker_index), Some(target_index)) =
            (self.unit_index(attacker_id), self.unit_index(target_id))
        else {
            return;
        };

        let modifier = modifiers::push_modifier(&self.units[attacker_index]);
        let armor = modifiers::physical_armor(&self.units[target_index]);
        let roll = combat::resolve_attack(&mut self.rng, modifier, armor);

        if !roll.hit {
            events.push(self.tick, GameEvent::AttackMissed { attacker: attacker_id, target: target_id });
            return;
        }

        let attacker_pos = self.units[attacker_index].position;
        let start = self.units[target_index].position;
        let direction = modifiers::attack_direction(attacker_pos, start);
        let distance = (modifiers::push_strength(&self.units[attacker_index]) / 5).max(1);

        let mut landing = start;
        for _ in 0..distance {
            let next = landing + direction.offset();
            if !self.field.is_valid(next) || self.field.has_any_unit(next) {
                break;
            }
            landing = next;
        }

        events.push(
            self.tick,
            GameEvent::UnitPushed { unit: target_id, from: start, to: landing },
        );
        if landing != start {
            self.relocate_unit(target_id, start, landing, events);
        }
    }

    /// Bring a reserve unit into the arena and top up its energy from the
    /// team pool.
    fn materialize_unit(&mut self, unit_id: UnitId, at: GridPosition, events: &mut EventLog) {
        let Some(index) = self.unit_index(unit_id) else {
            return;
        };

        let team = self.units[index].team();
        if let Some(reserve) = self.reserves.get_mut(&team) {
            reserve.remove_unit(unit_id);
        }

        {
            let unit = &mut self.units[index];
            unit.in_arena = true;
            unit.position = at;
        }
        self.field.add_unit(at, unit_id);
        events.push(self.tick, GameEvent::UnitSpawned { unit: unit_id, position: at });

        let deficit =
            self.units[index].energy().max() - self.units[index].energy().current();
        if deficit > 0 {
            if let Some(pool) = self.team_energy.get_mut(&team) {
                pool.amount -= deficit;
                events.push(self.tick, GameEvent::TeamEnergyChanged { team, amount: pool.amount });
            }
            self.units[index].heal(deficit);
            events.push(
                self.tick,
                GameEvent::UnitEnergyChanged {
                    unit: unit_id,
                    energy: self.units[index].energy().current(),
                },
            );
        }

        self.territory
            .on_unit_position_changed(at, &self.units, self.tick, events);
        self.refresh_visibility(events);
    }

    fn resolve_favor_ritual(&mut self, unit_id: UnitId, events: &mut EventLog) {
        let Some(index) = self.unit_index(unit_id) else {
            return;
        };

        let gain = combat::roll_d20(&mut self.rng) + modifiers::favor_modifier(&self.units[index]);
        self.units[index].add_favor(gain.max(0));
        events.push(
            self.tick,
            GameEvent::UnitFavorChanged {
                unit: unit_id,
                favor: self.units[index].favor().current(),
            },
        );
    }

    fn resolve_special(&mut self, unit_id: UnitId, events: &mut EventLog) {
        let Some(index) = self.unit_index(unit_id) else {
            return;
        };

        let team = self.units[index].team();
        self.units[index].use_favor();
        events.push(
            self.tick,
            GameEvent::UnitFavorChanged {
                unit: unit_id,
                favor: self.units[index].favor().current(),
            },
        );

        if let Some(pool) = self.team_favor.get_mut(&team) {
            pool.amount = (pool.amount + 1).min(pool.max);
            events.push(self.tick, GameEvent::TeamFavorChanged { team, amount: pool.amount });
        }
    }

    fn reshape_terrain(
        &mut self,
        center: GridPosition,
        range: i32,
        amount: i32,
        events: &mut EventLog,
    ) {
        for dx in -range..=range {
            for dz in -range..=range {
                let pos = center + GridPosition::new(dx, dz);
                if let Some(elevation) = self.field.change_elevation(pos, amount) {
                    events.push(self.tick, GameEvent::ElevationChanged { position: pos, elevation });
                    self.cover.update_around(&self.field, pos);
                }
            }
        }
        self.refresh_visibility(events);
    }

    /// Energy hit zero: death-prevention perks first, otherwise bench the
    /// unit into its team's reserve grid.
    fn handle_energy_depleted(&mut self, unit_id: UnitId, events: &mut EventLog) {
        let Some(index) = self.unit_index(unit_id) else {
            return;
        };

        if self.units[index].try_prevent_death(&mut self.rng) {
            events.push(
                self.tick,
                GameEvent::UnitEnergyChanged {
                    unit: unit_id,
                    energy: self.units[index].energy().current(),
                },
            );
            return;
        }

        let team = self.units[index].team();
        let old_position = self.units[index].position;
        let was_in_arena = self.units[index].in_arena;

        events.push(self.tick, GameEvent::UnitOutOfEnergy { unit: unit_id });
        if was_in_arena {
            self.field.remove_unit(old_position, unit_id);
        }

        {
            let unit = &mut self.units[index];
            unit.in_arena = false;
            unit.set_action_points(BENCHED_ACTION_POINTS);
        }
        if let Some(reserve) = self.reserves.get_mut(&team) {
            if let Some(slot) = reserve.add_unit(unit_id) {
                self.units[index].position = slot;
            }
        }

        if was_in_arena {
            self.territory
                .on_unit_position_changed(old_position, &self.units, self.tick, events);
            self.refresh_visibility(events);
        }
    }
}
