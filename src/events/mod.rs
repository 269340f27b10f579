//! Typed game events
//!
//! Every mutating entry point returns (or appends to) an `EventLog`;
//! consumers are fire-and-forget readers. Payload shapes mirror the systems
//! that raise them.

use serde::{Deserialize, Serialize};

use crate::actions::kind::ActionKind;
use crate::core::types::{TeamId, Tick, UnitId};
use crate::grid::position::GridPosition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // Turn flow
    TurnChanged { team: TeamId, turn: u32 },

    // Actions
    ActionStarted { unit: UnitId, kind: ActionKind },
    ActionCompleted { unit: UnitId, kind: ActionKind },
    ActionPointsChanged { unit: UnitId, remaining: i32 },

    // Grid
    UnitMoved { unit: UnitId, from: GridPosition, to: GridPosition },
    ElevationChanged { position: GridPosition, elevation: i32 },

    // Combat
    AttackHit { attacker: UnitId, target: UnitId, damage: i32 },
    AttackMissed { attacker: UnitId, target: UnitId },
    OpportunityAttackTriggered { enemy: UnitId, mover: UnitId },
    CounterAttackTriggered { defender: UnitId, attacker: UnitId },
    UnitPushed { unit: UnitId, from: GridPosition, to: GridPosition },
    MoveHalted { unit: UnitId, at: GridPosition },

    // Units
    UnitSpawned { unit: UnitId, position: GridPosition },
    UnitOutOfEnergy { unit: UnitId },
    UnitEnergyChanged { unit: UnitId, energy: i32 },
    UnitFavorChanged { unit: UnitId, favor: i32 },

    // Teams
    TeamVisibilityChanged { team: TeamId },
    TeamEnergyChanged { team: TeamId, amount: i32 },
    TeamFavorChanged { team: TeamId, amount: i32 },

    // Territory
    TerritoryOwnerChanged { zone: u32, owner: Option<TeamId> },
    TerritoryScoreChanged { team: TeamId, points: i32 },
}

/// A tick-stamped event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub tick: Tick,
    pub event: GameEvent,
}

/// Events accumulated during one entry point or tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, event: GameEvent) {
        self.events.push(EventRecord { tick, event });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter().map(|r| &r.event)
    }

    pub fn contains(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.iter().any(predicate)
    }

    pub fn extend(&mut self, other: EventLog) {
        self.events.extend(other.events);
    }
}
