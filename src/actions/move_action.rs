//! Movement along a precomputed waypoint path
//!
//! The machine walks the path one segment at a time. After entering each
//! waypoint the driver tests the (entered, next) pair for an opportunity
//! attack; a triggered attack suspends the move in `AwaitingReaction` until
//! the driver resumes it with the attack outcome. A hit halts the move at the
//! current waypoint; a miss lets it continue.

use serde::{Deserialize, Serialize};

use crate::core::constants::MOVE_SECONDS_PER_CELL;
use crate::core::types::UnitId;
use crate::grid::position::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum MovePhase {
    Advancing,
    AwaitingReaction { enemy: UnitId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSignal {
    /// The unit entered `to`; the driver relocates occupancy and re-checks
    /// threats toward the next waypoint
    Arrived { from: GridPosition, to: GridPosition },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveAction {
    pub is_active: bool,
    waypoints: Vec<GridPosition>,
    /// Index of the waypoint currently being approached
    next_index: usize,
    timer: f32,
    phase: MovePhase,
    halted: bool,
}

impl Default for MoveAction {
    fn default() -> Self {
        Self {
            is_active: false,
            waypoints: Vec::new(),
            next_index: 0,
            timer: 0.0,
            phase: MovePhase::Advancing,
            halted: false,
        }
    }
}

impl MoveAction {
    /// Start along `path`; the first waypoint is the unit's current cell
    pub fn begin(&mut self, path: Vec<GridPosition>) {
        self.is_active = true;
        self.waypoints = path;
        self.next_index = 1;
        self.timer = MOVE_SECONDS_PER_CELL;
        self.phase = MovePhase::Advancing;
        self.halted = false;
    }

    pub fn waypoints(&self) -> &[GridPosition] {
        &self.waypoints
    }

    pub fn is_waiting_for_reaction(&self) -> bool {
        matches!(self.phase, MovePhase::AwaitingReaction { .. })
    }

    /// The step the unit is about to take: (just entered, next waypoint)
    pub fn upcoming_step(&self) -> Option<(GridPosition, GridPosition)> {
        if self.next_index == 0 || self.next_index >= self.waypoints.len() {
            return None;
        }
        Some((
            self.waypoints[self.next_index - 1],
            self.waypoints[self.next_index],
        ))
    }

    /// Suspend progress while an opportunity attack resolves
    pub fn suspend_for_reaction(&mut self, enemy: UnitId) {
        self.phase = MovePhase::AwaitingReaction { enemy };
    }

    /// Resume after the reaction: a hit halts the move permanently
    pub fn resume(&mut self, attack_missed: bool) {
        self.phase = MovePhase::Advancing;
        if !attack_missed {
            self.halted = true;
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<MoveSignal> {
        if !self.is_active || self.is_waiting_for_reaction() {
            return None;
        }

        if self.halted || self.next_index >= self.waypoints.len() {
            self.is_active = false;
            self.waypoints.clear();
            self.next_index = 0;
            self.halted = false;
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        let from = self.waypoints[self.next_index - 1];
        let to = self.waypoints[self.next_index];
        self.next_index += 1;
        self.timer = MOVE_SECONDS_PER_CELL;
        Some(MoveSignal::Arrived { from, to })
    }
}
