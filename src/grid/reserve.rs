//! Per-team reserve grids
//!
//! Units not in the arena are parked here: benched when out of energy,
//! waiting before they spawn in. Slots are scanned row-major for the first
//! free position.

use serde::{Deserialize, Serialize};

use crate::core::constants::{RESERVE_GRID_HEIGHT, RESERVE_GRID_WIDTH};
use crate::core::types::UnitId;
use crate::grid::position::GridPosition;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveGrid {
    width: i32,
    height: i32,
    slots: Vec<Option<UnitId>>,
}

impl Default for ReserveGrid {
    fn default() -> Self {
        Self::new(RESERVE_GRID_WIDTH, RESERVE_GRID_HEIGHT)
    }
}

impl ReserveGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            slots: vec![None; (width * height).max(0) as usize],
        }
    }

    fn index(&self, pos: GridPosition) -> Option<usize> {
        if pos.x < 0 || pos.z < 0 || pos.x >= self.width || pos.z >= self.height {
            return None;
        }
        Some((pos.x * self.height + pos.z) as usize)
    }

    /// Park a unit at the first free slot; None when the reserve is full
    pub fn add_unit(&mut self, unit: UnitId) -> Option<GridPosition> {
        for x in 0..self.width {
            for z in 0..self.height {
                let pos = GridPosition::new(x, z);
                let idx = self.index(pos)?;
                if self.slots[idx].is_none() {
                    self.slots[idx] = Some(unit);
                    return Some(pos);
                }
            }
        }
        None
    }

    pub fn remove_unit(&mut self, unit: UnitId) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(unit) {
                *slot = None;
                return;
            }
        }
    }

    pub fn unit_at(&self, pos: GridPosition) -> Option<UnitId> {
        self.index(pos).and_then(|i| self.slots[i])
    }

    pub fn position_of(&self, unit: UnitId) -> Option<GridPosition> {
        for x in 0..self.width {
            for z in 0..self.height {
                let pos = GridPosition::new(x, z);
                if self.unit_at(pos) == Some(unit) {
                    return Some(pos);
                }
            }
        }
        None
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
