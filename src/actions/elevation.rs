//! Terrain-shaping - raise the ground around a target cell

use serde::{Deserialize, Serialize};

use crate::grid::position::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationSignal {
    /// Raise every valid cell within `range` of `center` by `amount`
    Reshape {
        center: GridPosition,
        range: i32,
        amount: i32,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElevationAction {
    pub is_active: bool,
    target: Option<GridPosition>,
}

impl ElevationAction {
    pub fn max_range(&self) -> i32 {
        1
    }

    /// Radius of the reshaped patch around the target
    pub fn effect_range(&self) -> i32 {
        1
    }

    pub fn begin(&mut self, target: GridPosition) {
        self.is_active = true;
        self.target = Some(target);
    }

    pub fn tick(&mut self, _dt: f32) -> Option<ElevationSignal> {
        if !self.is_active {
            return None;
        }

        self.is_active = false;
        let signal = self.target.map(|center| ElevationSignal::Reshape {
            center,
            range: self.effect_range(),
            amount: 1,
        });
        self.target = None;
        signal
    }
}
