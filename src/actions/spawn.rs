//! Spawn - bring a reserve unit into the arena at a spawn-zone cell

use serde::{Deserialize, Serialize};

use crate::grid::position::GridPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSignal {
    /// Place the unit on its captured target cell
    Materialize { at: GridPosition },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnAction {
    pub is_active: bool,
    target: Option<GridPosition>,
}

impl SpawnAction {
    pub fn begin(&mut self, target: GridPosition) {
        self.is_active = true;
        self.target = Some(target);
    }

    pub fn target(&self) -> Option<GridPosition> {
        self.target
    }

    /// Spawning resolves on its first tick
    pub fn tick(&mut self, _dt: f32) -> Option<SpawnSignal> {
        if !self.is_active {
            return None;
        }

        self.is_active = false;
        let signal = self.target.map(|at| SpawnSignal::Materialize { at });
        self.target = None;
        signal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_resolves_immediately() {
        let mut action = SpawnAction::default();
        let at = GridPosition::new(3, 4);
        action.begin(at);

        assert_eq!(action.tick(0.1), Some(SpawnSignal::Materialize { at }));
        assert!(!action.is_active);
        assert_eq!(action.tick(0.1), None);
    }
}
