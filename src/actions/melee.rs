//! Melee attack - windup, one roll, recovery

use serde::{Deserialize, Serialize};

use crate::core::constants::{MELEE_RECOVERY_SECONDS, MELEE_WINDUP_SECONDS};
use crate::core::types::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum MeleePhase {
    Windup,
    Recovery,
}

/// Effect requests emitted toward the skirmish driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleeSignal {
    /// The swing lands now: roll hit/miss against the captured target
    Resolve { target: UnitId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeAction {
    pub is_active: bool,
    target: Option<UnitId>,
    phase: MeleePhase,
    timer: f32,
}

impl Default for MeleeAction {
    fn default() -> Self {
        Self {
            is_active: false,
            target: None,
            phase: MeleePhase::Windup,
            timer: 0.0,
        }
    }
}

impl MeleeAction {
    pub fn max_range(&self) -> i32 {
        1
    }

    pub fn begin(&mut self, target: UnitId) {
        self.is_active = true;
        self.target = Some(target);
        self.phase = MeleePhase::Windup;
        self.timer = MELEE_WINDUP_SECONDS;
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    /// Advance one fixed step. Deactivates itself on the terminal state.
    pub fn tick(&mut self, dt: f32) -> Option<MeleeSignal> {
        if !self.is_active {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        match self.phase {
            MeleePhase::Windup => {
                self.phase = MeleePhase::Recovery;
                self.timer = MELEE_RECOVERY_SECONDS;
                self.target.map(|target| MeleeSignal::Resolve { target })
            }
            MeleePhase::Recovery => {
                self.is_active = false;
                self.target = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(action: &mut MeleeAction, dt: f32, steps: usize) -> Vec<MeleeSignal> {
        (0..steps).filter_map(|_| action.tick(dt)).collect()
    }

    #[test]
    fn test_windup_then_resolve_then_complete() {
        let mut action = MeleeAction::default();
        let target = UnitId::new();
        action.begin(target);
        assert!(action.is_active);

        // 0.7s windup at 0.1s steps: resolve on the 7th tick
        let signals = drive(&mut action, 0.1, 6);
        assert!(signals.is_empty());
        assert_eq!(action.tick(0.1), Some(MeleeSignal::Resolve { target }));
        assert!(action.is_active, "recovery still running");

        // 0.5s recovery
        drive(&mut action, 0.1, 5);
        assert!(!action.is_active);
    }

    #[test]
    fn test_inactive_ticks_do_nothing() {
        let mut action = MeleeAction::default();
        assert_eq!(action.tick(1.0), None);
        assert!(!action.is_active);
    }
}
