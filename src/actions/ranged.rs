//! Ranged attack - same swing shape as melee, sight-limited targeting

use serde::{Deserialize, Serialize};

use crate::core::constants::{RANGED_RECOVERY_SECONDS, RANGED_WINDUP_SECONDS};
use crate::core::types::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum RangedPhase {
    Windup,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangedSignal {
    Resolve { target: UnitId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangedAction {
    pub is_active: bool,
    target: Option<UnitId>,
    phase: RangedPhase,
    timer: f32,
}

impl Default for RangedAction {
    fn default() -> Self {
        Self {
            is_active: false,
            target: None,
            phase: RangedPhase::Windup,
            timer: 0.0,
        }
    }
}

impl RangedAction {
    pub fn begin(&mut self, target: UnitId) {
        self.is_active = true;
        self.target = Some(target);
        self.phase = RangedPhase::Windup;
        self.timer = RANGED_WINDUP_SECONDS;
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn tick(&mut self, dt: f32) -> Option<RangedSignal> {
        if !self.is_active {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        match self.phase {
            RangedPhase::Windup => {
                self.phase = RangedPhase::Recovery;
                self.timer = RANGED_RECOVERY_SECONDS;
                self.target.map(|target| RangedSignal::Resolve { target })
            }
            RangedPhase::Recovery => {
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

    #[test]
    fn test_resolves_once_then_completes() {
        let mut action = RangedAction::default();
        let target = UnitId::new();
        action.begin(target);

        let mut resolutions = 0;
        for _ in 0..30 {
            if let Some(RangedSignal::Resolve { .. }) = action.tick(0.1) {
                resolutions += 1;
            }
        }
        assert_eq!(resolutions, 1);
        assert!(!action.is_active);
    }
}
