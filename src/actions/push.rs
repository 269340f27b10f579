//! Push attack - windup, shove roll, recovery

use serde::{Deserialize, Serialize};

use crate::core::constants::{PUSH_RECOVERY_SECONDS, PUSH_WINDUP_SECONDS};
use crate::core::types::UnitId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PushPhase {
    Windup,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushSignal {
    /// Roll the shove now; on a hit the driver displaces the target
    Resolve { target: UnitId },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushAction {
    pub is_active: bool,
    target: Option<UnitId>,
    phase: PushPhase,
    timer: f32,
}

impl Default for PushAction {
    fn default() -> Self {
        Self {
            is_active: false,
            target: None,
            phase: PushPhase::Windup,
            timer: 0.0,
        }
    }
}

impl PushAction {
    pub fn max_range(&self) -> i32 {
        1
    }

    pub fn begin(&mut self, target: UnitId) {
        self.is_active = true;
        self.target = Some(target);
        self.phase = PushPhase::Windup;
        self.timer = PUSH_WINDUP_SECONDS;
    }

    pub fn target(&self) -> Option<UnitId> {
        self.target
    }

    pub fn tick(&mut self, dt: f32) -> Option<PushSignal> {
        if !self.is_active {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        match self.phase {
            PushPhase::Windup => {
                self.phase = PushPhase::Recovery;
                self.timer = PUSH_RECOVERY_SECONDS;
                self.target.map(|target| PushSignal::Resolve { target })
            }
            PushPhase::Recovery => {
                self.is_active = false;
                self.target = None;
                None
            }
        }
    }
}
