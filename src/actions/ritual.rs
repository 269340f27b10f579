//! Favor and special rituals - timed in-place channels
//!
//! The favor ritual rolls favor into the unit's personal pool on completion;
//! the special (ultimate) drains a full pool and credits the team track.

use serde::{Deserialize, Serialize};

use crate::core::constants::RITUAL_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavorSignal {
    /// Roll favor gain for the channeling unit
    Resolve,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FavorAction {
    pub is_active: bool,
    timer: f32,
}

impl FavorAction {
    pub fn begin(&mut self) {
        self.is_active = true;
        self.timer = RITUAL_SECONDS;
    }

    pub fn tick(&mut self, dt: f32) -> Option<FavorSignal> {
        if !self.is_active {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        self.is_active = false;
        Some(FavorSignal::Resolve)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialSignal {
    /// Expend the unit's full favor pool
    Unleash,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialAction {
    pub is_active: bool,
    timer: f32,
}

impl SpecialAction {
    pub fn begin(&mut self) {
        self.is_active = true;
        self.timer = RITUAL_SECONDS;
    }

    pub fn tick(&mut self, dt: f32) -> Option<SpecialSignal> {
        if !self.is_active {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        self.is_active = false;
        Some(SpecialSignal::Unleash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favor_ritual_takes_the_full_channel() {
        let mut action = FavorAction::default();
        action.begin();

        let mut ticks = 0;
        loop {
            ticks += 1;
            if action.tick(0.1).is_some() {
                break;
            }
            assert!(ticks < 100, "ritual never resolved");
        }
        assert_eq!(ticks, 10);
        assert!(!action.is_active);
    }

    #[test]
    fn test_special_resolves_once() {
        let mut action = SpecialAction::default();
        action.begin();
        let signals: Vec<_> = (0..20).filter_map(|_| action.tick(0.1)).collect();
        assert_eq!(signals, vec![SpecialSignal::Unleash]);
    }
}
