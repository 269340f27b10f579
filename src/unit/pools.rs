//! Energy and favor pools with clamped arithmetic

use serde::{Deserialize, Serialize};

/// Hit points. Reaching zero benches the unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyPool {
    current: i32,
    max: i32,
}

impl EnergyPool {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn normalized(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// Returns true when the pool just hit zero
    pub fn damage(&mut self, amount: i32) -> bool {
        self.current = (self.current - amount).max(0);
        self.current == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max;
        self.current = self.current.min(max);
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// The favor resource, built up by rituals and spent whole
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FavorPool {
    current: i32,
    max: i32,
}

impl FavorPool {
    pub fn new(max: i32) -> Self {
        Self { current: 0, max: max.max(0) }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn normalized(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn is_full(&self) -> bool {
        self.max > 0 && self.current == self.max
    }

    pub fn add(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max).max(0);
    }

    pub fn remove(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    /// Spend the whole pool (ultimate actions take all favor)
    pub fn drain(&mut self) -> i32 {
        let spent = self.current;
        self.current = 0;
        spent
    }

    pub fn set_max(&mut self, max: i32) {
        self.max = max.max(0);
        self.current = self.current.min(self.max);
    }
}
