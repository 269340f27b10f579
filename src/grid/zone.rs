//! Cell-set zones (spawn areas, territory regions)

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::grid::position::GridPosition;

/// An axis-aligned rectangle of cells, used to author zones
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CellRect {
    pub x: i32,
    pub z: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub fn new(x: i32, z: i32, width: i32, height: i32) -> Self {
        Self { x, z, width, height }
    }

    pub fn cells(&self) -> Vec<GridPosition> {
        let mut out = Vec::with_capacity((self.width * self.height).max(0) as usize);
        for x in self.x..self.x + self.width {
            for z in self.z..self.z + self.height {
                out.push(GridPosition::new(x, z));
            }
        }
        out
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        pos.x >= self.x && pos.x < self.x + self.width && pos.z >= self.z && pos.z < self.z + self.height
    }
}

/// A named set of grid cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    cells: Vec<GridPosition>,
    set: AHashSet<GridPosition>,
}

impl Zone {
    pub fn new(cells: Vec<GridPosition>) -> Self {
        let set = cells.iter().copied().collect();
        Self { cells, set }
    }

    pub fn from_rect(rect: CellRect) -> Self {
        Self::new(rect.cells())
    }

    pub fn cells(&self) -> &[GridPosition] {
        &self.cells
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        self.set.contains(&pos)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells with at least one neighbor outside the zone
    pub fn boundary(&self) -> Vec<GridPosition> {
        self.cells
            .iter()
            .copied()
            .filter(|pos| pos.all_neighbors().iter().any(|n| !self.set.contains(n)))
            .collect()
    }
}
