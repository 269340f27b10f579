//! The arena grid: circular cell storage, occupancy, elevation edits
//!
//! Cells live in a dense (2R+1) x (2R+1) array; a position is part of the
//! arena iff it falls inside the radius-R circle around the center. Elevation
//! changes go through `change_elevation` only, so cover and visibility can be
//! refreshed from one place.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::{
    DEFAULT_BULLSEYE_RADIUS, DEFAULT_CELL_SIZE, DEFAULT_ELEVATION_SCALE_FACTOR,
    DEFAULT_GRID_RADIUS, DEFAULT_SECTOR_COUNT,
};
use crate::core::error::{Result, RingfieldError};
use crate::core::types::UnitId;
use crate::grid::biome::Biome;
use crate::grid::cell::{GridCell, InteractableId};
use crate::grid::position::GridPosition;

/// Arena grid parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    pub radius: i32,
    pub cell_size: f32,
    pub elevation_scale_factor: f32,
    pub sector_count: u32,
    pub bullseye_radius: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GRID_RADIUS,
            cell_size: DEFAULT_CELL_SIZE,
            elevation_scale_factor: DEFAULT_ELEVATION_SCALE_FACTOR,
            sector_count: DEFAULT_SECTOR_COUNT,
            bullseye_radius: DEFAULT_BULLSEYE_RADIUS,
        }
    }
}

/// The circular arena grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridField {
    config: GridConfig,
    side: i32,
    cells: Vec<Option<GridCell>>,
    /// Biome per sector id; index 0 is the central bullseye
    sector_biomes: Vec<Biome>,
}

impl GridField {
    /// Generate a fresh arena. Biomes are drawn per sector, then every cell
    /// samples its (terrain, elevation) from its sector's biome table.
    pub fn generate(config: GridConfig, rng: &mut impl Rng) -> Result<Self> {
        if config.radius <= 0 {
            return Err(RingfieldError::InvalidGridConfig(format!(
                "radius must be positive, got {}",
                config.radius
            )));
        }
        if config.sector_count == 0 {
            return Err(RingfieldError::InvalidGridConfig(
                "sector_count must be positive".to_string(),
            ));
        }
        if config.bullseye_radius >= config.radius {
            return Err(RingfieldError::InvalidGridConfig(format!(
                "bullseye radius {} must be smaller than arena radius {}",
                config.bullseye_radius, config.radius
            )));
        }

        let side = config.radius * 2 + 1;
        let sector_biomes: Vec<Biome> = (0..=config.sector_count)
            .map(|_| Biome::random(rng))
            .collect();

        let mut field = Self {
            config,
            side,
            cells: vec![None; (side * side) as usize],
            sector_biomes,
        };

        for x in 0..side {
            for z in 0..side {
                let pos = GridPosition::new(x, z);
                if field.is_within_circle(pos) {
                    let biome = field.sector_biomes[field.sector_of(pos) as usize];
                    let (terrain, elevation) = biome.sample(rng);
                    field.cells[(x * side + z) as usize] = Some(GridCell::new(terrain, elevation));
                }
            }
        }

        Ok(field)
    }

    /// A flat all-Plain arena, used by tests and tools that need
    /// predictable terrain.
    pub fn flat(config: GridConfig) -> Result<Self> {
        if config.radius <= 0 {
            return Err(RingfieldError::InvalidGridConfig(format!(
                "radius must be positive, got {}",
                config.radius
            )));
        }
        if config.sector_count == 0 {
            return Err(RingfieldError::InvalidGridConfig(
                "sector_count must be positive".to_string(),
            ));
        }
        if config.bullseye_radius >= config.radius {
            return Err(RingfieldError::InvalidGridConfig(format!(
                "bullseye radius {} must be smaller than arena radius {}",
                config.bullseye_radius, config.radius
            )));
        }

        let side = config.radius * 2 + 1;
        let mut field = Self {
            config,
            side,
            cells: vec![None; (side * side) as usize],
            sector_biomes: vec![Biome::Grassland; (config.sector_count + 1) as usize],
        };

        for x in 0..side {
            for z in 0..side {
                let pos = GridPosition::new(x, z);
                if field.is_within_circle(pos) {
                    field.cells[(x * side + z) as usize] =
                        Some(GridCell::new(crate::grid::cell::TerrainType::Plain, 0));
                }
            }
        }

        Ok(field)
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn radius(&self) -> i32 {
        self.config.radius
    }

    pub fn side(&self) -> i32 {
        self.side
    }

    pub fn center(&self) -> GridPosition {
        GridPosition::new(self.config.radius, self.config.radius)
    }

    pub fn elevation_scale_factor(&self) -> f32 {
        self.config.elevation_scale_factor
    }

    fn is_within_circle(&self, pos: GridPosition) -> bool {
        let r = self.config.radius;
        let dx = (pos.x - r) as f32;
        let dz = (pos.z - r) as f32;
        dx * dx + dz * dz <= (r as f32 + 0.5) * (r as f32 + 0.5)
    }

    /// Is this position part of the arena?
    pub fn is_valid(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.z >= 0 && pos.x < self.side && pos.z < self.side && self.is_within_circle(pos)
    }

    pub fn cell(&self, pos: GridPosition) -> Option<&GridCell> {
        if pos.x < 0 || pos.z < 0 || pos.x >= self.side || pos.z >= self.side {
            return None;
        }
        self.cells[(pos.x * self.side + pos.z) as usize].as_ref()
    }

    fn cell_mut(&mut self, pos: GridPosition) -> Option<&mut GridCell> {
        if pos.x < 0 || pos.z < 0 || pos.x >= self.side || pos.z >= self.side {
            return None;
        }
        self.cells[(pos.x * self.side + pos.z) as usize].as_mut()
    }

    /// All valid arena positions
    pub fn positions(&self) -> Vec<GridPosition> {
        let mut out = Vec::new();
        for x in 0..self.side {
            for z in 0..self.side {
                let pos = GridPosition::new(x, z);
                if self.cell(pos).is_some() {
                    out.push(pos);
                }
            }
        }
        out
    }

    pub fn elevation_at(&self, pos: GridPosition) -> i32 {
        self.cell(pos).map(|c| c.elevation).unwrap_or(0)
    }

    pub fn terrain_at(&self, pos: GridPosition) -> Option<crate::grid::cell::TerrainType> {
        self.cell(pos).map(|c| c.terrain)
    }

    /// Mutate elevation by `delta`. Returns the new elevation, or None for
    /// positions outside the arena. The sole terrain-editing entry point.
    pub fn change_elevation(&mut self, pos: GridPosition, delta: i32) -> Option<i32> {
        let cell = self.cell_mut(pos)?;
        cell.elevation += delta;
        Some(cell.elevation)
    }

    /// World-space mapping: lattice position scaled by cell size, elevation
    /// carried on the Y axis.
    pub fn world_position(&self, pos: GridPosition) -> [f32; 3] {
        [
            pos.x as f32 * self.config.cell_size,
            self.elevation_at(pos) as f32 * self.config.elevation_scale_factor,
            pos.z as f32 * self.config.cell_size,
        ]
    }

    pub fn add_unit(&mut self, pos: GridPosition, unit: UnitId) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.add_unit(unit);
        }
    }

    pub fn remove_unit(&mut self, pos: GridPosition, unit: UnitId) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.remove_unit(unit);
        }
    }

    /// Relocate a unit's occupancy. Callers emit the UnitMoved notification.
    pub fn unit_moved(&mut self, unit: UnitId, from: GridPosition, to: GridPosition) {
        self.remove_unit(from, unit);
        self.add_unit(to, unit);
    }

    pub fn has_any_unit(&self, pos: GridPosition) -> bool {
        self.cell(pos).map(|c| c.has_any_unit()).unwrap_or(false)
    }

    pub fn unit_at(&self, pos: GridPosition) -> Option<UnitId> {
        self.cell(pos).and_then(|c| c.unit())
    }

    pub fn interactable_at(&self, pos: GridPosition) -> Option<InteractableId> {
        self.cell(pos).and_then(|c| c.interactable)
    }

    pub fn set_interactable(&mut self, pos: GridPosition, interactable: InteractableId) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.interactable = Some(interactable);
        }
    }

    pub fn clear_interactable(&mut self, pos: GridPosition) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.interactable = None;
        }
    }

    /// Sector id for a position: 0 for the central bullseye disc, then
    /// 1..=sector_count counting counterclockwise from the +x axis.
    pub fn sector_of(&self, pos: GridPosition) -> u32 {
        let center = self.center();
        let dx = (pos.x - center.x) as f32;
        let dz = (pos.z - center.z) as f32;

        let b = self.config.bullseye_radius as f32 + 0.5;
        if dx * dx + dz * dz <= b * b {
            return 0;
        }

        let mut angle = dz.atan2(dx);
        if angle < 0.0 {
            angle += std::f32::consts::TAU;
        }
        let sector = (angle / std::f32::consts::TAU * self.config.sector_count as f32) as u32;
        1 + sector.min(self.config.sector_count - 1)
    }

    /// All valid cells belonging to a sector
    pub fn sector_cells(&self, sector: u32) -> Vec<GridPosition> {
        self.positions()
            .into_iter()
            .filter(|p| self.sector_of(*p) == sector)
            .collect()
    }

    pub fn sector_count(&self) -> u32 {
        self.config.sector_count
    }

    pub fn sector_biome(&self, sector: u32) -> Option<Biome> {
        self.sector_biomes.get(sector as usize).copied()
    }
}
