//! Directional cover derived from elevation
//!
//! A cell gains cover against attacks from a direction when the adjacent cell
//! in that direction sits high enough above it. Recomputed for a cell and its
//! ring whenever elevation changes.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::core::constants::{FULL_COVER_ELEVATION, PARTIAL_COVER_ELEVATION};

/// Eight compass directions used for cover and attack quantization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Lattice offset for this direction (+z is north)
    pub fn offset(&self) -> GridPosition {
        match self {
            Direction::North => GridPosition::new(0, 1),
            Direction::NorthEast => GridPosition::new(1, 1),
            Direction::East => GridPosition::new(1, 0),
            Direction::SouthEast => GridPosition::new(1, -1),
            Direction::South => GridPosition::new(0, -1),
            Direction::SouthWest => GridPosition::new(-1, -1),
            Direction::West => GridPosition::new(-1, 0),
            Direction::NorthWest => GridPosition::new(-1, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    fn index(&self) -> usize {
        Direction::ALL
            .iter()
            .position(|d| d == self)
            .unwrap_or(0)
    }
}

/// How much cover a cell has from one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoverLevel {
    #[default]
    None,
    Partial,
    Full,
}

/// Cover levels for every arena cell, per direction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverMap {
    map: AHashMap<GridPosition, [CoverLevel; 8]>,
}

impl CoverMap {
    /// Compute cover for the whole arena
    pub fn build(field: &GridField) -> Self {
        let mut cover = Self::default();
        for pos in field.positions() {
            cover.update_position(field, pos);
        }
        cover
    }

    /// Refresh one cell's cover from current elevations
    pub fn update_position(&mut self, field: &GridField, pos: GridPosition) {
        if !field.is_valid(pos) {
            return;
        }

        let mut levels = [CoverLevel::None; 8];
        let own_elevation = field.elevation_at(pos);

        for direction in Direction::ALL {
            let check = pos + direction.offset();
            if !field.is_valid(check) {
                continue;
            }

            let difference = field.elevation_at(check) - own_elevation;
            levels[direction.index()] = if difference >= FULL_COVER_ELEVATION {
                CoverLevel::Full
            } else if difference >= PARTIAL_COVER_ELEVATION {
                CoverLevel::Partial
            } else {
                CoverLevel::None
            };
        }

        self.map.insert(pos, levels);
    }

    /// Refresh a cell and its eight neighbors (after an elevation change)
    pub fn update_around(&mut self, field: &GridField, pos: GridPosition) {
        self.update_position(field, pos);
        for neighbor in pos.all_neighbors() {
            self.update_position(field, neighbor);
        }
    }

    /// Cover at `pos` against an attack travelling along `attack_direction`
    /// (the quantized attacker-to-target direction). The shielding cell is
    /// the target's neighbor toward the attacker.
    pub fn cover_at(&self, pos: GridPosition, attack_direction: Direction) -> CoverLevel {
        self.map
            .get(&pos)
            .map(|levels| levels[attack_direction.opposite().index()])
            .unwrap_or(CoverLevel::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::field::GridConfig;

    fn flat_field() -> GridField {
        GridField::flat(GridConfig { radius: 5, bullseye_radius: 1, ..GridConfig::default() }).unwrap()
    }

    #[test]
    fn test_flat_ground_no_cover() {
        let field = flat_field();
        let cover = CoverMap::build(&field);
        for direction in Direction::ALL {
            assert_eq!(cover.cover_at(field.center(), direction), CoverLevel::None);
        }
    }

    #[test]
    fn test_partial_and_full_cover_thresholds() {
        let mut field = flat_field();
        let pos = field.center();
        let north = pos + Direction::North.offset();
        let east = pos + Direction::East.offset();

        field.change_elevation(north, PARTIAL_COVER_ELEVATION);
        field.change_elevation(east, FULL_COVER_ELEVATION);
        let cover = CoverMap::build(&field);

        // Attack direction South = attacker north of the target, shielded by
        // the northern wall; attack direction West = attacker to the east.
        assert_eq!(cover.cover_at(pos, Direction::South), CoverLevel::Partial);
        assert_eq!(cover.cover_at(pos, Direction::West), CoverLevel::Full);
        assert_eq!(cover.cover_at(pos, Direction::North), CoverLevel::None);
    }

    #[test]
    fn test_update_around_refreshes_neighbors() {
        let mut field = flat_field();
        let mut cover = CoverMap::build(&field);
        let pos = field.center();
        let south_neighbor = pos + Direction::South.offset();

        // Raise the center cell; the cell to its south is now shielded from
        // attackers standing beyond the raised center (attack direction South).
        field.change_elevation(pos, FULL_COVER_ELEVATION);
        cover.update_around(&field, pos);

        assert_eq!(cover.cover_at(south_neighbor, Direction::South), CoverLevel::Full);
    }

    #[test]
    fn test_direction_opposites() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }
}
