//! Terrain types and per-cell state

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::types::UnitId;

/// Terrain variants, grouped by the biome families that produce them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    // Grassland and open country
    Plain,
    Meadow,
    Savanna,

    // Woodland
    Forest,
    Taiga,

    // Highland
    Mountain,
    Hills,
    Badlands,

    // Arid
    Desert,
    Sand,
    Oasis,

    // Cold
    Tundra,
    Glacier,
    Snow,

    // Water and wetlands
    Water,
    Swamp,
    Marsh,
    CoralReef,

    // Volcanic
    LavaField,
}

impl TerrainType {
    /// Extra movement cost on top of the straight-move cost.
    ///
    /// Currently uniform; the table exists so terrain can be priced later.
    pub fn movement_cost(&self) -> i32 {
        0
    }

    /// Attack-roll modifier for a target standing on this terrain.
    pub fn attack_modifier(&self) -> i32 {
        0
    }
}

/// Identifier for an interactable object occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractableId(pub Uuid);

impl InteractableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InteractableId {
    fn default() -> Self {
        Self::new()
    }
}

/// A single cell of the arena grid
///
/// Occupancy is a list; action legality keeps it to one unit in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    pub terrain: TerrainType,
    pub elevation: i32,
    pub units: Vec<UnitId>,
    pub interactable: Option<InteractableId>,
}

impl GridCell {
    pub fn new(terrain: TerrainType, elevation: i32) -> Self {
        Self {
            terrain,
            elevation,
            units: Vec::new(),
            interactable: None,
        }
    }

    pub fn add_unit(&mut self, unit: UnitId) {
        self.units.push(unit);
    }

    pub fn remove_unit(&mut self, unit: UnitId) {
        self.units.retain(|u| *u != unit);
    }

    pub fn has_any_unit(&self) -> bool {
        !self.units.is_empty()
    }

    /// First occupant, if any
    pub fn unit(&self) -> Option<UnitId> {
        self.units.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_occupancy() {
        let mut cell = GridCell::new(TerrainType::Plain, 0);
        assert!(!cell.has_any_unit());

        let unit = UnitId::new();
        cell.add_unit(unit);
        assert!(cell.has_any_unit());
        assert_eq!(cell.unit(), Some(unit));

        cell.remove_unit(unit);
        assert!(!cell.has_any_unit());
        assert_eq!(cell.unit(), None);
    }

    #[test]
    fn test_remove_only_named_unit() {
        let mut cell = GridCell::new(TerrainType::Forest, 2);
        let a = UnitId::new();
        let b = UnitId::new();
        cell.add_unit(a);
        cell.add_unit(b);

        cell.remove_unit(a);
        assert_eq!(cell.unit(), Some(b));
    }

    #[test]
    fn test_interactable_slot() {
        let mut cell = GridCell::new(TerrainType::Plain, 0);
        assert!(cell.interactable.is_none());

        let id = InteractableId::new();
        cell.interactable = Some(id);
        assert_eq!(cell.interactable, Some(id));
    }
}
