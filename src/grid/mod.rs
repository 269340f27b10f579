//! Circular arena grid - cells, terrain generation, cover, reserves
//!
//! The arena is a circle of cells on an integer lattice. Elevation shapes
//! movement cost, line of sight, and cover; biomes are assigned per angular
//! sector at generation time.

pub mod biome;
pub mod cell;
pub mod cover;
pub mod field;
pub mod position;
pub mod reserve;
pub mod zone;

pub use biome::{Biome, TerrainProbability};
pub use cell::{GridCell, InteractableId, TerrainType};
pub use cover::{CoverLevel, CoverMap, Direction};
pub use field::{GridConfig, GridField};
pub use position::GridPosition;
pub use reserve::ReserveGrid;
pub use zone::{CellRect, Zone};
