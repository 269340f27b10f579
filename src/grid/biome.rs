//! Biomes and terrain generation tables
//!
//! Each angular sector of the arena gets one biome at setup. A biome is a
//! cumulative-probability table over (terrain, elevation range) rows, sampled
//! once per cell when the grid is created.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::cell::TerrainType;

/// One row of a biome's terrain table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerrainProbability {
    pub terrain: TerrainType,
    /// Probability mass of this row; rows should sum to 1.0
    pub probability: f32,
    pub min_elevation: i32,
    pub max_elevation: i32,
}

/// Biome families assignable to arena sectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Grassland,
    Woodland,
    Highland,
    Arid,
    Arctic,
    Wetland,
    Volcanic,
}

impl Biome {
    pub const ALL: [Biome; 7] = [
        Biome::Grassland,
        Biome::Woodland,
        Biome::Highland,
        Biome::Arid,
        Biome::Arctic,
        Biome::Wetland,
        Biome::Volcanic,
    ];

    /// Terrain table for this biome. Rows sum to 1.0.
    pub fn terrain_table(&self) -> &'static [TerrainProbability] {
        match self {
            Biome::Grassland => &[
                TerrainProbability { terrain: TerrainType::Plain, probability: 0.5, min_elevation: 0, max_elevation: 1 },
                TerrainProbability { terrain: TerrainType::Meadow, probability: 0.3, min_elevation: 0, max_elevation: 1 },
                TerrainProbability { terrain: TerrainType::Savanna, probability: 0.2, min_elevation: 0, max_elevation: 2 },
            ],
            Biome::Woodland => &[
                TerrainProbability { terrain: TerrainType::Forest, probability: 0.55, min_elevation: 0, max_elevation: 2 },
                TerrainProbability { terrain: TerrainType::Taiga, probability: 0.25, min_elevation: 1, max_elevation: 3 },
                TerrainProbability { terrain: TerrainType::Meadow, probability: 0.2, min_elevation: 0, max_elevation: 1 },
            ],
            Biome::Highland => &[
                TerrainProbability { terrain: TerrainType::Hills, probability: 0.45, min_elevation: 2, max_elevation: 4 },
                TerrainProbability { terrain: TerrainType::Mountain, probability: 0.35, min_elevation: 4, max_elevation: 8 },
                TerrainProbability { terrain: TerrainType::Badlands, probability: 0.2, min_elevation: 1, max_elevation: 3 },
            ],
            Biome::Arid => &[
                TerrainProbability { terrain: TerrainType::Desert, probability: 0.5, min_elevation: 0, max_elevation: 2 },
                TerrainProbability { terrain: TerrainType::Sand, probability: 0.35, min_elevation: 0, max_elevation: 1 },
                TerrainProbability { terrain: TerrainType::Oasis, probability: 0.15, min_elevation: 0, max_elevation: 0 },
            ],
            Biome::Arctic => &[
                TerrainProbability { terrain: TerrainType::Snow, probability: 0.45, min_elevation: 0, max_elevation: 3 },
                TerrainProbability { terrain: TerrainType::Tundra, probability: 0.35, min_elevation: 0, max_elevation: 2 },
                TerrainProbability { terrain: TerrainType::Glacier, probability: 0.2, min_elevation: 2, max_elevation: 5 },
            ],
            Biome::Wetland => &[
                TerrainProbability { terrain: TerrainType::Swamp, probability: 0.4, min_elevation: 0, max_elevation: 0 },
                TerrainProbability { terrain: TerrainType::Marsh, probability: 0.3, min_elevation: 0, max_elevation: 0 },
                TerrainProbability { terrain: TerrainType::Water, probability: 0.2, min_elevation: 0, max_elevation: 0 },
                TerrainProbability { terrain: TerrainType::CoralReef, probability: 0.1, min_elevation: 0, max_elevation: 0 },
            ],
            Biome::Volcanic => &[
                TerrainProbability { terrain: TerrainType::LavaField, probability: 0.6, min_elevation: 0, max_elevation: 2 },
                TerrainProbability { terrain: TerrainType::Badlands, probability: 0.4, min_elevation: 1, max_elevation: 4 },
            ],
        }
    }

    /// Sample one (terrain, elevation) pair from this biome's table
    pub fn sample(&self, rng: &mut impl Rng) -> (TerrainType, i32) {
        let table = self.terrain_table();
        let point: f32 = rng.gen_range(0.0..1.0);

        let mut cumulative = 0.0;
        let mut chosen = table[table.len() - 1];
        for row in table {
            cumulative += row.probability;
            if point <= cumulative {
                chosen = *row;
                break;
            }
        }

        let elevation = rng.gen_range(chosen.min_elevation..=chosen.max_elevation);
        (chosen.terrain, elevation)
    }

    /// Pick a biome uniformly (sector assignment at setup)
    pub fn random(rng: &mut impl Rng) -> Biome {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
