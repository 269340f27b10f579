//! Per-team fog of war
//!
//! Each team tracks the set of cells it can currently see plus a last-known
//! memory of terrain and elevation for cells it has seen before. Sight is
//! blocked by elevation along a Bresenham line, with an extra rule for
//! shoulder-high diagonal walls.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::core::constants::LOS_ELEVATION_THRESHOLD_STEPS;
use crate::core::constants::DIAGONAL_OBSTRUCTION_MARGIN;
use crate::core::types::TeamId;
use crate::grid::cell::TerrainType;
use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::stats::modifiers;
use crate::unit::Unit;

/// Fog-of-war memory for one team
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamVisibility {
    /// Cells currently in sight of any team unit
    pub visible: AHashSet<GridPosition>,
    /// Last observed elevation per cell; persists after sight is lost
    pub known_elevation: AHashMap<GridPosition, i32>,
    /// Last observed terrain per cell
    pub known_terrain: AHashMap<GridPosition, TerrainType>,
}

/// Visibility state for every team in the match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisibilityTracker {
    teams: AHashMap<TeamId, TeamVisibility>,
}

impl VisibilityTracker {
    pub fn new(team_ids: &[TeamId]) -> Self {
        let mut teams = AHashMap::new();
        for id in team_ids {
            teams.insert(*id, TeamVisibility::default());
        }
        Self { teams }
    }

    pub fn is_visible(&self, team: TeamId, pos: GridPosition) -> bool {
        self.teams
            .get(&team)
            .map(|v| v.visible.contains(&pos))
            .unwrap_or(false)
    }

    /// Last-known elevation; -1 when the team has never seen the cell
    pub fn known_elevation(&self, team: TeamId, pos: GridPosition) -> i32 {
        self.teams
            .get(&team)
            .and_then(|v| v.known_elevation.get(&pos).copied())
            .unwrap_or(-1)
    }

    pub fn known_terrain(&self, team: TeamId, pos: GridPosition) -> Option<TerrainType> {
        self.teams
            .get(&team)
            .and_then(|v| v.known_terrain.get(&pos).copied())
    }

    pub fn team(&self, team: TeamId) -> Option<&TeamVisibility> {
        self.teams.get(&team)
    }

    /// Recompute a team's visible set from its in-arena units' sight radii.
    /// Cells leaving the set keep their last-known memory untouched.
    pub fn recompute_team(&mut self, team: TeamId, field: &GridField, units: &[Unit]) {
        let mut visible = AHashSet::new();
        let mut observed: Vec<GridPosition> = Vec::new();

        for unit in units {
            if unit.team() != team || !unit.in_arena {
                continue;
            }

            let radius = modifiers::sight_distance(unit);
            let origin = unit.position;
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    let check = GridPosition::new(origin.x + dx, origin.z + dz);
                    if !field.is_valid(check) {
                        continue;
                    }
                    if dx * dx + dz * dz > radius * radius {
                        continue;
                    }
                    if visible.contains(&check) {
                        continue;
                    }
                    if has_line_of_sight(field, origin, check) {
                        visible.insert(check);
                        observed.push(check);
                    }
                }
            }
        }

        let entry = self.teams.entry(team).or_default();
        for pos in observed {
            entry.known_elevation.insert(pos, field.elevation_at(pos));
            if let Some(terrain) = field.terrain_at(pos) {
                entry.known_terrain.insert(pos, terrain);
            }
        }
        entry.visible = visible;
    }
}

/// Can `from` see `to`? Walks the Bresenham line; a cell blocks when its
/// elevation rises above the interpolated sightline by more than the
/// threshold, or when a diagonal sightline passes a shoulder-high gap.
pub fn has_line_of_sight(field: &GridField, from: GridPosition, to: GridPosition) -> bool {
    let start_elevation = field.elevation_at(from);
    let end_elevation = field.elevation_at(to);

    for pos in from.line_to(&to) {
        if !field.is_valid(pos) {
            continue;
        }
        let cell_elevation = field.elevation_at(pos);
        if elevation_blocks_sight(
            field,
            start_elevation,
            end_elevation,
            cell_elevation,
            pos,
            from,
            to,
        ) {
            return false;
        }
    }

    true
}

fn elevation_blocks_sight(
    field: &GridField,
    start_elevation: i32,
    end_elevation: i32,
    cell_elevation: i32,
    cell: GridPosition,
    from: GridPosition,
    to: GridPosition,
) -> bool {
    let total = ((from.distance_squared(&to)) as f32).sqrt();
    let travelled = ((from.distance_squared(&cell)) as f32).sqrt();
    let t = if total > 0.0 { travelled / total } else { 0.0 };
    let sightline = start_elevation as f32 + (end_elevation - start_elevation) as f32 * t;
    let threshold = field.elevation_scale_factor() * LOS_ELEVATION_THRESHOLD_STEPS;

    if cell_elevation as f32 > sightline + threshold {
        return true;
    }

    // Diagonal sightlines can be blocked by a pair of flanking cells even
    // when the cell on the line itself is low.
    if from.x != to.x && from.z != to.z && diagonal_obstructed(field, from, cell, start_elevation) {
        return true;
    }

    false
}

fn diagonal_obstructed(
    field: &GridField,
    from: GridPosition,
    diagonal: GridPosition,
    observer_elevation: i32,
) -> bool {
    let diagonal_elevation = field.elevation_at(diagonal);

    let flank_a = GridPosition::new(diagonal.x, from.z);
    let flank_b = GridPosition::new(from.x, diagonal.z);

    let elevation_a = if field.is_valid(flank_a) {
        field.elevation_at(flank_a)
    } else {
        i32::MIN
    };
    let elevation_b = if field.is_valid(flank_b) {
        field.elevation_at(flank_b)
    } else {
        i32::MIN
    };

    let margin = DIAGONAL_OBSTRUCTION_MARGIN;
    let both_flanks_above_gap = elevation_a > diagonal_elevation + margin
        && elevation_b > diagonal_elevation + margin;
    let observer_below_flanks =
        observer_elevation + margin < elevation_a && observer_elevation + margin < elevation_b;

    both_flanks_above_gap && observer_below_flanks
}
