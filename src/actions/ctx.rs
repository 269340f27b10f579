//! Action legality queries
//!
//! `valid_positions` is the single range/team/visibility/occupancy-aware
//! query behind both player input validation and AI scoring. Illegal targets
//! simply never appear in the list; callers treat absent targets as no-ops.

use crate::actions::kind::{ActionKind, ActionUsage};
use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::grid::zone::Zone;
use crate::pathfinding;
use crate::sight::{self, VisibilityTracker};
use crate::stats::modifiers;
use crate::unit::Unit;

/// Borrowed view of everything legality checks need
pub struct ActionCtx<'a> {
    pub field: &'a GridField,
    pub visibility: &'a VisibilityTracker,
    pub units: &'a [Unit],
    /// Spawn zones of the acting unit's team
    pub spawn_zones: &'a [Zone],
}

impl<'a> ActionCtx<'a> {
    fn unit_team_at(&self, pos: GridPosition) -> Option<&Unit> {
        let id = self.field.unit_at(pos)?;
        self.units.iter().find(|u| u.id == id)
    }
}

/// Does the action's usage domain match where the unit currently is?
pub fn is_applicable(kind: ActionKind, unit: &Unit) -> bool {
    match kind.usage() {
        ActionUsage::Both => true,
        ActionUsage::Arena => unit.in_arena,
        ActionUsage::Reserves => !unit.in_arena,
    }
}

/// Non-positional preconditions (the ultimate needs a full favor pool)
pub fn meets_requirements(kind: ActionKind, unit: &Unit) -> bool {
    match kind {
        ActionKind::Special => unit.favor().is_full(),
        _ => true,
    }
}

/// Every cell the action may legally target right now
pub fn valid_positions(kind: ActionKind, unit: &Unit, ctx: &ActionCtx) -> Vec<GridPosition> {
    if !is_applicable(kind, unit) {
        return Vec::new();
    }

    match kind {
        ActionKind::Move => move_positions(unit, ctx),
        ActionKind::Melee | ActionKind::Push => adjacent_enemy_positions(unit, ctx, 1),
        ActionKind::Ranged => ranged_positions(unit, ctx),
        ActionKind::Spawn => spawn_positions(ctx),
        ActionKind::Favor | ActionKind::Special => vec![unit.position],
        ActionKind::Elevation => elevation_positions(unit, ctx, 1),
    }
}

pub fn is_valid_target(kind: ActionKind, unit: &Unit, ctx: &ActionCtx, pos: GridPosition) -> bool {
    valid_positions(kind, unit, ctx).contains(&pos)
}

fn move_positions(unit: &Unit, ctx: &ActionCtx) -> Vec<GridPosition> {
    let mut valid = Vec::new();
    let move_distance = modifiers::move_speed(unit);
    let origin = unit.position;

    for dx in -move_distance..=move_distance {
        for dz in -move_distance..=move_distance {
            let test = origin + GridPosition::new(dx, dz);
            if !ctx.field.is_valid(test) || test == origin {
                continue;
            }
            if ctx.field.has_any_unit(test) {
                continue;
            }
            if !pathfinding::has_path(
                ctx.field,
                ctx.visibility,
                ctx.units,
                unit.team(),
                origin,
                test,
                move_distance,
            ) {
                continue;
            }
            valid.push(test);
        }
    }

    valid
}

fn adjacent_enemy_positions(unit: &Unit, ctx: &ActionCtx, range: i32) -> Vec<GridPosition> {
    let mut valid = Vec::new();
    let origin = unit.position;

    for dx in -range..=range {
        for dz in -range..=range {
            let test = origin + GridPosition::new(dx, dz);
            if !ctx.field.is_valid(test) {
                continue;
            }
            let Some(target) = ctx.unit_team_at(test) else {
                continue;
            };
            if target.team() == unit.team() {
                continue;
            }
            valid.push(test);
        }
    }

    valid
}

fn ranged_positions(unit: &Unit, ctx: &ActionCtx) -> Vec<GridPosition> {
    let mut valid = Vec::new();
    let range = modifiers::sight_distance(unit);
    let origin = unit.position;

    for dx in -range..=range {
        for dz in -range..=range {
            if dx * dx + dz * dz > range * range {
                continue;
            }
            let test = origin + GridPosition::new(dx, dz);
            if !ctx.field.is_valid(test) || test == origin {
                continue;
            }
            if !ctx.visibility.is_visible(unit.team(), test) {
                continue;
            }
            let Some(target) = ctx.unit_team_at(test) else {
                continue;
            };
            if target.team() == unit.team() {
                continue;
            }
            if !sight::has_line_of_sight(ctx.field, origin, test) {
                continue;
            }
            valid.push(test);
        }
    }

    valid
}

fn spawn_positions(ctx: &ActionCtx) -> Vec<GridPosition> {
    let mut valid = Vec::new();
    for zone in ctx.spawn_zones {
        for pos in zone.cells() {
            if ctx.field.is_valid(*pos) && !ctx.field.has_any_unit(*pos) {
                valid.push(*pos);
            }
        }
    }
    valid
}

fn elevation_positions(unit: &Unit, ctx: &ActionCtx, range: i32) -> Vec<GridPosition> {
    let mut valid = Vec::new();
    let origin = unit.position;

    for dx in -range..=range {
        for dz in -range..=range {
            let test = origin + GridPosition::new(dx, dz);
            if ctx.field.is_valid(test) {
                valid.push(test);
            }
        }
    }

    valid
}
