//! Greedy action selection for AI-controlled teams
//!
//! Every (action, target) pair gets a heuristic score; the selector takes the
//! best one. Deliberately thin - tactics live in the scores, not in search.

use crate::actions::ctx::{meets_requirements, valid_positions, ActionCtx};
use crate::actions::kind::ActionKind;
use crate::grid::position::GridPosition;
use crate::unit::Unit;

/// A scored candidate action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiAction {
    pub kind: ActionKind,
    pub target: GridPosition,
    pub score: i32,
}

/// Enemies a melee swing could reach from `pos`
fn melee_target_count_at(unit: &Unit, ctx: &ActionCtx, pos: GridPosition) -> i32 {
    ctx.units
        .iter()
        .filter(|u| {
            u.in_arena && u.team() != unit.team() && u.position != pos && u.position.is_adjacent(&pos)
        })
        .count() as i32
}

/// Heuristic value of taking `kind` at `target`
pub fn score(kind: ActionKind, unit: &Unit, ctx: &ActionCtx, target: GridPosition) -> i32 {
    match kind {
        ActionKind::Move => 10 + 2 * melee_target_count_at(unit, ctx, target),
        ActionKind::Melee => 200,
        ActionKind::Push => 200,
        ActionKind::Ranged => 150,
        ActionKind::Spawn => 100,
        ActionKind::Elevation => 10,
        ActionKind::Favor => 0,
        ActionKind::Special => 0,
    }
}

/// The best-scoring legal (action, target) pair for a unit, if any
pub fn best_action(unit: &Unit, ctx: &ActionCtx) -> Option<AiAction> {
    let mut best: Option<AiAction> = None;

    for instance in &unit.actions {
        let kind = instance.kind();
        if !unit.can_spend_action_points(kind) || !meets_requirements(kind, unit) {
            continue;
        }

        for target in valid_positions(kind, unit, ctx) {
            let candidate = AiAction {
                kind,
                target,
                score: score(kind, unit, ctx, target),
            };
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
    }

    best
}
