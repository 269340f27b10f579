//! Property tests for the geometric and pathfinding invariants

use proptest::prelude::*;

use ringfield::core::types::TeamId;
use ringfield::data::PlayerDef;
use ringfield::grid::field::{GridConfig, GridField};
use ringfield::grid::position::GridPosition;
use ringfield::pathfinding;
use ringfield::sight::VisibilityTracker;
use ringfield::stats::stat_block::Stats;
use ringfield::turn::TurnEngine;
use ringfield::unit::Unit;

fn flat_field(radius: i32) -> GridField {
    let bullseye = (radius / 4).max(1).min(radius - 1);
    GridField::flat(GridConfig { radius, bullseye_radius: bullseye, ..GridConfig::default() })
        .unwrap()
}

fn far_seer(team: TeamId, pos: GridPosition) -> Unit {
    let mut unit = Unit::from_player(
        team,
        &PlayerDef {
            name: "seer".to_string(),
            stats: Stats { perception: 60, ..Stats::default() },
            gear: Default::default(),
            abilities: vec![],
            perks: vec![],
        },
    );
    unit.position = pos;
    unit.in_arena = true;
    unit
}

proptest! {
    /// IsValid(p) <=> dx^2 + dz^2 <= (R + 0.5)^2 for offsets from the center
    #[test]
    fn validity_matches_circle(radius in 1i32..12, x in -5i32..30, z in -5i32..30) {
        let field = flat_field(radius);
        let pos = GridPosition::new(x, z);
        let dx = (x - radius) as f32;
        let dz = (z - radius) as f32;
        let side = radius * 2 + 1;
        let in_bounds = x >= 0 && z >= 0 && x < side && z < side;
        let in_circle = dx * dx + dz * dz <= (radius as f32 + 0.5) * (radius as f32 + 0.5);
        prop_assert_eq!(field.is_valid(pos), in_bounds && in_circle);
    }

    /// Any returned path starts at start, ends at end, steps cardinally, and
    /// never exceeds the budget.
    #[test]
    fn paths_are_well_formed(
        radius in 4i32..9,
        sx in 0i32..20, sz in 0i32..20,
        ex in 0i32..20, ez in 0i32..20,
        budget in 1i32..40,
    ) {
        let field = flat_field(radius);
        let start = GridPosition::new(sx, sz);
        let end = GridPosition::new(ex, ez);
        prop_assume!(field.is_valid(start) && field.is_valid(end));

        let team = TeamId::new();
        let units = vec![far_seer(team, start)];
        let mut visibility = VisibilityTracker::new(&[team]);
        visibility.recompute_team(team, &field, &units);

        if let Some((path, cost)) =
            pathfinding::find_path(&field, &visibility, &units, team, start, end, budget)
        {
            prop_assert_eq!(path.first(), Some(&start));
            prop_assert_eq!(path.last(), Some(&end));
            for window in path.windows(2) {
                prop_assert_eq!(window[0].manhattan_distance(&window[1]), 1);
                prop_assert!(field.is_valid(window[1]));
            }
            // Flat ground, no enemies: cost is pure distance within budget
            prop_assert!(cost <= budget);
            prop_assert!(cost >= start.manhattan_distance(&end));
        } else {
            // Unreachable only when the budget is genuinely too small
            prop_assert!(start != end);
        }
    }

    /// Reachability is monotone in the budget
    #[test]
    fn budget_is_monotone(
        ex in 0i32..16, ez in 0i32..16,
        budget in 1i32..30,
    ) {
        let field = flat_field(8);
        let start = field.center();
        let end = GridPosition::new(ex, ez);
        prop_assume!(field.is_valid(end));

        let team = TeamId::new();
        let units = vec![far_seer(team, start)];
        let mut visibility = VisibilityTracker::new(&[team]);
        visibility.recompute_team(team, &field, &units);

        let tight = pathfinding::has_path(&field, &visibility, &units, team, start, end, budget);
        let loose = pathfinding::has_path(&field, &visibility, &units, team, start, end, budget + 5);
        if tight {
            prop_assert!(loose);
        }
    }

    /// NextTurn parity over a two-team roster
    #[test]
    fn turn_rotation_parity(k in 0u32..64) {
        let home = TeamId::new();
        let away = TeamId::new();
        let mut engine = TurnEngine::new(vec![home, away]);
        for _ in 0..k {
            engine.next_turn();
        }
        let expected = if k % 2 == 0 { home } else { away };
        prop_assert_eq!(engine.current_team(), expected);
    }

    /// Opportunity attacks trigger exactly when the mover leaves threat range
    #[test]
    fn opportunity_trigger_rule(
        ex in -2i32..3, ez in -2i32..3,
        tx in -3i32..4, tz in -3i32..4,
    ) {
        let from = GridPosition::new(10, 10);
        let enemy_pos = from + GridPosition::new(ex, ez);
        let to = from + GridPosition::new(tx, tz);
        prop_assume!(enemy_pos != from);

        let mover_team = TeamId::new();
        let enemy_team = TeamId::new();
        let units = vec![far_seer(enemy_team, enemy_pos)];

        let triggered =
            pathfinding::opportunity_attacker(&units, mover_team, from, to).is_some();
        let expected = enemy_pos.is_adjacent(&from) && !enemy_pos.is_adjacent(&to);
        prop_assert_eq!(triggered, expected);
    }
}
