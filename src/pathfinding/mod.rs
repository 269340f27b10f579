//! A* pathfinding over the arena
//!
//! Movement is 4-connected. Edge cost = straight cost + terrain cost +
//! upward-climb cost; stepping where an opportunity attack would trigger adds
//! a large perceived-risk penalty that biases the search away without
//! forbidding the route. Every call allocates its own scratch grid, so
//! overlapping queries are safe.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::constants::{ELEVATION_CHANGE_COST, MOVE_STRAIGHT_COST, OPPORTUNITY_ATTACK_RISK};
use crate::core::types::{TeamId, UnitId};
use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::sight::VisibilityTracker;
use crate::unit::Unit;

/// Heap entry ordered as a min-heap on f-cost
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    pos: GridPosition,
    f_cost: i32,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-call scratch state for one cell
#[derive(Debug, Clone, Copy)]
struct ScratchNode {
    g_cost: i32,
    risk: i32,
    came_from: Option<GridPosition>,
    walkable: bool,
    closed: bool,
}

impl Default for ScratchNode {
    fn default() -> Self {
        Self {
            g_cost: i32::MAX,
            risk: 0,
            came_from: None,
            walkable: false,
            closed: false,
        }
    }
}

struct PathGrid {
    side: i32,
    nodes: Vec<ScratchNode>,
}

impl PathGrid {
    fn new(field: &GridField) -> Self {
        Self {
            side: field.side(),
            nodes: vec![ScratchNode::default(); (field.side() * field.side()) as usize],
        }
    }

    fn node(&self, pos: GridPosition) -> &ScratchNode {
        &self.nodes[(pos.x * self.side + pos.z) as usize]
    }

    fn node_mut(&mut self, pos: GridPosition) -> &mut ScratchNode {
        &mut self.nodes[(pos.x * self.side + pos.z) as usize]
    }
}

/// Would stepping `from -> to` provoke an opportunity attack against a unit
/// of `mover_team`? Any enemy 8-adjacent to `from` whose threat range does
/// not also contain `to` takes the swing.
pub fn opportunity_attacker(
    units: &[Unit],
    mover_team: TeamId,
    from: GridPosition,
    to: GridPosition,
) -> Option<UnitId> {
    units
        .iter()
        .find(|u| {
            u.in_arena
                && u.team() != mover_team
                && u.position != from
                && u.position.is_adjacent(&from)
                && !u.position.is_adjacent(&to)
        })
        .map(|u| u.id)
}

fn climb_cost(field: &GridField, from: GridPosition, to: GridPosition) -> i32 {
    let delta = field.elevation_at(to) - field.elevation_at(from);
    if delta <= 0 {
        // Descending is free
        0
    } else {
        delta * ELEVATION_CHANGE_COST
    }
}

/// Find the cheapest path within `max_budget` movement points.
///
/// Walkability is team-relative: occupied cells and cells outside the team's
/// current visibility are closed. Returns the waypoint list (start first) and
/// the total cost including perceived risk; None when no path fits.
pub fn find_path(
    field: &GridField,
    visibility: &VisibilityTracker,
    units: &[Unit],
    team: TeamId,
    start: GridPosition,
    end: GridPosition,
    max_budget: i32,
) -> Option<(Vec<GridPosition>, i32)> {
    if !field.is_valid(start) || !field.is_valid(end) {
        return None;
    }

    let mut grid = PathGrid::new(field);
    for pos in field.positions() {
        let node = grid.node_mut(pos);
        node.walkable = !field.has_any_unit(pos) && visibility.is_visible(team, pos);
    }

    let mut open = BinaryHeap::new();
    grid.node_mut(start).g_cost = 0;
    open.push(OpenNode {
        pos: start,
        f_cost: start.manhattan_distance(&end) * MOVE_STRAIGHT_COST,
    });

    while let Some(current) = open.pop() {
        if grid.node(current.pos).closed {
            continue;
        }
        grid.node_mut(current.pos).closed = true;

        if current.pos == end {
            let total = grid.node(end).g_cost + grid.node(end).risk;
            return Some((reconstruct(&grid, end), total));
        }

        let current_g = grid.node(current.pos).g_cost;

        for neighbor in current.pos.cardinal_neighbors() {
            if !field.is_valid(neighbor) {
                continue;
            }
            let state = *grid.node(neighbor);
            if state.closed || !state.walkable {
                continue;
            }

            let step = current.pos.manhattan_distance(&neighbor) * MOVE_STRAIGHT_COST;
            let terrain = field
                .terrain_at(neighbor)
                .map(|t| t.movement_cost())
                .unwrap_or(0);
            let tentative_g = current_g + step + terrain + climb_cost(field, current.pos, neighbor);

            if tentative_g > max_budget {
                continue;
            }

            let risk = if opportunity_attacker(units, team, current.pos, neighbor).is_some() {
                OPPORTUNITY_ATTACK_RISK
            } else {
                0
            };

            if tentative_g + risk < state.g_cost.saturating_add(state.risk) {
                let node = grid.node_mut(neighbor);
                node.g_cost = tentative_g;
                node.risk = risk;
                node.came_from = Some(current.pos);
                open.push(OpenNode {
                    pos: neighbor,
                    f_cost: tentative_g + risk + neighbor.manhattan_distance(&end) * MOVE_STRAIGHT_COST,
                });
            }
        }
    }

    None
}

fn reconstruct(grid: &PathGrid, end: GridPosition) -> Vec<GridPosition> {
    let mut path = vec![end];
    let mut current = end;
    while let Some(prev) = grid.node(current).came_from {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Is `end` reachable within the budget?
pub fn has_path(
    field: &GridField,
    visibility: &VisibilityTracker,
    units: &[Unit],
    team: TeamId,
    start: GridPosition,
    end: GridPosition,
    max_budget: i32,
) -> bool {
    find_path(field, visibility, units, team, start, end, max_budget).is_some()
}

/// Total path cost, or 0 when unreachable
pub fn path_length(
    field: &GridField,
    visibility: &VisibilityTracker,
    units: &[Unit],
    team: TeamId,
    start: GridPosition,
    end: GridPosition,
    max_budget: i32,
) -> i32 {
    find_path(field, visibility, units, team, start, end, max_budget)
        .map(|(_, cost)| cost)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;
    use crate::data::PlayerDef;
    use crate::grid::field::GridConfig;
    use crate::stats::stat_block::Stats;

    fn flat_field() -> GridField {
        GridField::flat(GridConfig { radius: 8, bullseye_radius: 2, ..GridConfig::default() })
            .unwrap()
    }

    fn make_unit(team: TeamId, pos: GridPosition) -> Unit {
        let mut unit = Unit::from_player(
            team,
            &PlayerDef {
                name: "walker".to_string(),
                stats: Stats { perception: 20, ..Stats::default() },
                gear: Default::default(),
                abilities: vec![],
                perks: vec![],
            },
        );
        unit.position = pos;
        unit.in_arena = true;
        unit
    }

    /// Tracker with the whole arena visible to `team`
    fn all_visible(field: &GridField, team: TeamId, units: &[Unit]) -> VisibilityTracker {
        let mut tracker = VisibilityTracker::new(&[team]);
        tracker.recompute_team(team, field, units);
        tracker
    }

    #[test]
    fn test_straight_path_endpoints_and_cost() {
        let field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let units = vec![make_unit(team, start)];
        let visibility = all_visible(&field, team, &units);
        let end = start + GridPosition::new(4, 0);

        let (path, cost) =
            find_path(&field, &visibility, &units, team, start, end, 20).unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        assert_eq!(cost, 4);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_budget_cutoff() {
        let field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let units = vec![make_unit(team, start)];
        let visibility = all_visible(&field, team, &units);
        let end = start + GridPosition::new(4, 0);

        assert!(has_path(&field, &visibility, &units, team, start, end, 4));
        assert!(!has_path(&field, &visibility, &units, team, start, end, 3));
    }

    #[test]
    fn test_occupied_cells_block() {
        let mut field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let mover = make_unit(team, start);

        // Wall of units across the whole column x = start.x + 1
        let blocker_team = TeamId::new();
        let mut units = vec![mover];
        for z in 0..field.side() {
            let pos = GridPosition::new(start.x + 1, z);
            if field.is_valid(pos) {
                let blocker = make_unit(blocker_team, pos);
                field.add_unit(pos, blocker.id);
                units.push(blocker);
            }
        }

        let mut visibility = VisibilityTracker::new(&[team]);
        visibility.recompute_team(team, &field, &units[..1]);

        let end = start + GridPosition::new(2, 0);
        assert!(!has_path(&field, &visibility, &units, team, start, end, 100));
    }

    #[test]
    fn test_fogged_cells_are_closed() {
        let field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let units = vec![make_unit(team, start)];

        // Empty visibility: nothing can be pathed to
        let visibility = VisibilityTracker::new(&[team]);
        let end = start + GridPosition::new(1, 0);
        assert!(!has_path(&field, &visibility, &units, team, start, end, 10));
    }

    #[test]
    fn test_climb_costs_only_upward() {
        let mut field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let end = start + GridPosition::new(2, 0);
        let hill = start + GridPosition::new(1, 0);
        field.change_elevation(hill, 1);

        let units = vec![make_unit(team, start)];
        let visibility = all_visible(&field, team, &units);

        // 2 steps + 1 climb; the descent off the hill is free, so going
        // straight over (cost 3) still beats the flat detour (cost 4).
        let (path, cost) = find_path(&field, &visibility, &units, team, start, end, 20).unwrap();
        assert_eq!(cost, 3);
        assert!(path.contains(&hill));
    }

    #[test]
    fn test_detour_around_expensive_climb() {
        let mut field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let end = start + GridPosition::new(2, 0);
        // A towering spike on the direct route
        field.change_elevation(start + GridPosition::new(1, 0), 50);

        let units = vec![make_unit(team, start)];
        let visibility = all_visible(&field, team, &units);

        let (path, cost) = find_path(&field, &visibility, &units, team, start, end, 20).unwrap();
        assert_eq!(cost, 4, "two over, one down, one back up is cheaper");
        assert!(!path.contains(&(start + GridPosition::new(1, 0))));
    }

    #[test]
    fn test_opportunity_attack_trigger_rule() {
        let team = TeamId::new();
        let enemy_team = TeamId::new();
        let from = GridPosition::new(8, 8);
        let enemy = make_unit(enemy_team, GridPosition::new(8, 9));
        let units = vec![make_unit(team, from), enemy.clone()];

        // Stepping out of threat range triggers
        assert_eq!(
            opportunity_attacker(&units, team, from, GridPosition::new(8, 7)),
            Some(enemy.id)
        );
        // Staying adjacent to the enemy does not
        assert_eq!(
            opportunity_attacker(&units, team, from, GridPosition::new(9, 9)),
            None
        );
        // Allies never trigger
        assert_eq!(
            opportunity_attacker(&units, enemy_team, from, GridPosition::new(8, 7)),
            None
        );
    }

    #[test]
    fn test_risk_biases_but_does_not_forbid() {
        let mut field = flat_field();
        let team = TeamId::new();
        let enemy_team = TeamId::new();
        let start = field.center();
        let end = start + GridPosition::new(4, 0);

        // Enemy adjacent to the direct route's second cell
        let enemy_pos = start + GridPosition::new(2, 1);
        let enemy = make_unit(enemy_team, enemy_pos);
        field.add_unit(enemy_pos, enemy.id);
        let units = vec![make_unit(team, start), enemy];
        let visibility = all_visible(&field, team, &units[..1]);

        let (path, _) = find_path(&field, &visibility, &units, team, start, end, 50).unwrap();

        // The path should swing wide of the enemy's threat range rather than
        // walk through it.
        let provoked = path.windows(2).any(|w| {
            opportunity_attacker(&units, team, w[0], w[1]).is_some()
        });
        assert!(!provoked, "path {:?} provokes an opportunity attack", path);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
    }

    #[test]
    fn test_deterministic_for_fixed_snapshot() {
        let field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let units = vec![make_unit(team, start)];
        let visibility = all_visible(&field, team, &units);
        let end = start + GridPosition::new(3, 3);

        let a = find_path(&field, &visibility, &units, team, start, end, 30);
        let b = find_path(&field, &visibility, &units, team, start, end, 30);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unreachable_reports_zero_length() {
        let field = flat_field();
        let team = TeamId::new();
        let start = field.center();
        let units = vec![make_unit(team, start)];
        let visibility = VisibilityTracker::new(&[team]);

        assert_eq!(
            path_length(&field, &visibility, &units, team, start, start + GridPosition::new(2, 0), 10),
            0
        );
    }
}
