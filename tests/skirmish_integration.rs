//! End-to-end skirmish tests driving the public API only

use ringfield::actions::ActionKind;
use ringfield::core::constants::{ACTION_POINTS_MAX, TEAM_ENERGY_MAX};
use ringfield::data::{loader, PlayerDef, TeamDef};
use ringfield::events::GameEvent;
use ringfield::grid::field::GridConfig;
use ringfield::grid::position::GridPosition;
use ringfield::grid::zone::CellRect;
use ringfield::skirmish::{SkirmishConfig, SkirmishState, TeamSetup};
use ringfield::stats::stat_block::Stats;

fn roster(name: &str, count: usize) -> TeamDef {
    let players = (0..count)
        .map(|i| PlayerDef {
            name: format!("{}-{}", name, i),
            stats: Stats {
                might: 3,
                endurance: 3,
                agility: 2,
                intelligence: 1,
                perception: 2,
                charisma: 1,
            },
            gear: Default::default(),
            abilities: vec![
                "Move".to_string(),
                "Melee".to_string(),
                "Ranged".to_string(),
                "Favor".to_string(),
                "Spawn".to_string(),
            ],
            perks: vec!["Lightfoot".to_string()],
        })
        .collect();
    TeamDef { name: name.to_string(), players }
}

fn build(seed: u64) -> SkirmishState {
    let radius = 10;
    let config = SkirmishConfig {
        grid: GridConfig { radius, bullseye_radius: 2, ..GridConfig::default() },
        seed,
        ..SkirmishConfig::default()
    };
    let home = TeamSetup {
        def: roster("wardens", 3),
        spawn_zones: vec![CellRect::new(3, radius - 1, 2, 3)],
    };
    let away = TeamSetup {
        def: roster("pact", 3),
        spawn_zones: vec![CellRect::new(radius * 2 - 4, radius - 1, 2, 3)],
    };
    SkirmishState::new(config, home, away).unwrap()
}

/// Run one AI-driven team turn to exhaustion
fn play_turn(state: &mut SkirmishState) {
    let team = state.turn.current_team();
    let unit_ids: Vec<_> = state
        .units()
        .iter()
        .filter(|u| u.team() == team)
        .map(|u| u.id)
        .collect();

    loop {
        let mut acted = false;
        for unit_id in &unit_ids {
            let Some(choice) = state.best_ai_action(*unit_id) else {
                continue;
            };
            if state.try_take_action(*unit_id, choice.kind, choice.target).is_some() {
                state.run_until_idle(5_000);
                acted = true;
            }
        }
        if !acted {
            break;
        }
    }
}

fn assert_world_invariants(state: &SkirmishState) {
    for unit in state.units() {
        if unit.in_arena {
            assert!(state.field.is_valid(unit.position), "unit off the arena");
            assert_eq!(
                state.field.unit_at(unit.position),
                Some(unit.id),
                "occupancy out of sync for {}",
                unit.name
            );
        } else {
            assert!(
                state.reserve(unit.team()).unwrap().position_of(unit.id).is_some(),
                "benched unit missing from reserve"
            );
        }
        assert!(unit.energy().current() >= 0);
        assert!(unit.energy().current() <= unit.energy().max());
        assert!(unit.action_points() >= 0);
    }

    // No cell hosts two units
    for pos in state.field.positions() {
        let occupants = state.field.cell(pos).map(|c| c.units.len()).unwrap_or(0);
        assert!(occupants <= 1, "cell {} has {} occupants", pos, occupants);
    }
}

#[test]
fn full_ai_match_holds_invariants() {
    let mut state = build(42);

    for _ in 0..12 {
        play_turn(&mut state);
        assert!(state.is_idle());
        assert_world_invariants(&state);
        state.next_turn();
    }

    // Something actually happened
    assert!(state.units().iter().any(|u| u.in_arena));
    assert!(state.tick_count() > 0);
    for &team in state.turn.teams() {
        assert!(state.team_energy(team).unwrap().amount <= TEAM_ENERGY_MAX);
    }
}

#[test]
fn matches_are_deterministic_for_a_seed() {
    let mut a = build(7);
    let mut b = build(7);

    for _ in 0..6 {
        play_turn(&mut a);
        a.next_turn();
        play_turn(&mut b);
        b.next_turn();
    }

    let summarize = |state: &SkirmishState| {
        let mut rows: Vec<(String, bool, i32, GridPosition)> = state
            .units()
            .iter()
            .map(|u| (u.name.clone(), u.in_arena, u.energy().current(), u.position))
            .collect();
        rows.sort();
        rows
    };
    assert_eq!(summarize(&a), summarize(&b));
    assert_eq!(a.tick_count(), b.tick_count());
}

#[test]
fn spawning_grants_sight_and_territory() {
    let radius = 10;
    let config = SkirmishConfig {
        grid: GridConfig { radius, bullseye_radius: 2, ..GridConfig::default() },
        seed: 3,
        ..SkirmishConfig::default()
    };
    let home = TeamSetup {
        def: roster("wardens", 1),
        spawn_zones: vec![CellRect::new(radius, radius, 1, 1)],
    };
    let away = TeamSetup {
        def: roster("pact", 1),
        spawn_zones: vec![CellRect::new(radius * 2 - 3, radius, 1, 1)],
    };
    let mut state = SkirmishState::with_flat_arena(config, home, away).unwrap();

    let home_team = state.turn.teams()[0];
    let away_team = state.turn.teams()[1];
    let spawner = state
        .units()
        .iter()
        .find(|u| u.team() == home_team)
        .unwrap()
        .id;

    let spawn_cell = GridPosition::new(radius, radius);
    assert!(state
        .try_take_action(spawner, ActionKind::Spawn, spawn_cell)
        .is_some());
    let log = state.run_until_idle(100);

    assert!(log.contains(|e| matches!(e, GameEvent::UnitSpawned { .. })));
    assert!(log.contains(|e| matches!(e, GameEvent::TerritoryOwnerChanged { .. })));
    assert!(log.contains(|e| matches!(e, GameEvent::TeamVisibilityChanged { .. })));

    // The spawner's team sees its cell; the away team sees nothing yet
    assert!(state.visibility.is_visible(home_team, spawn_cell));
    assert!(!state.visibility.is_visible(away_team, spawn_cell));

    // Controlled territory scores on the turn change
    state.next_turn();
    assert!(state.territory.score(home_team) > 0);
    assert_eq!(state.territory.score(away_team), 0);
}

#[test]
fn team_definitions_round_trip_through_toml() {
    let def = roster("serialized", 2);
    let toml_text = toml::to_string(&def).unwrap();
    let parsed = loader::team_from_str(&toml_text).unwrap();
    assert_eq!(parsed.name, def.name);
    assert_eq!(parsed.players.len(), def.players.len());
    assert_eq!(parsed.players[0].abilities, def.players[0].abilities);
}

#[test]
fn action_points_reset_exactly_on_own_turn() {
    let mut state = build(11);
    let home_team = state.turn.teams()[0];

    // Spend home's points
    play_turn(&mut state);
    let spent: Vec<_> = state
        .units()
        .iter()
        .filter(|u| u.team() == home_team && u.action_points() < ACTION_POINTS_MAX)
        .map(|u| u.id)
        .collect();
    assert!(!spent.is_empty(), "the AI should have spent something");

    // Away's turn: home stays spent
    state.next_turn();
    for id in &spent {
        assert!(state.unit(*id).unwrap().action_points() < ACTION_POINTS_MAX);
    }

    // Back to home: in-arena units are refreshed
    play_turn(&mut state);
    state.next_turn();
    for unit in state.units().iter().filter(|u| u.team() == home_team) {
        if unit.in_arena {
            assert_eq!(unit.action_points(), ACTION_POINTS_MAX);
        }
    }
}
