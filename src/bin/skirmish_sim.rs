//! Headless skirmish simulation
//!
//! Runs a full AI-vs-AI match on a generated arena and prints the event
//! stream summary. Useful for balance passes and smoke-testing the core
//! without any frontend.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ringfield::core::error::Result;
use ringfield::data::loader;
use ringfield::events::GameEvent;
use ringfield::grid::field::GridConfig;
use ringfield::grid::zone::CellRect;
use ringfield::skirmish::{SkirmishConfig, SkirmishState, TeamSetup};

#[derive(Parser, Debug)]
#[command(name = "skirmish_sim", about = "Run a headless ringfield skirmish")]
struct Args {
    /// RNG seed for arena generation and dice
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of team turns to simulate
    #[arg(long, default_value_t = 20)]
    turns: u32,

    /// Arena radius in cells
    #[arg(long, default_value_t = 15)]
    radius: i32,

    /// Optional directory containing home.toml and away.toml team files
    #[arg(long)]
    teams: Option<std::path::PathBuf>,

    /// Write a JSON snapshot of the final state to this path
    #[arg(long)]
    dump: Option<std::path::PathBuf>,
}

#[derive(serde::Serialize)]
struct UnitSnapshot {
    name: String,
    in_arena: bool,
    energy: i32,
    max_energy: i32,
    favor: i32,
    position: ringfield::grid::position::GridPosition,
}

#[derive(serde::Serialize)]
struct TeamSnapshot {
    name: String,
    energy: i32,
    favor: i32,
    territory: i32,
    units: Vec<UnitSnapshot>,
}

fn snapshot(state: &SkirmishState) -> Vec<TeamSnapshot> {
    state
        .turn
        .teams()
        .iter()
        .map(|&team| TeamSnapshot {
            name: state.team_name(team).to_string(),
            energy: state.team_energy(team).map(|p| p.amount).unwrap_or(0),
            favor: state.team_favor(team).map(|p| p.amount).unwrap_or(0),
            territory: state.territory.score(team),
            units: state
                .units()
                .iter()
                .filter(|u| u.team() == team)
                .map(|u| UnitSnapshot {
                    name: u.name.clone(),
                    in_arena: u.in_arena,
                    energy: u.energy().current(),
                    max_energy: u.energy().max(),
                    favor: u.favor().current(),
                    position: u.position,
                })
                .collect(),
        })
        .collect()
}

const HOME_TOML: &str = r#"
    name = "Harbor Wardens"

    [[players]]
    name = "Brakka"
    abilities = ["Move", "Melee", "Push", "Spawn"]
    perks = ["BattleHardened"]
    [players.stats]
    might = 4
    endurance = 3
    agility = 1
    intelligence = 0
    perception = 2
    charisma = 1
    [players.gear.weapon]
    name = "Boarding Axe"
    slot = "Weapon"
    physical_attack_bonus = 2

    [[players]]
    name = "Sel"
    abilities = ["Move", "Ranged", "Favor", "Special", "Spawn"]
    perks = ["EagleEye"]
    [players.stats]
    might = 1
    endurance = 1
    agility = 3
    intelligence = 2
    perception = 4
    charisma = 2

    [[players]]
    name = "Odo"
    abilities = ["Move", "Melee", "Elevation", "Spawn"]
    perks = ["DivineIntervention"]
    [players.stats]
    might = 2
    endurance = 4
    agility = 1
    intelligence = 1
    perception = 1
    charisma = 0
"#;

const AWAY_TOML: &str = r#"
    name = "Gloom Pact"

    [[players]]
    name = "Vex"
    abilities = ["Move", "Melee", "Spawn"]
    perks = ["Lightfoot"]
    [players.stats]
    might = 3
    endurance = 2
    agility = 4
    intelligence = 0
    perception = 2
    charisma = 1

    [[players]]
    name = "Mire"
    abilities = ["Move", "Ranged", "Favor", "Spawn"]
    perks = ["AlertCounter"]
    [players.stats]
    might = 1
    endurance = 2
    agility = 2
    intelligence = 3
    perception = 3
    charisma = 2

    [[players]]
    name = "Hult"
    abilities = ["Move", "Melee", "Push", "Spawn"]
    perks = ["EnhancedHealing"]
    [players.stats]
    might = 4
    endurance = 4
    agility = 0
    intelligence = 0
    perception = 1
    charisma = 0
"#;

fn load_teams(args: &Args) -> Result<(TeamSetup, TeamSetup, i32)> {
    let radius = args.radius;
    let (home_def, away_def) = match &args.teams {
        Some(dir) => (
            loader::team_from_file(&dir.join("home.toml"))?,
            loader::team_from_file(&dir.join("away.toml"))?,
        ),
        None => (loader::team_from_str(HOME_TOML)?, loader::team_from_str(AWAY_TOML)?),
    };

    // Spawn zones hug the west and east edges of the circle
    let home = TeamSetup {
        def: home_def,
        spawn_zones: vec![CellRect::new(2, radius - 2, 2, 4)],
    };
    let away = TeamSetup {
        def: away_def,
        spawn_zones: vec![CellRect::new(radius * 2 - 3, radius - 2, 2, 4)],
    };
    Ok((home, away, radius))
}

/// Let every unit of the current team act greedily until it runs dry
fn play_team_turn(state: &mut SkirmishState) {
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
                let events = state.run_until_idle(2_000);
                for record in &events.events {
                    match &record.event {
                        GameEvent::AttackHit { damage, .. } => {
                            info!(damage, "attack connected")
                        }
                        GameEvent::UnitOutOfEnergy { .. } => info!("a unit fell"),
                        GameEvent::TerritoryOwnerChanged { zone, .. } => {
                            info!(zone, "territory changed hands")
                        }
                        _ => {}
                    }
                }
                acted = true;
            }
        }
        if !acted {
            break;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let (home, away, radius) = load_teams(&args)?;

    let config = SkirmishConfig {
        grid: GridConfig { radius, ..GridConfig::default() },
        seed: args.seed,
        ..SkirmishConfig::default()
    };

    let home_name = home.def.name.clone();
    let away_name = away.def.name.clone();
    let mut state = SkirmishState::new(config, home, away)?;

    println!("=== {} vs {} (seed {}) ===", home_name, away_name, args.seed);

    for _ in 0..args.turns {
        play_team_turn(&mut state);
        let events = state.next_turn();
        for record in &events.events {
            if let GameEvent::TurnChanged { turn, .. } = record.event {
                info!(turn, "turn changed");
            }
        }
    }

    println!("--- after {} turns ({} ticks) ---", args.turns, state.tick_count());
    for &team in state.turn.teams().iter() {
        let energy = state.team_energy(team).map(|p| p.amount).unwrap_or(0);
        let favor = state.team_favor(team).map(|p| p.amount).unwrap_or(0);
        println!(
            "{:<16} energy {:>5}  favor {:>2}  territory {:>2}",
            state.team_name(team),
            energy,
            favor,
            state.territory.score(team),
        );
        for unit in state.units().iter().filter(|u| u.team() == team) {
            println!(
                "  {:<12} {}  energy {}/{}",
                unit.name,
                if unit.in_arena { "arena  " } else { "reserve" },
                unit.energy().current(),
                unit.energy().max(),
            );
        }
    }

    if let Some(path) = &args.dump {
        let json = serde_json::to_string_pretty(&snapshot(&state))?;
        std::fs::write(path, json)?;
        println!("snapshot written to {}", path.display());
    }

    Ok(())
}
