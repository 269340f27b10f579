//! Territory control - sector zones scored by drawn cards
//!
//! Each arena sector (bullseye included) is a territory zone tied to one card
//! drawn from a shuffled deck; the card's rank sets the zone's per-turn point
//! value. A zone is owned by the sole team with units inside it, neutral when
//! empty or contested. Ownership is recomputed on every unit-moved or
//! unit-spawned notification; points are awarded on turn changes.

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::TERRITORY_SCORE_MAX;
use crate::core::types::{TeamId, Tick};
use crate::events::{EventLog, GameEvent};
use crate::grid::field::GridField;
use crate::grid::position::GridPosition;
use crate::grid::zone::Zone;
use crate::unit::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];
}

/// One playing card. Ranks run 2..=14; 11-13 are the face cards, 14 the ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    /// Points the card's zone awards per controlled turn
    pub fn points(&self) -> i32 {
        match self.rank {
            14 => 3,
            11..=13 => 2,
            _ => 1,
        }
    }
}

/// A standard 52-card deck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in 2..=14 {
                cards.push(Card { suit, rank });
            }
        }
        Self { cards }
    }

    pub fn shuffle(&mut self, rng: &mut impl Rng) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Per-team territory score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TerritoryScore {
    pub amount: i32,
    pub max: i32,
}

impl TerritoryScore {
    pub fn normalized(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.amount as f32 / self.max as f32
    }
}

/// One scored region of cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryZone {
    pub sector: u32,
    pub card: Card,
    pub owner: Option<TeamId>,
    zone: Zone,
}

impl TerritoryZone {
    pub fn contains(&self, pos: GridPosition) -> bool {
        self.zone.contains(pos)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritorySystem {
    zones: Vec<TerritoryZone>,
    scores: AHashMap<TeamId, TerritoryScore>,
}

impl TerritorySystem {
    /// One zone per sector, each backed by a card from a freshly shuffled deck
    pub fn new(field: &GridField, teams: &[TeamId], rng: &mut impl Rng) -> Self {
        let mut deck = Deck::standard();
        deck.shuffle(rng);

        let mut zones = Vec::new();
        for sector in 0..=field.sector_count() {
            let cells = field.sector_cells(sector);
            if cells.is_empty() {
                continue;
            }
            // A 52-card deck covers any sane sector count
            if let Some(card) = deck.draw() {
                zones.push(TerritoryZone {
                    sector,
                    card,
                    owner: None,
                    zone: Zone::new(cells),
                });
            }
        }

        let mut scores = AHashMap::new();
        for team in teams {
            scores.insert(*team, TerritoryScore { amount: 0, max: TERRITORY_SCORE_MAX });
        }

        Self { zones, scores }
    }

    pub fn zones(&self) -> &[TerritoryZone] {
        &self.zones
    }

    pub fn zone_at(&self, pos: GridPosition) -> Option<&TerritoryZone> {
        self.zones.iter().find(|z| z.contains(pos))
    }

    pub fn score(&self, team: TeamId) -> i32 {
        self.scores.get(&team).map(|s| s.amount).unwrap_or(0)
    }

    pub fn score_normalized(&self, team: TeamId) -> f32 {
        self.scores.get(&team).map(|s| s.normalized()).unwrap_or(0.0)
    }

    /// Recompute ownership of the zone containing `pos` after a unit moved
    /// into, out of, or spawned at it.
    pub fn on_unit_position_changed(
        &mut self,
        pos: GridPosition,
        units: &[Unit],
        tick: Tick,
        events: &mut EventLog,
    ) {
        let Some(index) = self.zones.iter().position(|z| z.contains(pos)) else {
            return;
        };

        let new_owner = Self::compute_owner(&self.zones[index], units);
        let zone = &mut self.zones[index];
        if zone.owner != new_owner {
            zone.owner = new_owner;
            events.push(
                tick,
                GameEvent::TerritoryOwnerChanged { zone: zone.sector, owner: new_owner },
            );
        }
    }

    fn compute_owner(zone: &TerritoryZone, units: &[Unit]) -> Option<TeamId> {
        let mut owner: Option<TeamId> = None;
        for unit in units.iter().filter(|u| u.in_arena && zone.contains(u.position)) {
            match owner {
                None => owner = Some(unit.team()),
                Some(team) if team != unit.team() => return None, // contested
                Some(_) => {}
            }
        }
        owner
    }

    /// Award each controlling team its zones' card points
    pub fn on_turn_changed(&mut self, tick: Tick, events: &mut EventLog) {
        let mut awards: Vec<(TeamId, i32)> = Vec::new();
        for zone in &self.zones {
            if let Some(team) = zone.owner {
                awards.push((team, zone.card.points()));
            }
        }

        for (team, points) in awards {
            if let Some(score) = self.scores.get_mut(&team) {
                score.amount = (score.amount + points).min(score.max);
                events.push(tick, GameEvent::TerritoryScoreChanged { team, points });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;
    use crate::data::PlayerDef;
    use crate::grid::field::GridConfig;
    use crate::stats::stat_block::Stats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field() -> GridField {
        GridField::flat(GridConfig { radius: 6, bullseye_radius: 2, ..GridConfig::default() })
            .unwrap()
    }

    fn unit_at(team: TeamId, pos: GridPosition) -> Unit {
        let mut unit = Unit::from_player(
            team,
            &PlayerDef {
                name: "holder".to_string(),
                stats: Stats::default(),
                gear: Default::default(),
                abilities: vec![],
                perks: vec![],
            },
        );
        unit.position = pos;
        unit.in_arena = true;
        unit
    }

    #[test]
    fn test_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.remaining(), 52);
        let mut seen = std::collections::HashSet::new();
        let mut deck = deck;
        while let Some(card) = deck.draw() {
            assert!(seen.insert((card.suit, card.rank)));
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn test_card_points_by_rank() {
        let suit = Suit::Spades;
        assert_eq!(Card { suit, rank: 2 }.points(), 1);
        assert_eq!(Card { suit, rank: 10 }.points(), 1);
        assert_eq!(Card { suit, rank: 12 }.points(), 2);
        assert_eq!(Card { suit, rank: 14 }.points(), 3);
    }

    #[test]
    fn test_every_sector_gets_a_zone_and_card() {
        let field = field();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let territory = TerritorySystem::new(&field, &[TeamId::new()], &mut rng);
        assert_eq!(territory.zones().len(), (field.sector_count() + 1) as usize);
    }

    #[test]
    fn test_sole_team_takes_ownership() {
        let field = field();
        let home = TeamId::new();
        let away = TeamId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut territory = TerritorySystem::new(&field, &[home, away], &mut rng);

        let pos = field.center();
        let units = vec![unit_at(home, pos)];
        let mut events = EventLog::new();
        territory.on_unit_position_changed(pos, &units, 1, &mut events);

        let zone = territory.zone_at(pos).unwrap();
        assert_eq!(zone.owner, Some(home));
        assert!(events.contains(|e| matches!(e, GameEvent::TerritoryOwnerChanged { owner: Some(_), .. })));
    }

    #[test]
    fn test_contested_zone_is_neutral() {
        let field = field();
        let home = TeamId::new();
        let away = TeamId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut territory = TerritorySystem::new(&field, &[home, away], &mut rng);

        let pos = field.center();
        let rival_pos = GridPosition::new(pos.x + 1, pos.z);
        let units = vec![unit_at(home, pos), unit_at(away, rival_pos)];

        let mut events = EventLog::new();
        territory.on_unit_position_changed(pos, &units, 1, &mut events);

        assert_eq!(territory.zone_at(pos).unwrap().owner, None);
        // No transition: neutral before, neutral after
        assert!(events.is_empty());
    }

    #[test]
    fn test_owned_zones_score_on_turn_change() {
        let field = field();
        let home = TeamId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut territory = TerritorySystem::new(&field, &[home], &mut rng);

        let pos = field.center();
        let units = vec![unit_at(home, pos)];
        let mut events = EventLog::new();
        territory.on_unit_position_changed(pos, &units, 1, &mut events);

        let expected = territory.zone_at(pos).unwrap().card.points();
        territory.on_turn_changed(2, &mut events);
        assert_eq!(territory.score(home), expected);
    }

    #[test]
    fn test_score_caps_at_max() {
        let field = field();
        let home = TeamId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut territory = TerritorySystem::new(&field, &[home], &mut rng);

        let pos = field.center();
        let units = vec![unit_at(home, pos)];
        let mut events = EventLog::new();
        territory.on_unit_position_changed(pos, &units, 1, &mut events);

        for tick in 0..50 {
            territory.on_turn_changed(tick, &mut events);
        }
        assert_eq!(territory.score(home), TERRITORY_SCORE_MAX);
    }
}
