//! Turn rotation across teams

use serde::{Deserialize, Serialize};

use crate::core::types::TeamId;

/// Linear rotation over the match's team list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEngine {
    teams: Vec<TeamId>,
    current_index: usize,
    turn_number: u32,
}

impl TurnEngine {
    pub fn new(teams: Vec<TeamId>) -> Self {
        Self {
            teams,
            current_index: 0,
            turn_number: 1,
        }
    }

    pub fn current_team(&self) -> TeamId {
        self.teams[self.current_index]
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    /// Advance to the next team; returns the team now up
    pub fn next_turn(&mut self) -> TeamId {
        self.turn_number += 1;
        self.current_index = (self.current_index + 1) % self.teams.len();
        self.current_team()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_parity() {
        let home = TeamId::new();
        let away = TeamId::new();
        let mut engine = TurnEngine::new(vec![home, away]);

        assert_eq!(engine.current_team(), home);
        for k in 1..=10 {
            let team = engine.next_turn();
            if k % 2 == 1 {
                assert_eq!(team, away);
            } else {
                assert_eq!(team, home);
            }
        }
    }

    #[test]
    fn test_turn_number_increments() {
        let mut engine = TurnEngine::new(vec![TeamId::new(), TeamId::new()]);
        assert_eq!(engine.turn_number(), 1);
        engine.next_turn();
        engine.next_turn();
        assert_eq!(engine.turn_number(), 3);
    }
}
