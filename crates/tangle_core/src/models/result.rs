use serde::{Deserialize, Serialize};

use super::player::PlayerColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    PlayerA,
    PlayerB,
    Tie,
}

impl Winner {
    pub fn from_color(color: PlayerColor) -> Self {
        match color {
            PlayerColor::A => Winner::PlayerA,
            PlayerColor::B => Winner::PlayerB,
        }
    }

    /// Outcome as seen from `color`'s seat.
    pub fn outcome_for(self, color: PlayerColor) -> GameOutcome {
        match self {
            Winner::Tie => GameOutcome::Tie,
            w if w == Winner::from_color(color) => GameOutcome::Win,
            _ => GameOutcome::Loss,
        }
    }
}

/// Match result from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Loss,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForfeitReason {
    Resigned,
    Disconnected,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forfeit {
    pub by: PlayerColor,
    pub reason: ForfeitReason,
}

/// Authoritative end-of-match result. Scores here win over anything derived
/// from the move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Winner,
    pub final_score_a: u32,
    pub final_score_b: u32,
    /// Endgame points awarded for tangled opponent pieces.
    pub tangle_points_a: u32,
    pub tangle_points_b: u32,
    pub total_turns: u32,
    #[serde(default)]
    pub forfeit: Option<Forfeit>,
}

impl MatchResult {
    /// Result with the winner decided by final score.
    pub fn by_score(final_score_a: u32, final_score_b: u32, total_turns: u32) -> Self {
        let winner = match final_score_a.cmp(&final_score_b) {
            std::cmp::Ordering::Greater => Winner::PlayerA,
            std::cmp::Ordering::Less => Winner::PlayerB,
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        Self {
            winner,
            final_score_a,
            final_score_b,
            tangle_points_a: 0,
            tangle_points_b: 0,
            total_turns,
            forfeit: None,
        }
    }

    pub fn with_tangle_points(mut self, a: u32, b: u32) -> Self {
        self.tangle_points_a = a;
        self.tangle_points_b = b;
        self
    }

    /// The forfeiting side loses regardless of score.
    pub fn with_forfeit(mut self, by: PlayerColor, reason: ForfeitReason) -> Self {
        self.forfeit = Some(Forfeit { by, reason });
        self.winner = Winner::from_color(by.opponent());
        self
    }

    pub fn final_score(&self, color: PlayerColor) -> u32 {
        match color {
            PlayerColor::A => self.final_score_a,
            PlayerColor::B => self.final_score_b,
        }
    }

    pub fn tangle_points(&self, color: PlayerColor) -> u32 {
        match color {
            PlayerColor::A => self.tangle_points_a,
            PlayerColor::B => self.tangle_points_b,
        }
    }
}
