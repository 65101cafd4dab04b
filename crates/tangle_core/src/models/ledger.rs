//! Append-only record of a single match.
//!
//! A ledger is created at match start, grows one [`MoveRecord`] per finished
//! turn, and is sealed exactly once by [`MatchLedger::complete`]. Fields are
//! private so that the only mutations are the ones below; the ledger does no
//! legality checking of its own.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::moves::MoveRecord;
use super::player::{PlayerColor, PlayerIdentity};
use super::result::MatchResult;
use crate::error::{ProfilingError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchLedger {
    id: Uuid,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    player_a: PlayerIdentity,
    player_b: PlayerIdentity,
    initial_hand_a: Vec<char>,
    initial_hand_b: Vec<char>,
    seed: u64,
    moves: Vec<MoveRecord>,
    result: Option<MatchResult>,
}

impl MatchLedger {
    pub fn create(player_a: PlayerIdentity, player_b: PlayerIdentity, seed: u64) -> Result<Self> {
        Self::create_at(player_a, player_b, seed, Utc::now())
    }

    pub fn create_at(
        player_a: PlayerIdentity,
        player_b: PlayerIdentity,
        seed: u64,
        started_at: DateTime<Utc>,
    ) -> Result<Self> {
        if !player_a.is_complete() {
            return Err(ProfilingError::missing_data("player A identity has no id"));
        }
        if !player_b.is_complete() {
            return Err(ProfilingError::missing_data("player B identity has no id"));
        }

        let ledger = Self {
            id: Uuid::new_v4(),
            started_at,
            ended_at: None,
            player_a,
            player_b,
            initial_hand_a: Vec::new(),
            initial_hand_b: Vec::new(),
            seed,
            moves: Vec::new(),
            result: None,
        };
        log::debug!(
            "Match {} started: {} vs {} (seed {})",
            ledger.id,
            ledger.player_a.id,
            ledger.player_b.id,
            seed
        );
        Ok(ledger)
    }

    pub fn capture_initial_hands(&mut self, hand_a: Vec<char>, hand_b: Vec<char>) -> Result<()> {
        self.ensure_in_progress("capture initial hands")?;
        self.initial_hand_a = hand_a;
        self.initial_hand_b = hand_b;
        Ok(())
    }

    pub fn add_move(&mut self, record: MoveRecord) -> Result<()> {
        self.ensure_in_progress("add a move")?;
        self.moves.push(record);
        Ok(())
    }

    /// Seals the ledger. One-time transition.
    pub fn complete(&mut self, result: MatchResult) -> Result<()> {
        self.complete_at(result, Utc::now())
    }

    pub fn complete_at(&mut self, result: MatchResult, ended_at: DateTime<Utc>) -> Result<()> {
        self.ensure_in_progress("complete")?;
        log::debug!(
            "Match {} completed after {} moves: {:?} ({}-{})",
            self.id,
            self.moves.len(),
            result.winner,
            result.final_score_a,
            result.final_score_b
        );
        self.ended_at = Some(ended_at);
        self.result = Some(result);
        Ok(())
    }

    pub fn is_in_progress(&self) -> bool {
        self.ended_at.is_none()
    }

    fn ensure_in_progress(&self, action: &str) -> Result<()> {
        if self.is_in_progress() {
            Ok(())
        } else {
            Err(ProfilingError::invalid_state(format!(
                "cannot {} on completed match {}",
                action, self.id
            )))
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn identity(&self, color: PlayerColor) -> &PlayerIdentity {
        match color {
            PlayerColor::A => &self.player_a,
            PlayerColor::B => &self.player_b,
        }
    }

    /// Seat of the given player id, if they are in this match.
    pub fn color_of(&self, player_id: &str) -> Option<PlayerColor> {
        if self.player_a.id == player_id {
            Some(PlayerColor::A)
        } else if self.player_b.id == player_id {
            Some(PlayerColor::B)
        } else {
            None
        }
    }

    pub fn initial_hand(&self, color: PlayerColor) -> &[char] {
        match color {
            PlayerColor::A => &self.initial_hand_a,
            PlayerColor::B => &self.initial_hand_b,
        }
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn moves_by(&self, color: PlayerColor) -> impl Iterator<Item = &MoveRecord> {
        self.moves.iter().filter(move |m| m.player == color)
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }
}
