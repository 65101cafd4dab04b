//! Lifetime profile types.
//!
//! - OpponentBlock: running counters for one opponent category
//! - AllTimeRecords: best-ever values with their originating match
//! - LifetimeProfile: per-player root aggregate

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::radar::RadarSnapshot;

/// Current layout of [`LifetimeProfile`]. Bumped whenever a stored field
/// changes meaning.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

/// Monotonically increasing counters for one opponent category.
///
/// NOTE: fields added after the first release must carry `#[serde(default)]`
/// so older profiles still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OpponentBlock {
    // Results
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,

    // Turn sums
    pub turns_played: u32,
    pub tiles_played: u32,
    pub turns_without_scoring: u32,

    // Word sums
    pub words_scored: u32,
    pub total_word_length: u32,
    pub multi_word_plays: u32,
    pub own_tiles_in_words: u32,
    pub total_tiles_in_words: u32,

    // Point sums
    pub total_points_scored: u64,
    pub word_points: u64,
    pub tangle_points: u64,

    // Cycling and contact
    pub times_cycled: u32,
    pub tiles_cycled: u32,
    pub casts_on_opponent_lines: u32,
    pub moves_onto_opponent_lines: u32,

    // Tangles and resilience
    pub times_tangled: u32,
    pub self_tangles: u32,
    pub tangles_caused: u32,
    pub games_where_tangled: u32,
    pub wins_while_tangled: u32,

    // Block-scoped records
    pub highest_score: u32,
    pub longest_word: Option<String>,
    pub longest_word_length: u32,
    pub best_turn_score: u32,
}

impl OpponentBlock {
    pub fn scoring_turns(&self) -> u32 {
        self.turns_played.saturating_sub(self.turns_without_scoring)
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }

    /// Field-wise sum of two blocks. Counters add; records take the larger
    /// value, preferring `self` on ties.
    pub fn combined(&self, other: &OpponentBlock) -> OpponentBlock {
        let (longest_word, longest_word_length) = if other.longest_word_length > self.longest_word_length {
            (other.longest_word.clone(), other.longest_word_length)
        } else {
            (self.longest_word.clone(), self.longest_word_length)
        };

        OpponentBlock {
            games_played: self.games_played + other.games_played,
            wins: self.wins + other.wins,
            losses: self.losses + other.losses,
            ties: self.ties + other.ties,
            turns_played: self.turns_played + other.turns_played,
            tiles_played: self.tiles_played + other.tiles_played,
            turns_without_scoring: self.turns_without_scoring + other.turns_without_scoring,
            words_scored: self.words_scored + other.words_scored,
            total_word_length: self.total_word_length + other.total_word_length,
            multi_word_plays: self.multi_word_plays + other.multi_word_plays,
            own_tiles_in_words: self.own_tiles_in_words + other.own_tiles_in_words,
            total_tiles_in_words: self.total_tiles_in_words + other.total_tiles_in_words,
            total_points_scored: self.total_points_scored + other.total_points_scored,
            word_points: self.word_points + other.word_points,
            tangle_points: self.tangle_points + other.tangle_points,
            times_cycled: self.times_cycled + other.times_cycled,
            tiles_cycled: self.tiles_cycled + other.tiles_cycled,
            casts_on_opponent_lines: self.casts_on_opponent_lines + other.casts_on_opponent_lines,
            moves_onto_opponent_lines: self.moves_onto_opponent_lines + other.moves_onto_opponent_lines,
            times_tangled: self.times_tangled + other.times_tangled,
            self_tangles: self.self_tangles + other.self_tangles,
            tangles_caused: self.tangles_caused + other.tangles_caused,
            games_where_tangled: self.games_where_tangled + other.games_where_tangled,
            wins_while_tangled: self.wins_while_tangled + other.wins_while_tangled,
            highest_score: self.highest_score.max(other.highest_score),
            longest_word,
            longest_word_length,
            best_turn_score: self.best_turn_score.max(other.best_turn_score),
        }
    }
}

/// A numeric best-ever value and the match it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub value: u32,
    pub match_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub length: u32,
    pub match_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AllTimeRecords {
    pub highest_score: Option<ScoreRecord>,
    pub longest_word: Option<WordRecord>,
    pub best_turn: Option<ScoreRecord>,
}

/// Cumulative profile of one player across every recorded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeProfile {
    pub schema_version: u32,
    pub player_id: String,
    pub vs_ai: OpponentBlock,
    pub vs_human: OpponentBlock,
    pub records: AllTimeRecords,
    /// Lifetime counts in first-play order.
    pub letter_frequency: IndexMap<char, u32>,
    pub word_frequency: IndexMap<String, u32>,
    pub favorite_letter: Option<char>,
    pub favorite_word: Option<String>,
    /// Append-only, oldest first.
    pub radar_history: Vec<RadarSnapshot>,
    pub first_match_time: Option<DateTime<Utc>>,
    pub last_match_time: Option<DateTime<Utc>>,
    /// Every match already counted in this profile.
    #[serde(default)]
    pub folded_matches: BTreeSet<Uuid>,
}

impl LifetimeProfile {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION,
            player_id: player_id.into(),
            vs_ai: OpponentBlock::default(),
            vs_human: OpponentBlock::default(),
            records: AllTimeRecords::default(),
            letter_frequency: IndexMap::new(),
            word_frequency: IndexMap::new(),
            favorite_letter: None,
            favorite_word: None,
            radar_history: Vec::new(),
            first_match_time: None,
            last_match_time: None,
            folded_matches: BTreeSet::new(),
        }
    }

    pub fn block(&self, vs_ai: bool) -> &OpponentBlock {
        if vs_ai {
            &self.vs_ai
        } else {
            &self.vs_human
        }
    }

    pub fn block_mut(&mut self, vs_ai: bool) -> &mut OpponentBlock {
        if vs_ai {
            &mut self.vs_ai
        } else {
            &mut self.vs_human
        }
    }

    /// Both opponent categories summed.
    pub fn combined(&self) -> OpponentBlock {
        self.vs_ai.combined(&self.vs_human)
    }

    pub fn total_games(&self) -> u32 {
        self.vs_ai.games_played + self.vs_human.games_played
    }

    pub fn latest_snapshot(&self) -> Option<&RadarSnapshot> {
        self.radar_history.last()
    }

    pub fn has_folded(&self, match_id: Uuid) -> bool {
        self.folded_matches.contains(&match_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty() {
        let profile = LifetimeProfile::new("ann");
        assert_eq!(profile.schema_version, PROFILE_SCHEMA_VERSION);
        assert_eq!(profile.total_games(), 0);
        assert!(profile.first_match_time.is_none());
        assert!(profile.latest_snapshot().is_none());
    }

    #[test]
    fn test_combined_sums_counters_and_keeps_records() {
        let ai = OpponentBlock {
            games_played: 3,
            wins: 2,
            losses: 1,
            tangles_caused: 4,
            highest_score: 40,
            longest_word: Some("TANGLE".to_string()),
            longest_word_length: 6,
            ..OpponentBlock::default()
        };
        let human = OpponentBlock {
            games_played: 2,
            ties: 2,
            tangles_caused: 1,
            highest_score: 55,
            longest_word: Some("KNOTS".to_string()),
            longest_word_length: 5,
            ..OpponentBlock::default()
        };

        let total = ai.combined(&human);
        assert_eq!(total.games_played, 5);
        assert_eq!(total.wins + total.losses + total.ties, 5);
        assert_eq!(total.tangles_caused, 5);
        assert_eq!(total.highest_score, 55);
        assert_eq!(total.longest_word.as_deref(), Some("TANGLE"));
    }

    #[test]
    fn test_scoring_turns_never_underflows() {
        let block = OpponentBlock { turns_played: 2, turns_without_scoring: 5, ..OpponentBlock::default() };
        assert_eq!(block.scoring_turns(), 0);
    }
}
