//! # Match Statistics
//!
//! Per-match derived statistics produced from a completed [`MatchLedger`].
//!
//! [`MatchLedger`]: crate::models::MatchLedger

mod calculator;

pub use calculator::MatchStatsCalculator;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::hash::Hash;
use uuid::Uuid;

use crate::models::{PlayerColor, Winner};

/// Aggregated statistics for a finished match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub match_id: Uuid,
    /// Either seat was an AI.
    pub was_vs_ai: bool,
    pub winner: Winner,
    pub total_turns: u32,
    /// Always `player_a.words_scored + player_b.words_scored`.
    pub total_words_scored: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub player_a: PlayerMatchStats,
    pub player_b: PlayerMatchStats,
}

impl MatchStats {
    pub fn for_player(&self, color: PlayerColor) -> &PlayerMatchStats {
        match color {
            PlayerColor::A => &self.player_a,
            PlayerColor::B => &self.player_b,
        }
    }
}

/// One player's derived block within [`MatchStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerMatchStats {
    // Turn tallies
    pub turns_played: u32,
    pub tiles_played: u32,
    pub turns_with_scoring: u32,
    pub turns_without_scoring: u32,
    /// Insertion order is first-play order.
    pub letters_played: IndexMap<char, u32>,

    // Words
    pub words_scored: u32,
    pub total_word_length: u32,
    pub unique_words: BTreeSet<String>,
    pub word_frequency: IndexMap<String, u32>,
    pub longest_word: Option<String>,
    pub longest_word_length: u32,
    pub own_tiles_in_words: u32,
    pub total_tiles_in_words: u32,
    pub multi_word_plays: u32,

    // Best turn
    pub best_turn_points: u32,
    pub best_turn_number: Option<u32>,
    /// `None` when the best turn formed more than one word.
    pub best_turn_word: Option<String>,

    // Cycling
    pub times_cycled: u32,
    pub tiles_cycled: u32,

    // Opponent-line contact
    pub casts_on_opponent_lines: u32,
    pub moves_onto_opponent_lines: u32,

    // Tangles
    pub times_tangled: u32,
    pub self_tangles: u32,
    pub tangles_caused: u32,
    pub was_tangled: bool,

    // Derived after the pass
    pub final_score: u32,
    pub tangle_points: u32,
    pub word_points: u32,
    pub points_per_turn: f64,
    pub average_word_length: f64,
    pub most_played_letter: Option<char>,
    pub most_played_word: Option<String>,
}

/// Key with the highest count. Scans in insertion order and keeps the first
/// key to reach the maximum, so ties resolve to the key seen first.
pub fn most_frequent<K: Hash + Eq + Clone>(counts: &IndexMap<K, u32>) -> Option<K> {
    let mut best: Option<(&K, u32)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(key, _)| key.clone())
}

/// Adds every count of `from` into `into`. Keys new to `into` are appended in
/// `from`'s order, so existing keys keep their place.
pub fn merge_counts<K: Hash + Eq + Clone>(into: &mut IndexMap<K, u32>, from: &IndexMap<K, u32>) {
    for (key, &count) in from {
        *into.entry(key.clone()).or_insert(0) += count;
    }
}
