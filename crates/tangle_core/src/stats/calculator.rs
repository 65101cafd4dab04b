use super::{most_frequent, MatchStats, PlayerMatchStats};
use crate::error::{ProfilingError, Result};
use crate::models::{MatchLedger, MatchResult, MoveRecord, PlayerColor};

/// Calculator for per-match statistics. Stateless; the same ledger always
/// yields the same [`MatchStats`].
pub struct MatchStatsCalculator;

impl MatchStatsCalculator {
    /// Calculate statistics for both players of a completed ledger.
    ///
    /// # Errors
    /// * `InvalidState` if the ledger has no result yet.
    /// * `MissingData` if a player identity or the end timestamp is absent.
    pub fn calculate(ledger: &MatchLedger) -> Result<MatchStats> {
        let result = ledger.result().ok_or_else(|| {
            ProfilingError::invalid_state(format!("match {} has no result yet", ledger.id()))
        })?;
        let ended_at = ledger.ended_at().ok_or_else(|| {
            ProfilingError::missing_data(format!("match {} has a result but no end time", ledger.id()))
        })?;
        for color in [PlayerColor::A, PlayerColor::B] {
            if !ledger.identity(color).is_complete() {
                return Err(ProfilingError::missing_data(format!(
                    "player {} identity missing in match {}",
                    color,
                    ledger.id()
                )));
            }
        }

        let player_a = Self::calculate_player(ledger.moves_by(PlayerColor::A), PlayerColor::A, result);
        let player_b = Self::calculate_player(ledger.moves_by(PlayerColor::B), PlayerColor::B, result);

        let stats = MatchStats {
            match_id: ledger.id(),
            was_vs_ai: ledger.identity(PlayerColor::A).is_ai || ledger.identity(PlayerColor::B).is_ai,
            winner: result.winner,
            total_turns: result.total_turns,
            total_words_scored: player_a.words_scored + player_b.words_scored,
            started_at: ledger.started_at(),
            ended_at,
            player_a,
            player_b,
        };

        log::debug!(
            "Calculated stats for match {}: {} words, winner {:?}",
            stats.match_id,
            stats.total_words_scored,
            stats.winner
        );
        Ok(stats)
    }

    /// Single pass over one player's moves, then the derived values.
    fn calculate_player<'a>(
        moves: impl Iterator<Item = &'a MoveRecord>,
        color: PlayerColor,
        result: &MatchResult,
    ) -> PlayerMatchStats {
        let mut stats = PlayerMatchStats::default();

        for record in moves {
            stats.turns_played += 1;
            stats.tiles_played += 1;
            *stats.letters_played.entry(record.cast_letter).or_insert(0) += 1;

            if record.is_scoring() {
                stats.turns_with_scoring += 1;
            } else {
                stats.turns_without_scoring += 1;
            }

            for word in &record.words {
                let length = word.len() as u32;
                stats.words_scored += 1;
                stats.total_word_length += length;
                stats.unique_words.insert(word.word.clone());
                *stats.word_frequency.entry(word.word.clone()).or_insert(0) += 1;
                if length > stats.longest_word_length {
                    stats.longest_word_length = length;
                    stats.longest_word = Some(word.word.clone());
                }
                stats.own_tiles_in_words += word.own_tiles;
                stats.total_tiles_in_words += word.total_tiles;
            }
            if record.words.len() >= 2 {
                stats.multi_word_plays += 1;
            }

            if record.points > stats.best_turn_points {
                stats.best_turn_points = record.points;
                stats.best_turn_number = Some(record.turn);
                stats.best_turn_word = match record.words.as_slice() {
                    [only] => Some(only.word.clone()),
                    _ => None,
                };
            }

            if record.cycle_mode {
                stats.times_cycled += 1;
                stats.tiles_cycled += record.tiles_cycled;
            }

            if record.cast_on_opponent_line {
                stats.casts_on_opponent_lines += 1;
            }
            if record.moved_onto_opponent_line {
                stats.moves_onto_opponent_lines += 1;
            }

            for tangle in &record.tangles {
                if tangle.player == color {
                    stats.times_tangled += 1;
                    stats.was_tangled = true;
                    if tangle.self_inflicted {
                        stats.self_tangles += 1;
                    }
                } else {
                    stats.tangles_caused += 1;
                }
            }
        }

        stats.average_word_length = if stats.words_scored > 0 {
            stats.total_word_length as f64 / stats.words_scored as f64
        } else {
            0.0
        };
        stats.most_played_letter = most_frequent(&stats.letters_played);
        stats.most_played_word = most_frequent(&stats.word_frequency);

        // Scores come from the result, not from summing move points.
        stats.final_score = result.final_score(color);
        stats.tangle_points = result.tangle_points(color);
        stats.word_points = stats.final_score.saturating_sub(stats.tangle_points);
        stats.points_per_turn = if stats.turns_played > 0 {
            stats.final_score as f64 / stats.turns_played as f64
        } else {
            0.0
        };

        stats
    }
}
