use serde::{Deserialize, Serialize};

use super::profile::{LifetimeProfile, OpponentBlock, ScoreRecord, WordRecord};
use crate::config::ProfilingConfig;
use crate::models::{GameOutcome, PlayerColor};
use crate::radar::RadarCalculator;
use crate::stats::{merge_counts, most_frequent, MatchStats, PlayerMatchStats};

/// What a single fold did to the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub outcome: GameOutcome,
    pub vs_ai: bool,
    pub total_games: u32,
    pub snapshot_taken: bool,
}

/// Folds finished matches into lifetime profiles.
#[derive(Debug, Clone)]
pub struct LifetimeUpdater {
    snapshot_interval: u32,
    radar: RadarCalculator,
}

impl Default for LifetimeUpdater {
    fn default() -> Self {
        Self::new(&ProfilingConfig::default())
    }
}

impl LifetimeUpdater {
    pub fn new(config: &ProfilingConfig) -> Self {
        Self {
            snapshot_interval: config.snapshot_interval,
            radar: RadarCalculator::new(config.radar.clone()),
        }
    }

    pub fn snapshot_interval(&self) -> u32 {
        self.snapshot_interval
    }

    pub fn radar(&self) -> &RadarCalculator {
        &self.radar
    }

    /// Folds one match into `profile`.
    ///
    /// Call exactly once per finished match: a second call with the same
    /// stats counts the match twice. Callers guard with
    /// [`LifetimeProfile::has_folded`], since the match id is recorded in the
    /// same assignment as the counters. The work is done on a copy that
    /// replaces `profile` in one assignment.
    pub fn update_from_match(
        &self,
        profile: &mut LifetimeProfile,
        stats: &MatchStats,
        color: PlayerColor,
    ) -> UpdateSummary {
        let player = stats.for_player(color);
        let outcome = stats.winner.outcome_for(color);
        let mut next = profile.clone();

        Self::fold_block(next.block_mut(stats.was_vs_ai), player, outcome);
        Self::update_records(&mut next, player, stats);

        merge_counts(&mut next.letter_frequency, &player.letters_played);
        merge_counts(&mut next.word_frequency, &player.word_frequency);
        next.favorite_letter = most_frequent(&next.letter_frequency);
        next.favorite_word = most_frequent(&next.word_frequency);

        next.folded_matches.insert(stats.match_id);
        next.last_match_time = Some(stats.ended_at);
        if next.first_match_time.is_none() {
            next.first_match_time = Some(stats.ended_at);
        }

        let total_games = next.total_games();
        let snapshot_taken = self.snapshot_interval > 0 && total_games > 0 && total_games % self.snapshot_interval == 0;
        if snapshot_taken {
            let snapshot = self.radar.create_snapshot_at(&next, stats.ended_at);
            log::info!(
                "Radar snapshot #{} for {} at {} games",
                next.radar_history.len() + 1,
                next.player_id,
                total_games
            );
            next.radar_history.push(snapshot);
        }

        log::debug!(
            "Folded match {} into {}: {:?} (vs_ai={}, {} games)",
            stats.match_id,
            next.player_id,
            outcome,
            stats.was_vs_ai,
            total_games
        );

        *profile = next;
        UpdateSummary { outcome, vs_ai: stats.was_vs_ai, total_games, snapshot_taken }
    }

    fn fold_block(block: &mut OpponentBlock, player: &PlayerMatchStats, outcome: GameOutcome) {
        block.games_played += 1;
        match outcome {
            GameOutcome::Win => block.wins += 1,
            GameOutcome::Loss => block.losses += 1,
            GameOutcome::Tie => block.ties += 1,
        }

        block.turns_played += player.turns_played;
        block.tiles_played += player.tiles_played;
        block.turns_without_scoring += player.turns_without_scoring;
        block.words_scored += player.words_scored;
        block.total_word_length += player.total_word_length;
        block.multi_word_plays += player.multi_word_plays;
        block.own_tiles_in_words += player.own_tiles_in_words;
        block.total_tiles_in_words += player.total_tiles_in_words;
        block.total_points_scored += u64::from(player.final_score);
        block.word_points += u64::from(player.word_points);
        block.tangle_points += u64::from(player.tangle_points);
        block.times_cycled += player.times_cycled;
        block.tiles_cycled += player.tiles_cycled;
        block.casts_on_opponent_lines += player.casts_on_opponent_lines;
        block.moves_onto_opponent_lines += player.moves_onto_opponent_lines;
        block.times_tangled += player.times_tangled;
        block.self_tangles += player.self_tangles;
        block.tangles_caused += player.tangles_caused;

        if player.was_tangled {
            block.games_where_tangled += 1;
            if outcome == GameOutcome::Win {
                block.wins_while_tangled += 1;
            }
        }

        if player.final_score > block.highest_score {
            block.highest_score = player.final_score;
        }
        if player.longest_word_length > block.longest_word_length {
            block.longest_word_length = player.longest_word_length;
            block.longest_word = player.longest_word.clone();
        }
        if player.best_turn_points > block.best_turn_score {
            block.best_turn_score = player.best_turn_points;
        }
    }

    fn update_records(profile: &mut LifetimeProfile, player: &PlayerMatchStats, stats: &MatchStats) {
        let records = &mut profile.records;
        let match_id = stats.match_id;

        if player.final_score > records.highest_score.as_ref().map_or(0, |r| r.value) {
            records.highest_score = Some(ScoreRecord { value: player.final_score, match_id });
        }
        if let Some(word) = &player.longest_word {
            if player.longest_word_length > records.longest_word.as_ref().map_or(0, |r| r.length) {
                records.longest_word =
                    Some(WordRecord { word: word.clone(), length: player.longest_word_length, match_id });
            }
        }
        if player.best_turn_points > records.best_turn.as_ref().map_or(0, |r| r.value) {
            records.best_turn = Some(ScoreRecord { value: player.best_turn_points, match_id });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Winner;
    use chrono::{TimeZone, Utc};
    use indexmap::IndexMap;
    use uuid::Uuid;

    fn stats(winner: Winner, vs_ai: bool, a: PlayerMatchStats) -> MatchStats {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        MatchStats {
            match_id: Uuid::new_v4(),
            was_vs_ai: vs_ai,
            winner,
            total_turns: a.turns_played * 2,
            total_words_scored: a.words_scored,
            started_at: at,
            ended_at: at,
            player_a: a,
            player_b: PlayerMatchStats::default(),
        }
    }

    #[test]
    fn test_vs_ai_loss_while_tangled() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");
        let a = PlayerMatchStats { was_tangled: true, times_tangled: 1, ..PlayerMatchStats::default() };

        let summary = updater.update_from_match(&mut profile, &stats(Winner::PlayerB, true, a), PlayerColor::A);

        assert_eq!(summary.outcome, GameOutcome::Loss);
        assert_eq!(profile.vs_ai.games_where_tangled, 1);
        assert_eq!(profile.vs_ai.wins_while_tangled, 0);
        assert_eq!(profile.vs_ai.losses, 1);
        assert_eq!(profile.vs_human.games_played, 0);
    }

    #[test]
    fn test_win_while_tangled_counts_both() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");
        let a = PlayerMatchStats { was_tangled: true, ..PlayerMatchStats::default() };

        updater.update_from_match(&mut profile, &stats(Winner::PlayerA, false, a), PlayerColor::A);

        assert_eq!(profile.vs_human.games_where_tangled, 1);
        assert_eq!(profile.vs_human.wins_while_tangled, 1);
    }

    #[test]
    fn test_records_only_move_on_strict_improvement() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");

        let first = stats(
            Winner::PlayerA,
            true,
            PlayerMatchStats {
                final_score: 40,
                best_turn_points: 12,
                longest_word: Some("KNOT".to_string()),
                longest_word_length: 4,
                ..PlayerMatchStats::default()
            },
        );
        updater.update_from_match(&mut profile, &first, PlayerColor::A);

        let second = stats(
            Winner::PlayerA,
            false,
            PlayerMatchStats {
                final_score: 40,
                best_turn_points: 15,
                longest_word: Some("LOOP".to_string()),
                longest_word_length: 4,
                ..PlayerMatchStats::default()
            },
        );
        updater.update_from_match(&mut profile, &second, PlayerColor::A);

        let records = &profile.records;
        assert_eq!(records.highest_score.as_ref().unwrap().match_id, first.match_id);
        assert_eq!(records.longest_word.as_ref().unwrap().word, "KNOT");
        assert_eq!(records.best_turn.as_ref().unwrap().match_id, second.match_id);
        assert_eq!(profile.vs_human.longest_word.as_deref(), Some("LOOP"));
    }

    #[test]
    fn test_fold_records_match_id() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");
        let s = stats(Winner::PlayerA, true, PlayerMatchStats::default());
        assert!(!profile.has_folded(s.match_id));

        updater.update_from_match(&mut profile, &s, PlayerColor::A);
        assert!(profile.has_folded(s.match_id));
    }

    #[test]
    fn test_favorites_follow_first_play_on_ties() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");
        let first = PlayerMatchStats {
            letters_played: IndexMap::from([('T', 1)]),
            ..PlayerMatchStats::default()
        };
        let second = PlayerMatchStats {
            letters_played: IndexMap::from([('E', 1)]),
            ..PlayerMatchStats::default()
        };

        updater.update_from_match(&mut profile, &stats(Winner::Tie, true, first), PlayerColor::A);
        updater.update_from_match(&mut profile, &stats(Winner::Tie, true, second), PlayerColor::A);

        assert_eq!(profile.favorite_letter, Some('T'));
    }

    #[test]
    fn test_first_match_time_set_once() {
        let updater = LifetimeUpdater::default();
        let mut profile = LifetimeProfile::new("ann");
        let mut early = stats(Winner::Tie, true, PlayerMatchStats::default());
        early.ended_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let mut late = stats(Winner::Tie, true, PlayerMatchStats::default());
        late.ended_at = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();

        updater.update_from_match(&mut profile, &early, PlayerColor::A);
        updater.update_from_match(&mut profile, &late, PlayerColor::A);

        assert_eq!(profile.first_match_time, Some(early.ended_at));
        assert_eq!(profile.last_match_time, Some(late.ended_at));
        assert_eq!(profile.vs_ai.ties, 2);
    }

    #[test]
    fn test_custom_interval_snapshots() {
        let config = ProfilingConfig { snapshot_interval: 2, ..ProfilingConfig::default() };
        let updater = LifetimeUpdater::new(&config);
        let mut profile = LifetimeProfile::new("ann");

        let s = stats(Winner::PlayerA, true, PlayerMatchStats::default());
        assert!(!updater.update_from_match(&mut profile, &s, PlayerColor::A).snapshot_taken);
        let summary = updater.update_from_match(&mut profile, &s, PlayerColor::A);
        assert!(summary.snapshot_taken);
        assert_eq!(profile.radar_history.len(), 1);
        assert_eq!(profile.radar_history[0].games_played, 2);
    }
}
