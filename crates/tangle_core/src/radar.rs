//! Radar snapshot calculation
//!
//! Converts a cumulative [`LifetimeProfile`] into six normalized play-style
//! axes for visual representation and comparison over time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RadarConfig;
use crate::lifetime::{LifetimeProfile, OpponentBlock};

/// The six play-style axes, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadarAxis {
    MultiWord,
    Value,
    Investment,
    Trapper,
    Aggression,
    Resilience,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 6] = [
        RadarAxis::MultiWord,
        RadarAxis::Value,
        RadarAxis::Investment,
        RadarAxis::Trapper,
        RadarAxis::Aggression,
        RadarAxis::Resilience,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RadarAxis::MultiWord => "multi_word",
            RadarAxis::Value => "value",
            RadarAxis::Investment => "investment",
            RadarAxis::Trapper => "trapper",
            RadarAxis::Aggression => "aggression",
            RadarAxis::Resilience => "resilience",
        }
    }

    /// Short description for tooltips.
    pub fn description(&self) -> &'static str {
        match self {
            RadarAxis::MultiWord => "Forms several words with a single cast",
            RadarAxis::Value => "Scores many points per tile played",
            RadarAxis::Investment => "Builds words out of their own tiles",
            RadarAxis::Trapper => "Tangles opponent pieces",
            RadarAxis::Aggression => "Plays onto opponent lines",
            RadarAxis::Resilience => "Still wins after being tangled",
        }
    }
}

/// Six-axis play-style snapshot. Every axis is in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSnapshot {
    pub multi_word: f64,
    pub value: f64,
    pub investment: f64,
    pub trapper: f64,
    pub aggression: f64,
    pub resilience: f64,
    /// Lifetime games at capture time.
    pub games_played: u32,
    pub captured_at: DateTime<Utc>,
}

impl RadarSnapshot {
    pub fn get(&self, axis: RadarAxis) -> f64 {
        match axis {
            RadarAxis::MultiWord => self.multi_word,
            RadarAxis::Value => self.value,
            RadarAxis::Investment => self.investment,
            RadarAxis::Trapper => self.trapper,
            RadarAxis::Aggression => self.aggression,
            RadarAxis::Resilience => self.resilience,
        }
    }

    pub fn axes(&self) -> [(RadarAxis, f64); 6] {
        RadarAxis::ALL.map(|axis| (axis, self.get(axis)))
    }

    /// Change from `earlier` to `self`.
    pub fn diff(&self, earlier: &RadarSnapshot) -> RadarDiff {
        RadarDiff {
            multi_word: self.multi_word - earlier.multi_word,
            value: self.value - earlier.value,
            investment: self.investment - earlier.investment,
            trapper: self.trapper - earlier.trapper,
            aggression: self.aggression - earlier.aggression,
            resilience: self.resilience - earlier.resilience,
            games_between: self.games_played.saturating_sub(earlier.games_played),
        }
    }
}

/// Difference between two snapshots (for trend display)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarDiff {
    pub multi_word: f64,
    pub value: f64,
    pub investment: f64,
    pub trapper: f64,
    pub aggression: f64,
    pub resilience: f64,
    pub games_between: u32,
}

/// Calculator for radar snapshots.
#[derive(Debug, Clone, Default)]
pub struct RadarCalculator {
    config: RadarConfig,
}

impl RadarCalculator {
    pub fn new(config: RadarConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Snapshot stamped with the profile's last match time, or now for a
    /// profile without matches.
    pub fn create_snapshot(&self, profile: &LifetimeProfile) -> RadarSnapshot {
        self.create_snapshot_at(profile, profile.last_match_time.unwrap_or_else(Utc::now))
    }

    pub fn create_snapshot_at(&self, profile: &LifetimeProfile, captured_at: DateTime<Utc>) -> RadarSnapshot {
        let raw = profile.combined();
        RadarSnapshot {
            multi_word: self.multi_word(&raw),
            value: self.value(&raw),
            investment: self.investment(&raw),
            trapper: self.trapper(&raw),
            aggression: self.aggression(&raw),
            resilience: self.resilience(&raw),
            games_played: raw.games_played,
            captured_at,
        }
    }

    /// Multi-word plays per scoring turn, over [0, 0.5]
    pub fn multi_word(&self, raw: &OpponentBlock) -> f64 {
        let scoring_turns = i64::from(raw.turns_played) - i64::from(raw.turns_without_scoring);
        if scoring_turns <= 0 {
            return self.config.no_data_default;
        }
        self.config.multi_word.normalize(f64::from(raw.multi_word_plays) / scoring_turns as f64)
    }

    /// Points per tile, over [2, 10]
    pub fn value(&self, raw: &OpponentBlock) -> f64 {
        if raw.tiles_played == 0 {
            return self.config.no_data_default;
        }
        self.config.value.normalize(raw.total_points_scored as f64 / f64::from(raw.tiles_played))
    }

    /// Own share of tiles in scored words, over [0.3, 0.9]
    pub fn investment(&self, raw: &OpponentBlock) -> f64 {
        if raw.total_tiles_in_words == 0 {
            return self.config.no_data_default;
        }
        self.config
            .investment
            .normalize(f64::from(raw.own_tiles_in_words) / f64::from(raw.total_tiles_in_words))
    }

    /// Tangles caused per game, over [0, 1.5]
    pub fn trapper(&self, raw: &OpponentBlock) -> f64 {
        if raw.games_played == 0 {
            return self.config.no_data_default;
        }
        self.config.trapper.normalize(f64::from(raw.tangles_caused) / f64::from(raw.games_played))
    }

    /// Opponent-line contacts per turn, over [0, 0.7]
    pub fn aggression(&self, raw: &OpponentBlock) -> f64 {
        if raw.turns_played == 0 {
            return self.config.no_data_default;
        }
        let contacts = f64::from(raw.casts_on_opponent_lines) + f64::from(raw.moves_onto_opponent_lines);
        self.config.aggression.normalize(contacts / f64::from(raw.turns_played))
    }

    /// Wins per tangled game, over [0, 0.8]. A player who has played but was
    /// never tangled scores the configured perfect value, not the no-data one.
    pub fn resilience(&self, raw: &OpponentBlock) -> f64 {
        if raw.games_played == 0 {
            return self.config.no_data_default;
        }
        if raw.games_where_tangled == 0 {
            return self.config.never_tangled_resilience;
        }
        self.config
            .resilience
            .normalize(f64::from(raw.wins_while_tangled) / f64::from(raw.games_where_tangled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with(block: OpponentBlock) -> LifetimeProfile {
        let mut profile = LifetimeProfile::new("ann");
        profile.vs_human = block;
        profile
    }

    #[test]
    fn test_cold_start_all_half() {
        let snapshot = RadarCalculator::default().create_snapshot(&LifetimeProfile::new("ann"));
        for (axis, value) in snapshot.axes() {
            assert_eq!(value, 0.5, "{} should default to 0.5", axis.name());
        }
        assert_eq!(snapshot.games_played, 0);
    }

    #[test]
    fn test_never_tangled_is_perfect_resilience() {
        let profile = profile_with(OpponentBlock { games_played: 10, wins: 3, losses: 7, ..OpponentBlock::default() });
        let snapshot = RadarCalculator::default().create_snapshot(&profile);
        assert_eq!(snapshot.resilience, 1.0);
    }

    #[test]
    fn test_axes_normalize_and_clamp() {
        let profile = profile_with(OpponentBlock {
            games_played: 4,
            wins: 2,
            losses: 2,
            turns_played: 40,
            tiles_played: 40,
            turns_without_scoring: 20,
            multi_word_plays: 5,
            total_points_scored: 240,
            own_tiles_in_words: 60,
            total_tiles_in_words: 100,
            tangles_caused: 12,
            casts_on_opponent_lines: 10,
            moves_onto_opponent_lines: 4,
            games_where_tangled: 2,
            wins_while_tangled: 1,
            ..OpponentBlock::default()
        });
        let s = RadarCalculator::default().create_snapshot(&profile);

        assert!((s.multi_word - 0.5).abs() < 1e-9); // 5/20 = 0.25 of [0, 0.5]
        assert!((s.value - 0.5).abs() < 1e-9); // 6 points/tile of [2, 10]
        assert!((s.investment - 0.5).abs() < 1e-9); // 0.6 of [0.3, 0.9]
        assert_eq!(s.trapper, 1.0); // 3/game clamps
        assert!((s.aggression - 0.5).abs() < 1e-9); // 0.35 of [0, 0.7]
        assert!((s.resilience - 0.625).abs() < 1e-9); // 0.5 of [0, 0.8]
    }

    #[test]
    fn test_blocks_are_combined() {
        let mut profile = LifetimeProfile::new("ann");
        profile.vs_ai = OpponentBlock { games_played: 1, tangles_caused: 0, ..OpponentBlock::default() };
        profile.vs_human = OpponentBlock { games_played: 1, tangles_caused: 3, ..OpponentBlock::default() };
        let s = RadarCalculator::default().create_snapshot(&profile);
        assert!((s.trapper - 1.0).abs() < 1e-9); // 1.5/game
        assert_eq!(s.games_played, 2);
    }

    #[test]
    fn test_diff_between_snapshots() {
        let at = Utc::now();
        let before = RadarSnapshot {
            multi_word: 0.2,
            value: 0.5,
            investment: 0.5,
            trapper: 0.1,
            aggression: 0.3,
            resilience: 0.5,
            games_played: 50,
            captured_at: at,
        };
        let after = RadarSnapshot { trapper: 0.6, aggression: 0.2, games_played: 100, ..before.clone() };

        let diff = after.diff(&before);
        assert_eq!(diff.games_between, 50);
        assert!((diff.trapper - 0.5).abs() < 1e-9);
        assert!((diff.aggression + 0.1).abs() < 1e-9);
        assert_eq!(diff.multi_word, 0.0);
        assert_eq!(after.get(RadarAxis::Trapper), 0.6);
    }
}
