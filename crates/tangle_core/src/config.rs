//! # Profiling Configuration
//!
//! Tunables for lifetime profiling: snapshot cadence and radar normalization.
//!
//! ## Usage
//! ```rust
//! use tangle_core::config::ProfilingConfig;
//!
//! let config = ProfilingConfig::default();
//! assert_eq!(config.snapshot_interval, 50);
//!
//! let tuned = ProfilingConfig::from_yaml_str("snapshot_interval: 10").unwrap();
//! assert_eq!(tuned.snapshot_interval, 10);
//! assert_eq!(tuned.radar.value.max, 10.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lifetime games between radar snapshots.
pub const DEFAULT_SNAPSHOT_INTERVAL: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// A snapshot is taken whenever total lifetime games is a positive
    /// multiple of this (default: 50)
    pub snapshot_interval: u32,
    pub radar: RadarConfig,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self { snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL, radar: RadarConfig::default() }
    }
}

impl ProfilingConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snapshot_interval == 0 {
            return Err(ConfigError::Invalid("snapshot_interval must be positive".to_string()));
        }
        self.radar.validate()
    }
}

/// Normalization range of one radar axis. `baseline` is a reference value
/// for calibration and display; it takes no part in the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
    pub baseline: f64,
}

impl AxisBounds {
    pub const fn new(min: f64, max: f64, baseline: f64) -> Self {
        Self { min, max, baseline }
    }

    /// `(raw - min) / (max - min)` clamped to [0, 1].
    pub fn normalize(&self, raw: f64) -> f64 {
        ((raw - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Multi-word plays per scoring turn
    pub multi_word: AxisBounds,
    /// Points per tile played
    pub value: AxisBounds,
    /// Own tiles per tile in scored words
    pub investment: AxisBounds,
    /// Tangles caused per game
    pub trapper: AxisBounds,
    /// Opponent-line contacts per turn
    pub aggression: AxisBounds,
    /// Wins per game in which the player was tangled
    pub resilience: AxisBounds,
    /// Axis value when its denominator is zero (default: 0.5)
    pub no_data_default: f64,
    /// Resilience when games were played but the player was never tangled (default: 1.0)
    pub never_tangled_resilience: f64,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            multi_word: AxisBounds::new(0.0, 0.50, 0.15),
            value: AxisBounds::new(2.0, 10.0, 5.0),
            investment: AxisBounds::new(0.30, 0.90, 0.60),
            trapper: AxisBounds::new(0.0, 1.5, 0.50),
            aggression: AxisBounds::new(0.0, 0.70, 0.25),
            resilience: AxisBounds::new(0.0, 0.80, 0.40),
            no_data_default: 0.5,
            never_tangled_resilience: 1.0,
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axes = [
            ("multi_word", &self.multi_word),
            ("value", &self.value),
            ("investment", &self.investment),
            ("trapper", &self.trapper),
            ("aggression", &self.aggression),
            ("resilience", &self.resilience),
        ];
        for (name, bounds) in axes {
            if bounds.max.partial_cmp(&bounds.min) != Some(std::cmp::Ordering::Greater) {
                return Err(ConfigError::Invalid(format!(
                    "radar axis {} needs max > min (got [{}, {}])",
                    name, bounds.min, bounds.max
                )));
            }
        }
        for (name, value) in
            [("no_data_default", self.no_data_default), ("never_tangled_resilience", self.never_tangled_resilience)]
        {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = ProfilingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.radar.aggression.max, 0.70);
        assert_eq!(cfg.radar.never_tangled_resilience, 1.0);
    }

    #[test]
    fn test_partial_yaml_override() {
        let yaml = "radar:\n  trapper:\n    min: 0.0\n    max: 3.0\n    baseline: 1.0\n";
        let cfg = ProfilingConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.radar.trapper.max, 3.0);
        assert_eq!(cfg.snapshot_interval, DEFAULT_SNAPSHOT_INTERVAL);
        assert_eq!(cfg.radar.value, RadarConfig::default().value);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = ProfilingConfig::from_json_str(r#"{"snapshot_interval": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut cfg = ProfilingConfig::default();
        cfg.radar.value = AxisBounds::new(10.0, 2.0, 5.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_normalize_clamps() {
        let bounds = AxisBounds::new(2.0, 10.0, 5.0);
        assert_eq!(bounds.normalize(0.0), 0.0);
        assert_eq!(bounds.normalize(6.0), 0.5);
        assert_eq!(bounds.normalize(50.0), 1.0);
    }
}
