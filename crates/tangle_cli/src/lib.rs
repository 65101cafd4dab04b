//! Tangle profiling tools
//!
//! Ledger JSON -> Match Stats, and fold/inspect stored lifetime profiles
//! kept in a [`FileBlobStore`] directory.

pub mod file_store;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use tangle_core::{
    LifetimeProfile, LifetimeUpdater, MatchLedger, MatchStats, MatchStatsCalculator, ProfileRepository,
    ProfilingConfig, RadarCalculator, RadarDiff, RadarSnapshot, UpdateSummary,
};

pub use file_store::FileBlobStore;

/// One axis of the current radar, labelled for display.
#[derive(Debug, Clone, Serialize)]
pub struct AxisReading {
    pub axis: &'static str,
    pub description: &'static str,
    pub value: f64,
}

/// Radar view of one profile: the current snapshot plus the stored history.
#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub player_id: String,
    pub total_games: u32,
    pub win_rate_vs_ai: f64,
    pub win_rate_vs_human: f64,
    pub axes: Vec<AxisReading>,
    pub current: RadarSnapshot,
    pub history: Vec<RadarSnapshot>,
    /// Change since the last stored snapshot, when there is one.
    pub since_last: Option<RadarDiff>,
}

pub fn load_ledger(path: &Path) -> Result<MatchLedger> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read ledger file: {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse ledger JSON: {}", path.display()))
}

/// Tunables from a YAML file, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<ProfilingConfig> {
    let Some(path) = path else {
        return Ok(ProfilingConfig::default());
    };
    let yaml = fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = ProfilingConfig::from_yaml_str(&yaml)
        .with_context(|| format!("Invalid profiling config: {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn compute_stats(ledger_path: &Path) -> Result<MatchStats> {
    let ledger = load_ledger(ledger_path)?;
    MatchStatsCalculator::calculate(&ledger).context("Failed to calculate match stats")
}

/// Folds a finished ledger into `player_id`'s stored profile and archives the
/// ledger.
///
/// The profile is written first and remembers the match id, so a failed
/// archive is repaired by running the fold again without counting the match
/// twice. A match the profile already counted is rejected.
pub fn fold_ledger(
    store_dir: &Path,
    ledger_path: &Path,
    player_id: &str,
    config: &ProfilingConfig,
) -> Result<(LifetimeProfile, UpdateSummary)> {
    let ledger = load_ledger(ledger_path)?;
    if ledger.is_in_progress() {
        bail!("Match {} has not finished yet", ledger.id());
    }
    let Some(color) = ledger.color_of(player_id) else {
        bail!("Player {} did not take part in match {}", player_id, ledger.id());
    };

    let mut repo = ProfileRepository::new(FileBlobStore::new(store_dir));
    let mut profile =
        repo.load_or_create_profile(player_id).with_context(|| format!("Failed to load profile {}", player_id))?;

    if profile.has_folded(ledger.id()) {
        let archived = repo.archived_match_ids().context("Failed to list archived matches")?;
        if !archived.contains(&ledger.id()) {
            repo.archive_ledger(&ledger).with_context(|| format!("Failed to archive match {}", ledger.id()))?;
            log::warn!("Archived match {} left over from an earlier fold", ledger.id());
        }
        bail!("Match {} was already folded into {}", ledger.id(), player_id);
    }

    let stats = MatchStatsCalculator::calculate(&ledger).context("Failed to calculate match stats")?;
    let summary = LifetimeUpdater::new(config).update_from_match(&mut profile, &stats, color);

    repo.save_profile(&profile).with_context(|| format!("Failed to save profile {}", player_id))?;
    repo.archive_ledger(&ledger).with_context(|| format!("Failed to archive match {}", ledger.id()))?;
    Ok((profile, summary))
}

pub fn load_profile(store_dir: &Path, player_id: &str) -> Result<LifetimeProfile> {
    let repo = ProfileRepository::new(FileBlobStore::new(store_dir));
    match repo.load_profile(player_id).with_context(|| format!("Failed to load profile {}", player_id))? {
        Some(profile) => Ok(profile),
        None => bail!("No profile stored for {}", player_id),
    }
}

pub fn radar_report(store_dir: &Path, player_id: &str, config: &ProfilingConfig) -> Result<RadarReport> {
    let profile = load_profile(store_dir, player_id)?;
    let current = RadarCalculator::new(config.radar.clone()).create_snapshot(&profile);
    let since_last = profile.latest_snapshot().map(|last| current.diff(last));
    let axes = current
        .axes()
        .into_iter()
        .map(|(axis, value)| AxisReading { axis: axis.name(), description: axis.description(), value })
        .collect();
    Ok(RadarReport {
        player_id: profile.player_id.clone(),
        total_games: profile.total_games(),
        win_rate_vs_ai: profile.vs_ai.win_rate(),
        win_rate_vs_human: profile.vs_human.win_rate(),
        axes,
        current,
        history: profile.radar_history.clone(),
        since_last,
    })
}
