//! # Lifetime Profiling
//!
//! Cumulative per-player aggregates, partitioned by opponent category, and
//! the updater that folds each finished match into them.

mod profile;
mod updater;

pub use profile::{
    AllTimeRecords, LifetimeProfile, OpponentBlock, ScoreRecord, WordRecord, PROFILE_SCHEMA_VERSION,
};
pub use updater::{LifetimeUpdater, UpdateSummary};
