//! # tangle_core - Match Analytics and Player Profiling for Tangle
//!
//! Turns the move-by-move ledger of a finished match into per-match
//! statistics, folds those into a lifetime profile per player, and derives a
//! six-axis play-style radar from the profile every 50 games.
//!
//! ## Features
//! - Pure, deterministic calculators (same ledger = same stats)
//! - Opponent-category partitioned lifetime counters and all-time records
//! - Versioned, checksummed blob format for ledgers and profiles
//! - No I/O: storage is a caller-supplied [`save::BlobStore`]
//!
//! ## Flow
//! ```text
//! MatchLedger --calculate--> MatchStats --update_from_match--> LifetimeProfile
//!                                                                   |
//!                                           every N games: RadarSnapshot
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod lifetime;
pub mod models;
pub mod radar;
pub mod save;
pub mod session;
pub mod stats;


pub use board::{BoardGeometry, OpponentContact, HEX_DIRECTIONS};
pub use config::{AxisBounds, ProfilingConfig, RadarConfig};
pub use error::{ConfigError, ProfilingError, Result};
pub use lifetime::{LifetimeProfile, LifetimeUpdater, OpponentBlock, UpdateSummary, PROFILE_SCHEMA_VERSION};
pub use models::{
    GameOutcome, HexPos, MatchLedger, MatchResult, MoveRecord, PlayerColor, PlayerIdentity, TangleEvent,
    WordScored, Winner,
};
pub use radar::{RadarAxis, RadarCalculator, RadarDiff, RadarSnapshot};
pub use save::{BlobStore, MemoryBlobStore, ProfileRepository, SaveError};
pub use session::{FinishedMatch, MatchSession};
pub use stats::{MatchStats, MatchStatsCalculator, PlayerMatchStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
