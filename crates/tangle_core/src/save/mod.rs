// Persistence for ledgers and lifetime profiles
// MessagePack + LZ4 compression with versioning and integrity checks.
// Storage itself is an opaque blob store supplied by the caller.

pub mod error;
pub mod format;
pub mod migration;
pub mod repository;
pub mod store;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, BlobKind, Persisted};
pub use migration::migrate_profile;
pub use repository::ProfileRepository;
pub use store::{BlobStore, MemoryBlobStore};

pub use crate::lifetime::PROFILE_SCHEMA_VERSION;

/// Layout version of an archived or in-progress [`MatchLedger`](crate::models::MatchLedger).
pub const LEDGER_FORMAT_VERSION: u32 = 1;
