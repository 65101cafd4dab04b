use thiserror::Error;

use super::format::BlobKind;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Blob kind mismatch: found {found:?}, expected {expected:?}")]
    KindMismatch { found: BlobKind, expected: BlobKind },

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Blob not found: {key}")]
    NotFound { key: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl SaveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Store(_) => true,
            SaveError::NotFound { .. } => true,
            SaveError::VersionMismatch { .. } => true, // Can try migration
            SaveError::Corrupted => false,
            SaveError::ChecksumMismatch => false,
            SaveError::KindMismatch { .. } => false,
            _ => false,
        }
    }
}
