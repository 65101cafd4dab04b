use chrono::Utc;
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::SaveError;
use super::{LEDGER_FORMAT_VERSION, PROFILE_SCHEMA_VERSION};
use crate::lifetime::LifetimeProfile;
use crate::models::MatchLedger;

const CHECKSUM_LEN: usize = 32;

/// What a blob holds. Stored in the envelope so a profile can never be
/// decoded as a ledger or the other way round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Profile,
    Ledger,
}

/// An aggregate that can be written to the blob store.
pub trait Persisted: Serialize + DeserializeOwned {
    const KIND: BlobKind;
    /// Newest layout this build can read.
    const CURRENT_VERSION: u32;

    /// Layout version the value itself claims.
    fn stored_version(&self) -> u32 {
        Self::CURRENT_VERSION
    }
}

impl Persisted for LifetimeProfile {
    const KIND: BlobKind = BlobKind::Profile;
    const CURRENT_VERSION: u32 = PROFILE_SCHEMA_VERSION;

    fn stored_version(&self) -> u32 {
        self.schema_version
    }
}

impl Persisted for MatchLedger {
    const KIND: BlobKind = BlobKind::Ledger;
    const CURRENT_VERSION: u32 = LEDGER_FORMAT_VERSION;
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    kind: BlobKind,
    version: u32,
    /// Unix milliseconds
    saved_at: i64,
    payload: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    kind: BlobKind,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    payload: T,
}

/// Serialize and compress an aggregate
pub fn serialize_and_compress<T: Persisted>(value: &T) -> Result<Vec<u8>, SaveError> {
    let envelope = EnvelopeRef {
        kind: T::KIND,
        version: value.stored_version(),
        saved_at: Utc::now().timestamp_millis(),
        payload: value,
    };

    // 1. MessagePack with field names, so the header can be read on its own
    let msgpack = to_vec_named(&envelope)?;

    // 2. LZ4 (size prepended for easy decompression)
    let compressed = compress_prepend_size(&msgpack);

    // 3. SHA256 checksum at the end
    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Decompress and deserialize an aggregate
pub fn decompress_and_deserialize<T: Persisted>(bytes: &[u8]) -> Result<T, SaveError> {
    // Size prefix + checksum at minimum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(SaveError::Corrupted);
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();
    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;

    // Header first: a newer layout may not decode into T at all.
    let header: EnvelopeHeader = from_slice(&msgpack)?;
    if header.kind != T::KIND {
        return Err(SaveError::KindMismatch { found: header.kind, expected: T::KIND });
    }
    if header.version > T::CURRENT_VERSION {
        return Err(SaveError::VersionMismatch { found: header.version, expected: T::CURRENT_VERSION });
    }

    let envelope: Envelope<T> = from_slice(&msgpack)?;
    Ok(envelope.payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerIdentity;

    #[test]
    fn test_profile_roundtrip() {
        let mut profile = LifetimeProfile::new("ann");
        profile.vs_ai.games_played = 3;
        profile.letter_frequency.insert('E', 9);
        profile.word_frequency.insert("TANGLE".to_string(), 2);

        let bytes = serialize_and_compress(&profile).unwrap();
        let decoded: LifetimeProfile = decompress_and_deserialize(&bytes).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = serialize_and_compress(&LifetimeProfile::new("ann")).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        let result = decompress_and_deserialize::<LifetimeProfile>(&bytes);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_blob_is_corrupted() {
        let result = decompress_and_deserialize::<LifetimeProfile>(&[1, 2, 3]);
        assert!(matches!(result, Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_kind_mismatch() {
        let ledger =
            MatchLedger::create(PlayerIdentity::human("ann", "Ann"), PlayerIdentity::ai("bot", "Bot"), 3).unwrap();
        let bytes = serialize_and_compress(&ledger).unwrap();
        let result = decompress_and_deserialize::<LifetimeProfile>(&bytes);
        assert!(matches!(
            result,
            Err(SaveError::KindMismatch { found: BlobKind::Ledger, expected: BlobKind::Profile })
        ));
    }

    #[test]
    fn test_future_profile_version_rejected() {
        let mut profile = LifetimeProfile::new("ann");
        profile.schema_version = PROFILE_SCHEMA_VERSION + 1;
        let bytes = serialize_and_compress(&profile).unwrap();
        let result = decompress_and_deserialize::<LifetimeProfile>(&bytes);
        assert!(matches!(result, Err(SaveError::VersionMismatch { .. })));
    }
}
