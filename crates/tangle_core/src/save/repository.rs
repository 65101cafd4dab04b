use uuid::Uuid;

use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress};
use super::migration::migrate_profile;
use super::store::BlobStore;
use crate::lifetime::LifetimeProfile;
use crate::models::MatchLedger;

const PROFILE_PREFIX: &str = "profiles/";
const LEDGER_PREFIX: &str = "ledgers/";
const IN_PROGRESS_PREFIX: &str = "in_progress/";

/// Profiles, archived ledgers and in-progress checkpoints on top of a
/// [`BlobStore`].
#[derive(Debug, Clone, Default)]
pub struct ProfileRepository<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> ProfileRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load_profile(&self, player_id: &str) -> Result<Option<LifetimeProfile>, SaveError> {
        let Some(bytes) = self.store.get(&profile_key(player_id))? else {
            return Ok(None);
        };
        let profile = migrate_profile(decompress_and_deserialize(&bytes)?)?;
        log::debug!("Loaded profile {} ({} bytes)", player_id, bytes.len());
        Ok(Some(profile))
    }

    /// Stored profile, or a fresh one if the player has none yet.
    pub fn load_or_create_profile(&self, player_id: &str) -> Result<LifetimeProfile, SaveError> {
        match self.load_profile(player_id)? {
            Some(profile) => Ok(profile),
            None => {
                log::info!("Creating new profile for {}", player_id);
                Ok(LifetimeProfile::new(player_id))
            }
        }
    }

    pub fn save_profile(&mut self, profile: &LifetimeProfile) -> Result<(), SaveError> {
        let bytes = serialize_and_compress(profile)?;
        self.store.put(&profile_key(&profile.player_id), &bytes)?;
        log::debug!("Saved profile {} ({} bytes)", profile.player_id, bytes.len());
        Ok(())
    }

    /// Stores a completed ledger as a historical artifact.
    pub fn archive_ledger(&mut self, ledger: &MatchLedger) -> Result<(), SaveError> {
        if ledger.is_in_progress() {
            return Err(SaveError::Store(format!("match {} is still in progress", ledger.id())));
        }
        let bytes = serialize_and_compress(ledger)?;
        self.store.put(&ledger_key(ledger.id()), &bytes)?;
        log::debug!("Archived match {} ({} bytes)", ledger.id(), bytes.len());
        Ok(())
    }

    pub fn load_archived_ledger(&self, match_id: Uuid) -> Result<MatchLedger, SaveError> {
        let key = ledger_key(match_id);
        let bytes = self.store.get(&key)?.ok_or(SaveError::NotFound { key })?;
        decompress_and_deserialize(&bytes)
    }

    pub fn archived_match_ids(&self) -> Result<Vec<Uuid>, SaveError> {
        Ok(self
            .store
            .keys(LEDGER_PREFIX)?
            .iter()
            .filter_map(|key| Uuid::parse_str(&key[LEDGER_PREFIX.len()..]).ok())
            .collect())
    }

    /// Writes the active ledger so a crash mid-match can resume it.
    pub fn checkpoint_in_progress(&mut self, player_id: &str, ledger: &MatchLedger) -> Result<(), SaveError> {
        let bytes = serialize_and_compress(ledger)?;
        self.store.put(&in_progress_key(player_id), &bytes)
    }

    pub fn load_in_progress(&self, player_id: &str) -> Result<Option<MatchLedger>, SaveError> {
        match self.store.get(&in_progress_key(player_id))? {
            Some(bytes) => Ok(Some(decompress_and_deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn discard_in_progress(&mut self, player_id: &str) -> Result<(), SaveError> {
        self.store.delete(&in_progress_key(player_id))
    }
}

fn profile_key(player_id: &str) -> String {
    format!("{}{}", PROFILE_PREFIX, player_id)
}

fn ledger_key(match_id: Uuid) -> String {
    format!("{}{}", LEDGER_PREFIX, match_id)
}

fn in_progress_key(player_id: &str) -> String {
    format!("{}{}", IN_PROGRESS_PREFIX, player_id)
}
