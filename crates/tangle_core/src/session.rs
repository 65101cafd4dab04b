//! End-of-match orchestration.
//!
//! A [`MatchSession`] owns the in-progress ledger for one local player. When
//! the match ends it computes stats, folds them into a copy of the profile,
//! persists the new profile and then the archived ledger, and only then drops
//! the in-progress checkpoint and hands the new profile back. Any failure
//! before that point leaves the caller's profile and the checkpoint as they
//! were. The profile records which matches it has counted, so finishing a
//! resumed match again never counts it twice.

use crate::error::Result;
use crate::lifetime::{LifetimeProfile, LifetimeUpdater, UpdateSummary};
use crate::models::{MatchLedger, MatchResult, MoveRecord, PlayerColor, PlayerIdentity};
use crate::save::{BlobStore, ProfileRepository};
use crate::stats::{MatchStats, MatchStatsCalculator};

#[derive(Debug)]
pub struct MatchSession {
    ledger: MatchLedger,
    local: PlayerColor,
}

/// Everything produced by a finished match.
#[derive(Debug, Clone)]
pub struct FinishedMatch {
    pub ledger: MatchLedger,
    pub stats: MatchStats,
    /// `None` when the stored profile had already counted this match.
    pub summary: Option<UpdateSummary>,
}

impl MatchSession {
    pub fn start(player_a: PlayerIdentity, player_b: PlayerIdentity, seed: u64, local: PlayerColor) -> Result<Self> {
        let ledger = MatchLedger::create(player_a, player_b, seed)?;
        Ok(Self { ledger, local })
    }

    /// Picks up a ledger recovered from an in-progress checkpoint.
    pub fn resume(ledger: MatchLedger, local: PlayerColor) -> Self {
        Self { ledger, local }
    }

    pub fn ledger(&self) -> &MatchLedger {
        &self.ledger
    }

    pub fn local(&self) -> PlayerColor {
        self.local
    }

    pub fn local_player_id(&self) -> &str {
        &self.ledger.identity(self.local).id
    }

    pub fn capture_initial_hands(&mut self, hand_a: Vec<char>, hand_b: Vec<char>) -> Result<()> {
        self.ledger.capture_initial_hands(hand_a, hand_b)
    }

    pub fn record_move(&mut self, record: MoveRecord) -> Result<()> {
        self.ledger.add_move(record)
    }

    pub fn checkpoint<S: BlobStore>(&self, repo: &mut ProfileRepository<S>) -> Result<()> {
        repo.checkpoint_in_progress(self.local_player_id(), &self.ledger)?;
        Ok(())
    }

    /// Seals the match and folds it into `profile`.
    ///
    /// `profile` is only replaced after the updated profile and the archived
    /// ledger have both been written.
    pub fn finish<S: BlobStore>(
        mut self,
        result: MatchResult,
        profile: &mut LifetimeProfile,
        repo: &mut ProfileRepository<S>,
        updater: &LifetimeUpdater,
    ) -> Result<FinishedMatch> {
        self.ledger.complete(result)?;
        let stats = MatchStatsCalculator::calculate(&self.ledger)?;

        let mut next = profile.clone();
        let summary = if next.has_folded(stats.match_id) {
            log::warn!("Match {} already counted for {}; only archiving", stats.match_id, next.player_id);
            None
        } else {
            Some(updater.update_from_match(&mut next, &stats, self.local))
        };

        repo.save_profile(&next)?;
        repo.archive_ledger(&self.ledger)?;
        repo.discard_in_progress(self.local_player_id())?;

        log::info!(
            "Match {} finished for {} ({} lifetime games)",
            stats.match_id,
            next.player_id,
            next.total_games()
        );
        *profile = next;
        Ok(FinishedMatch { ledger: self.ledger, stats, summary })
    }

    /// Drops the match without touching any profile.
    pub fn abandon<S: BlobStore>(self, repo: &mut ProfileRepository<S>) -> Result<()> {
        repo.discard_in_progress(self.local_player_id())?;
        log::info!("Match {} abandoned after {} moves", self.ledger.id(), self.ledger.moves().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProfilingError;
    use crate::models::WordScored;
    use crate::save::{MemoryBlobStore, SaveError};

    /// Store whose writes to keys with the given prefix fail.
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryBlobStore,
        fail_prefix: String,
    }

    impl BlobStore for FailingStore {
        fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, SaveError> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, bytes: &[u8]) -> std::result::Result<(), SaveError> {
            if key.starts_with(&self.fail_prefix) {
                return Err(SaveError::Store(format!("disk full writing {}", key)));
            }
            self.inner.put(key, bytes)
        }

        fn delete(&mut self, key: &str) -> std::result::Result<(), SaveError> {
            self.inner.delete(key)
        }

        fn keys(&self, prefix: &str) -> std::result::Result<Vec<String>, SaveError> {
            self.inner.keys(prefix)
        }
    }

    fn session() -> MatchSession {
        let mut session = MatchSession::start(
            PlayerIdentity::human("ann", "Ann"),
            PlayerIdentity::ai("bot", "Bot"),
            5,
            PlayerColor::A,
        )
        .unwrap();
        session
            .record_move(MoveRecord::new(1, PlayerColor::A, 'T').with_word(WordScored::new("CAT", 5, 2, 3)))
            .unwrap();
        session.record_move(MoveRecord::new(2, PlayerColor::B, 'X')).unwrap();
        session
    }

    #[test]
    fn test_finish_persists_and_clears_checkpoint() {
        let mut repo = ProfileRepository::new(MemoryBlobStore::new());
        let mut profile = LifetimeProfile::new("ann");
        let session = session();
        session.checkpoint(&mut repo).unwrap();

        let finished = session
            .finish(MatchResult::by_score(5, 0, 2), &mut profile, &mut repo, &LifetimeUpdater::default())
            .unwrap();

        assert_eq!(profile.vs_ai.wins, 1);
        assert_eq!(repo.load_profile("ann").unwrap(), Some(profile.clone()));
        assert_eq!(repo.load_in_progress("ann").unwrap(), None);
        assert_eq!(repo.archived_match_ids().unwrap(), vec![finished.ledger.id()]);
        assert_eq!(finished.stats.player_a.words_scored, 1);
        assert!(profile.has_folded(finished.ledger.id()));
    }

    #[test]
    fn test_retry_after_failed_archive_counts_once() {
        let store = FailingStore { fail_prefix: "ledgers/".to_string(), ..FailingStore::default() };
        let mut repo = ProfileRepository::new(store);
        let mut profile = LifetimeProfile::new("ann");
        session().checkpoint(&mut repo).unwrap();

        let ledger = repo.load_in_progress("ann").unwrap().unwrap();
        let err = MatchSession::resume(ledger, PlayerColor::A)
            .finish(MatchResult::by_score(5, 0, 2), &mut profile, &mut repo, &LifetimeUpdater::default())
            .unwrap_err();
        assert!(matches!(err, ProfilingError::Save(SaveError::Store(_))));

        // The profile write landed before the archive failed.
        let mut stored = repo.load_profile("ann").unwrap().unwrap();
        assert_eq!(stored.total_games(), 1);

        repo.store_mut().fail_prefix = "never/".to_string();
        let ledger = repo.load_in_progress("ann").unwrap().unwrap();
        let finished = MatchSession::resume(ledger, PlayerColor::A)
            .finish(MatchResult::by_score(5, 0, 2), &mut stored, &mut repo, &LifetimeUpdater::default())
            .unwrap();

        assert!(finished.summary.is_none());
        assert_eq!(stored.total_games(), 1);
        assert_eq!(repo.archived_match_ids().unwrap(), vec![finished.ledger.id()]);
        assert_eq!(repo.load_in_progress("ann").unwrap(), None);
    }

    #[test]
    fn test_failed_profile_write_leaves_profile_and_checkpoint() {
        let store = FailingStore { fail_prefix: "profiles/".to_string(), ..FailingStore::default() };
        let mut repo = ProfileRepository::new(store);
        let mut profile = LifetimeProfile::new("ann");
        let session = session();
        session.checkpoint(&mut repo).unwrap();

        let err = session
            .finish(MatchResult::by_score(5, 0, 2), &mut profile, &mut repo, &LifetimeUpdater::default())
            .unwrap_err();

        assert!(matches!(err, ProfilingError::Save(SaveError::Store(_))));
        assert_eq!(profile, LifetimeProfile::new("ann"));
        assert!(repo.load_in_progress("ann").unwrap().is_some());
    }

    #[test]
    fn test_abandon_leaves_profile_untouched() {
        let mut repo = ProfileRepository::new(MemoryBlobStore::new());
        let profile = LifetimeProfile::new("ann");
        repo.save_profile(&profile).unwrap();
        let session = session();
        session.checkpoint(&mut repo).unwrap();

        session.abandon(&mut repo).unwrap();

        assert_eq!(repo.load_in_progress("ann").unwrap(), None);
        assert_eq!(repo.load_profile("ann").unwrap(), Some(profile));
        assert!(repo.archived_match_ids().unwrap().is_empty());
    }

    #[test]
    fn test_resume_from_checkpoint() {
        let mut repo = ProfileRepository::new(MemoryBlobStore::new());
        session().checkpoint(&mut repo).unwrap();

        let ledger = repo.load_in_progress("ann").unwrap().unwrap();
        let mut resumed = MatchSession::resume(ledger, PlayerColor::A);
        resumed.record_move(MoveRecord::new(3, PlayerColor::A, 'S')).unwrap();
        assert_eq!(resumed.ledger().moves().len(), 3);
        assert_eq!(resumed.local_player_id(), "ann");
    }
}
