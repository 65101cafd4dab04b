use super::error::SaveError;
use super::PROFILE_SCHEMA_VERSION;
use crate::lifetime::LifetimeProfile;

/// Bring a loaded profile to the current schema version.
///
/// Only the version gate lives here for now: current profiles pass through,
/// anything else is reported so the caller can keep the original blob.
pub fn migrate_profile(profile: LifetimeProfile) -> Result<LifetimeProfile, SaveError> {
    match profile.schema_version {
        PROFILE_SCHEMA_VERSION => Ok(profile),
        v if v > PROFILE_SCHEMA_VERSION => {
            log::warn!(
                "Profile {} is from a newer schema {} (current: {})",
                profile.player_id,
                v,
                PROFILE_SCHEMA_VERSION
            );
            Err(SaveError::VersionMismatch { found: v, expected: PROFILE_SCHEMA_VERSION })
        }
        v => {
            log::warn!("No migration path for profile {} from schema {}", profile.player_id, v);
            Err(SaveError::VersionMismatch { found: v, expected: PROFILE_SCHEMA_VERSION })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_passes() {
        let profile = LifetimeProfile::new("ann");
        assert_eq!(migrate_profile(profile.clone()).unwrap(), profile);
    }

    #[test]
    fn test_old_version_reported() {
        let mut profile = LifetimeProfile::new("ann");
        profile.schema_version = 0;
        let err = migrate_profile(profile).unwrap_err();
        assert!(matches!(err, SaveError::VersionMismatch { found: 0, .. }));
        assert!(err.is_recoverable());
    }
}
