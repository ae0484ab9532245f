use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use mt_core::ports::ProfileSyncPort;
use mt_core::{CompletedProfile, UserId};

#[derive(Debug, thiserror::Error)]
pub enum SubmitProfileError {
    #[error("profile sync failed: {0}")]
    Sync(#[source] anyhow::Error),
}

/// Use case for persisting a completed profile under the user's document.
pub struct SubmitProfile {
    profile_sync: Arc<dyn ProfileSyncPort>,
}

impl SubmitProfile {
    pub fn new(profile_sync: Arc<dyn ProfileSyncPort>) -> Self {
        Self { profile_sync }
    }

    pub fn from_ports(profile_sync: Arc<dyn ProfileSyncPort>) -> Self {
        Self::new(profile_sync)
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        profile: &CompletedProfile,
    ) -> Result<(), SubmitProfileError> {
        let span = info_span!("usecase.submit_profile.execute", user_id = %user_id);
        async {
            self.profile_sync
                .save(user_id, profile)
                .await
                .map_err(SubmitProfileError::Sync)?;
            info!(completed_at = %profile.completed_at_iso(), "profile saved");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mockall::{mock, predicate::*};
    use mt_core::FormData;

    mock! {
        ProfileSync {}

        #[async_trait::async_trait]
        impl ProfileSyncPort for ProfileSync {
            async fn save(&self, user_id: &UserId, profile: &CompletedProfile) -> anyhow::Result<()>;
        }
    }

    fn profile() -> CompletedProfile {
        CompletedProfile::new(
            FormData {
                first_name: "Ada".into(),
                ..Default::default()
            },
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn execute_saves_under_the_given_user() {
        let mut sync = MockProfileSync::new();
        sync.expect_save()
            .with(eq(UserId::from("u1")), always())
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = SubmitProfile::new(Arc::new(sync));
        use_case.execute(&UserId::from("u1"), &profile()).await.unwrap();
    }

    #[tokio::test]
    async fn execute_wraps_sync_failures() {
        let mut sync = MockProfileSync::new();
        sync.expect_save()
            .returning(|_, _| Err(anyhow::anyhow!("permission denied")));

        let use_case = SubmitProfile::from_ports(Arc::new(sync));
        let err = use_case
            .execute(&UserId::from("u1"), &profile())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitProfileError::Sync(_)));
        assert!(err.to_string().contains("permission denied"));
    }
}
