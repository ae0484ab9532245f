use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use mt_core::ports::{ClockPort, UserRepositoryPort};
use mt_core::user::{AuthProvider, LoginTouch, UserRecord};
use mt_core::Identity;

/// Use case for creating the user document on first sign-in and refreshing
/// its login fields afterwards.
pub struct EnsureUserRecord {
    user_repo: Arc<dyn UserRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl EnsureUserRecord {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { user_repo, clock }
    }

    pub fn from_ports(user_repo: Arc<dyn UserRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self::new(user_repo, clock)
    }

    /// Returns `true` when a new record was created.
    pub async fn execute(&self, identity: &Identity, provider: AuthProvider) -> anyhow::Result<bool> {
        let span = info_span!("usecase.ensure_user_record.execute", uid = %identity.uid);
        async {
            let now = self.clock.now();
            if self.user_repo.get_by_id(&identity.uid).await?.is_some() {
                let touch = LoginTouch {
                    last_login_at: now,
                    photo_url: identity.photo_url.clone(),
                    display_name: identity.display_name.clone(),
                };
                self.user_repo.touch_login(&identity.uid, &touch).await?;
                return Ok(false);
            }

            let record = UserRecord::from_identity(identity, provider, now);
            self.user_repo.create(&record).await?;
            info!(provider = ?provider, "user record created");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
