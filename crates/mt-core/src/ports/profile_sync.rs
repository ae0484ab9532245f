use async_trait::async_trait;

use crate::ids::UserId;
use crate::profile::CompletedProfile;

/// Persists the completed profile under the user's document.
///
/// Callers treat every failure the same way; the error only feeds logs.
#[async_trait]
pub trait ProfileSyncPort: Send + Sync {
    async fn save(&self, user_id: &UserId, profile: &CompletedProfile) -> anyhow::Result<()>;
}
