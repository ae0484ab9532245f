use async_trait::async_trait;

use crate::ids::UserId;
use crate::user::{LoginTouch, UserRecord};

#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    async fn get_by_id(&self, uid: &UserId) -> anyhow::Result<Option<UserRecord>>;

    async fn create(&self, record: &UserRecord) -> anyhow::Result<()>;

    /// Refreshes login-related fields of an existing record.
    async fn touch_login(&self, uid: &UserId, touch: &LoginTouch) -> anyhow::Result<()>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>>;
}
