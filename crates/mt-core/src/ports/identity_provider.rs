use async_trait::async_trait;

use crate::auth::ProviderError;
use crate::session::Identity;

/// Password and session operations of the hosted identity provider.
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError>;

    async fn sign_in_with_email(&self, email: &str, password: &str)
        -> Result<Identity, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}
