use std::sync::Arc;

use tracing::{error, info};

use mt_core::auth::AuthError;
use mt_core::ports::IdentityProviderPort;

/// Use case for ending the current session.
pub struct SignOut {
    identity_provider: Arc<dyn IdentityProviderPort>,
}

impl SignOut {
    pub fn new(identity_provider: Arc<dyn IdentityProviderPort>) -> Self {
        Self { identity_provider }
    }

    pub fn from_ports(identity_provider: Arc<dyn IdentityProviderPort>) -> Self {
        Self::new(identity_provider)
    }

    pub async fn execute(&self) -> Result<(), AuthError> {
        self.identity_provider.sign_out().await.map_err(|e| {
            error!(code = %e.code, "sign out failed");
            AuthError::from_provider(&e)
        })?;
        info!("signed out");
        Ok(())
    }
}
