use std::sync::Arc;

use tracing::{error, info, info_span, Instrument};

use mt_core::auth::{AuthError, CredentialFormError, SignUpForm};
use mt_core::ports::IdentityProviderPort;
use mt_core::user::AuthProvider;
use mt_core::Identity;

use super::EnsureUserRecord;

#[derive(Debug, thiserror::Error)]
pub enum SignUpError {
    #[error(transparent)]
    Form(#[from] CredentialFormError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("failed to create user record: {0}")]
    Record(#[source] anyhow::Error),
}

/// Use case for creating an account with email and password.
pub struct SignUpWithEmail {
    identity_provider: Arc<dyn IdentityProviderPort>,
    ensure_user_record: Arc<EnsureUserRecord>,
}

impl SignUpWithEmail {
    pub fn new(
        identity_provider: Arc<dyn IdentityProviderPort>,
        ensure_user_record: Arc<EnsureUserRecord>,
    ) -> Self {
        Self {
            identity_provider,
            ensure_user_record,
        }
    }

    pub async fn execute(&self, form: &SignUpForm) -> Result<Identity, SignUpError> {
        form.validate()?;

        let span = info_span!("usecase.sign_up_with_email.execute");
        async {
            let identity = self
                .identity_provider
                .sign_up_with_email(&form.email, &form.password, &form.full_name)
                .await
                .map_err(|e| {
                    error!(code = %e.code, "email sign up failed");
                    AuthError::from_provider(&e)
                })?;

            self.ensure_user_record
                .execute(&identity, AuthProvider::Email)
                .await
                .map_err(SignUpError::Record)?;

            info!(uid = %identity.uid, "account created");
            Ok(identity)
        }
        .instrument(span)
        .await
    }
}
