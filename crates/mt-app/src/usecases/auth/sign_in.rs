use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span, Instrument};

use mt_core::auth::{AuthError, CredentialFormError, SignInForm};
use mt_core::ports::IdentityProviderPort;
use mt_core::user::AuthProvider;
use mt_core::Identity;

use super::EnsureUserRecord;

/// Banner shown for every sign-in failure past form validation.
pub const SIGN_IN_FAILED_MESSAGE: &str =
    "Sign in failed. Please check your credentials and try again.";

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error(transparent)]
    Form(#[from] CredentialFormError),
    #[error("a sign-in is already in progress")]
    InProgress,
    #[error("Sign in failed. Please check your credentials and try again.")]
    Failed(#[source] anyhow::Error),
}

/// Use case for signing in with email and password.
///
/// Only one sign-in runs at a time; overlapping calls are rejected.
pub struct SignInWithEmail {
    identity_provider: Arc<dyn IdentityProviderPort>,
    ensure_user_record: Arc<EnsureUserRecord>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SignInWithEmail {
    pub fn new(
        identity_provider: Arc<dyn IdentityProviderPort>,
        ensure_user_record: Arc<EnsureUserRecord>,
    ) -> Self {
        Self {
            identity_provider,
            ensure_user_record,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn execute(&self, form: &SignInForm) -> Result<Identity, SignInError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SignInError::InProgress);
        }
        let _guard = InFlightGuard(&self.in_flight);

        form.validate()?;

        let span = info_span!("usecase.sign_in_with_email.execute");
        async {
            let identity = self
                .identity_provider
                .sign_in_with_email(&form.email, &form.password)
                .await
                .map_err(|e| {
                    let mapped = AuthError::from_provider(&e);
                    error!(code = %e.code, error = %mapped, "email sign in failed");
                    SignInError::Failed(mapped.into())
                })?;

            self.ensure_user_record
                .execute(&identity, AuthProvider::Email)
                .await
                .map_err(|e| {
                    error!(error = %e, "failed to refresh user record");
                    SignInError::Failed(e)
                })?;

            info!(uid = %identity.uid, "signed in");
            Ok(identity)
        }
        .instrument(span)
        .await
    }
}
