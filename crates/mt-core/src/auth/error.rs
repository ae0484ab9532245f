use serde::{Deserialize, Serialize};

/// Raw failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ProviderError {
    pub code: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// User-facing authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("An account already exists with the same email address but different sign-in credentials.")]
    AccountExistsWithDifferentCredential,
    #[error("Authentication domain configuration is required.")]
    AuthDomainConfigRequired,
    #[error("Sign-in popup was cancelled.")]
    CancelledPopupRequest,
    #[error("Google sign-in is not enabled for this project.")]
    OperationNotAllowed,
    #[error("This operation is not supported in the current environment.")]
    OperationNotSupported,
    #[error("Sign-in popup was blocked by the browser.")]
    PopupBlocked,
    #[error("Sign-in popup was closed before completing the sign-in.")]
    PopupClosedByUser,
    #[error("This domain is not authorized for OAuth operations.")]
    UnauthorizedDomain,
    #[error("This user account has been disabled.")]
    UserDisabled,
    #[error("The email address is already in use by another account.")]
    EmailAlreadyInUse,
    #[error("The email address is not valid.")]
    InvalidEmail,
    #[error("The password is too weak.")]
    WeakPassword,
    #[error("{0}")]
    Other(String),
}

const GENERIC_AUTH_MESSAGE: &str = "An authentication error occurred.";

impl AuthError {
    pub fn from_provider(error: &ProviderError) -> Self {
        match error.code.as_str() {
            "auth/account-exists-with-different-credential" => {
                AuthError::AccountExistsWithDifferentCredential
            }
            "auth/auth-domain-config-required" => AuthError::AuthDomainConfigRequired,
            "auth/cancelled-popup-request" => AuthError::CancelledPopupRequest,
            "auth/operation-not-allowed" => AuthError::OperationNotAllowed,
            "auth/operation-not-supported-in-this-environment" => AuthError::OperationNotSupported,
            "auth/popup-blocked" => AuthError::PopupBlocked,
            "auth/popup-closed-by-user" => AuthError::PopupClosedByUser,
            "auth/unauthorized-domain" => AuthError::UnauthorizedDomain,
            "auth/user-disabled" => AuthError::UserDisabled,
            "auth/email-already-in-use" => AuthError::EmailAlreadyInUse,
            "auth/invalid-email" => AuthError::InvalidEmail,
            "auth/weak-password" => AuthError::WeakPassword,
            _ if error.message.is_empty() => AuthError::Other(GENERIC_AUTH_MESSAGE.to_string()),
            _ => AuthError::Other(error.message.clone()),
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(error: ProviderError) -> Self {
        AuthError::from_provider(&error)
    }
}
