//! Authentication domain module.
//!
//! Credential-form checks run before the identity provider is called;
//! provider failures are normalized into [`AuthError`].

mod credentials;
mod error;

pub use credentials::{CredentialFormError, SignInForm, SignUpForm, MIN_PASSWORD_LEN};
pub use error::{AuthError, ProviderError};
