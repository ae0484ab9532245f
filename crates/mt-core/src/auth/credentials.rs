use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialFormError {
    #[error("All fields are required")]
    MissingSignUpFields,
    #[error("Password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },
    #[error("Email and password are required")]
    MissingSignInFields,
}

/// Email/password sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), CredentialFormError> {
        if self.full_name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(CredentialFormError::MissingSignUpFields);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialFormError::PasswordTooShort {
                min_len: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

/// Email/password sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), CredentialFormError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(CredentialFormError::MissingSignInFields);
        }
        Ok(())
    }
}
