//! Authenticated session model.
//!
//! The identity provider owns sign-in; this module only describes what the
//! rest of the app can observe about it.

mod prefill;

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

pub use prefill::ProfilePrefill;

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: UserId,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
}

impl Identity {
    pub fn new(uid: impl Into<UserId>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
            email_verified: false,
        }
    }
}

/// Tri-state session status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "identity", rename_all = "camelCase")]
pub enum AuthStatus {
    /// The provider has not reported yet.
    #[default]
    Loading,
    SignedIn(Identity),
    SignedOut,
}

impl AuthStatus {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthStatus::SignedIn(identity) => Some(identity),
            AuthStatus::Loading | AuthStatus::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthStatus::SignedIn(_))
    }
}

/// What a signed-in-only screen should do for a given session status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Keep waiting (show a spinner).
    Pending,
    /// No user; the host should route to sign-up.
    RedirectToSignUp,
    Ready(Identity),
}

pub fn resolve_access(status: &AuthStatus) -> Access {
    match status {
        AuthStatus::Loading => Access::Pending,
        AuthStatus::SignedOut => Access::RedirectToSignUp,
        AuthStatus::SignedIn(identity) => Access::Ready(identity.clone()),
    }
}
