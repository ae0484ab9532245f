//! User document model.
//!
//! One record per signed-up account, keyed by [`UserId`]. The completed
//! profile is stored alongside the identity data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::profile::CompletedProfile;
use crate::session::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Google,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccount {
    pub platform: String,
    pub account_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// Stored appearance preference; `auto` defers to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub theme: ThemePreference,
    pub notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::Auto,
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub uid: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub provider: AuthProvider,
    pub email_verified: bool,
    #[serde(default)]
    pub social_accounts: Vec<SocialAccount>,
    pub last_login_at: DateTime<Utc>,
    #[serde(default)]
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<CompletedProfile>,
}

impl UserRecord {
    /// New record for an account the store has not seen yet.
    pub fn from_identity(identity: &Identity, provider: AuthProvider, now: DateTime<Utc>) -> Self {
        let social_accounts = match provider {
            AuthProvider::Google => vec![SocialAccount {
                platform: "google".to_string(),
                account_id: identity.uid.to_string(),
                email: identity.email.clone(),
                display_name: identity.display_name.clone(),
                photo_url: identity.photo_url.clone(),
            }],
            AuthProvider::Email => Vec::new(),
        };

        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
            provider,
            email_verified: identity.email_verified,
            social_accounts,
            last_login_at: now,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
            profile: None,
        }
    }

    pub fn profile_completed(&self) -> bool {
        self.profile
            .as_ref()
            .map(|profile| profile.profile_completed)
            .unwrap_or(false)
    }
}

/// Fields refreshed on every sign-in of an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginTouch {
    pub last_login_at: DateTime<Utc>,
    pub photo_url: Option<String>,
    pub display_name: Option<String>,
}
