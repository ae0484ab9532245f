//! Email/password accounts kept in a local JSON file.
//!
//! Mirrors the error codes of the hosted provider so the application layer
//! maps failures the same way. Passwords are stored as Argon2 PHC strings.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use mt_core::auth::{ProviderError, MIN_PASSWORD_LEN};
use mt_core::ports::IdentityProviderPort;
use mt_core::{AuthStatus, Identity, UserId};

use super::InMemoryAuthSession;
use crate::fs::{read_json, write_json};

pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.json";

const INTERNAL_ERROR: &str = "auth/internal-error";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAccount {
    uid: UserId,
    display_name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

type Accounts = BTreeMap<String, StoredAccount>;

pub struct LocalIdentityProvider {
    accounts_path: PathBuf,
    session: Arc<InMemoryAuthSession>,
    // Serializes read-modify-write of the accounts file.
    lock: Mutex<()>,
}

impl LocalIdentityProvider {
    pub fn new(accounts_path: PathBuf, session: Arc<InMemoryAuthSession>) -> Self {
        Self {
            accounts_path,
            session,
            lock: Mutex::new(()),
        }
    }

    pub fn with_defaults(base_dir: PathBuf, session: Arc<InMemoryAuthSession>) -> Self {
        Self::new(base_dir.join(DEFAULT_ACCOUNTS_FILE), session)
    }

    async fn load_accounts(&self) -> Result<Accounts, ProviderError> {
        read_json(&self.accounts_path)
            .await
            .map(Option::unwrap_or_default)
            .map_err(internal)
    }

    fn identity_of(account: &StoredAccount, email: &str) -> Identity {
        Identity {
            display_name: Some(account.display_name.clone()).filter(|name| !name.is_empty()),
            email: Some(email.to_string()),
            ..Identity::new(account.uid.clone())
        }
    }
}

#[async_trait]
impl IdentityProviderPort for LocalIdentityProvider {
    async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Identity, ProviderError> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::new(
                "auth/weak-password",
                format!("Password should be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }

        let _guard = self.lock.lock().await;
        let mut accounts = self.load_accounts().await?;
        if accounts.contains_key(&email) {
            return Err(ProviderError::new(
                "auth/email-already-in-use",
                "Email already registered",
            ));
        }

        let account = StoredAccount {
            uid: UserId::new(),
            display_name: display_name.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        let identity = Self::identity_of(&account, &email);
        accounts.insert(email, account);
        write_json(&self.accounts_path, &accounts)
            .await
            .map_err(internal)?;

        info!(uid = %identity.uid, "local account created");
        self.session.publish(AuthStatus::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_in_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, ProviderError> {
        let email = normalize_email(email)?;
        let accounts = {
            let _guard = self.lock.lock().await;
            self.load_accounts().await?
        };

        let account = accounts
            .get(&email)
            .filter(|account| verify_password(password, &account.password_hash))
            .ok_or_else(|| {
                debug!("local sign in rejected");
                ProviderError::new("auth/invalid-credential", "Invalid email or password")
            })?;

        let identity = Self::identity_of(account, &email);
        self.session.publish(AuthStatus::SignedIn(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.session.publish(AuthStatus::SignedOut);
        Ok(())
    }
}

fn normalize_email(email: &str) -> Result<String, ProviderError> {
    let email = email.trim().to_ascii_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ProviderError::new("auth/invalid-email", "Badly formatted email")),
    }
}

fn hash_password(password: &str) -> Result<String, ProviderError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ProviderError::new(INTERNAL_ERROR, format!("Password hashing failed: {e}")))
}

fn verify_password(password: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn internal(err: anyhow::Error) -> ProviderError {
    ProviderError::new(INTERNAL_ERROR, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_core::ports::AuthSessionPort;
    use tempfile::TempDir;

    fn provider(dir: &TempDir) -> (LocalIdentityProvider, Arc<InMemoryAuthSession>) {
        let session = Arc::new(InMemoryAuthSession::new());
        let provider = LocalIdentityProvider::with_defaults(dir.path().to_path_buf(), session.clone());
        (provider, session)
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_returns_same_uid() {
        let dir = TempDir::new().unwrap();
        let (provider, session) = provider(&dir);

        let created = provider
            .sign_up_with_email("Ada@Example.com", "secret", "Ada Lovelace")
            .await
            .unwrap();
        assert_eq!(created.display_name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(session.current(), AuthStatus::SignedIn(created.clone()));

        provider.sign_out().await.unwrap();
        assert_eq!(session.current(), AuthStatus::SignedOut);

        let signed_in = provider
            .sign_in_with_email("ada@example.com", "secret")
            .await
            .unwrap();
        assert_eq!(signed_in.uid, created.uid);
    }

    #[tokio::test]
    async fn passwords_are_not_stored_in_clear() {
        let dir = TempDir::new().unwrap();
        let (provider, _) = provider(&dir);
        provider
            .sign_up_with_email("ada@example.com", "secret", "Ada")
            .await
            .unwrap();

        let raw = tokio::fs::read_to_string(dir.path().join(DEFAULT_ACCOUNTS_FILE))
            .await
            .unwrap();
        assert!(!raw.contains("\"secret\""));
        assert!(raw.contains("$argon2"));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (provider, _) = provider(&dir);
        provider
            .sign_up_with_email("ada@example.com", "secret", "Ada")
            .await
            .unwrap();

        let err = provider
            .sign_up_with_email("ada@example.com", "another", "Ada")
            .await
            .unwrap_err();
        assert_eq!(err.code, "auth/email-already-in-use");
    }

    #[tokio::test]
    async fn malformed_email_and_short_password_use_provider_codes() {
        let dir = TempDir::new().unwrap();
        let (provider, _) = provider(&dir);

        let err = provider
            .sign_up_with_email("not-an-email", "secret", "Ada")
            .await
            .unwrap_err();
        assert_eq!(err.code, "auth/invalid-email");

        let err = provider
            .sign_up_with_email("ada@example.com", "123", "Ada")
            .await
            .unwrap_err();
        assert_eq!(err.code, "auth/weak-password");
    }

    #[tokio::test]
    async fn wrong_password_leaves_session_untouched() {
        let dir = TempDir::new().unwrap();
        let (provider, session) = provider(&dir);
        provider
            .sign_up_with_email("ada@example.com", "secret", "Ada")
            .await
            .unwrap();
        provider.sign_out().await.unwrap();

        let err = provider
            .sign_in_with_email("ada@example.com", "wrong!")
            .await
            .unwrap_err();
        assert_eq!(err.code, "auth/invalid-credential");
        assert_eq!(session.current(), AuthStatus::SignedOut);
    }
}
