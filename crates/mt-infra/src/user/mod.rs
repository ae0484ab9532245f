//! File-based user document store.
//!
//! One pretty-printed JSON document per user under `<base>/users/<uid>.json`.
//! The same store backs profile sync: a completed profile is written into the
//! existing user document.

use std::path::PathBuf;

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use mt_core::ports::{ProfileSyncPort, UserRepositoryPort};
use mt_core::user::{LoginTouch, UserRecord};
use mt_core::{CompletedProfile, UserId};

use crate::fs::{read_json, write_json};

pub const USERS_DIR: &str = "users";

pub struct FileUserRepository {
    users_dir: PathBuf,
}

impl FileUserRepository {
    /// Create repository rooted at `base_dir`; documents live in its `users/` child.
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            users_dir: base_dir.join(USERS_DIR),
        }
    }

    fn record_path(&self, uid: &UserId) -> PathBuf {
        self.users_dir.join(format!("{uid}.json"))
    }

    async fn load_existing(&self, uid: &UserId) -> anyhow::Result<UserRecord> {
        read_json(&self.record_path(uid))
            .await?
            .ok_or_else(|| anyhow!("User record not found: {uid}"))
    }
}

#[async_trait]
impl UserRepositoryPort for FileUserRepository {
    async fn get_by_id(&self, uid: &UserId) -> anyhow::Result<Option<UserRecord>> {
        read_json(&self.record_path(uid)).await
    }

    async fn create(&self, record: &UserRecord) -> anyhow::Result<()> {
        write_json(&self.record_path(&record.uid), record).await?;
        debug!(uid = %record.uid, "user record written");
        Ok(())
    }

    async fn touch_login(&self, uid: &UserId, touch: &LoginTouch) -> anyhow::Result<()> {
        let mut record = self.load_existing(uid).await?;
        record.last_login_at = touch.last_login_at;
        if touch.photo_url.is_some() {
            record.photo_url = touch.photo_url.clone();
        }
        if touch.display_name.is_some() {
            record.display_name = touch.display_name.clone();
        }
        record.updated_at = touch.last_login_at;
        write_json(&self.record_path(uid), &record).await
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRecord>> {
        if !self.users_dir.exists() {
            return Ok(None);
        }

        let mut entries = fs::read_dir(&self.users_dir)
            .await
            .map_err(|e| anyhow!("Failed to list user records: {e}"))?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match read_json::<UserRecord>(&path).await {
                Ok(Some(record)) if record.email.as_deref() == Some(email) => {
                    return Ok(Some(record))
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "skipping unreadable user record"),
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ProfileSyncPort for FileUserRepository {
    async fn save(&self, user_id: &UserId, profile: &CompletedProfile) -> anyhow::Result<()> {
        let mut record = self.load_existing(user_id).await?;
        record.updated_at = profile.profile_completed_at;
        record.profile = Some(profile.clone());
        write_json(&self.record_path(user_id), &record).await
    }
}
