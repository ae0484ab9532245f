//! File-based theme preference repository.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use mt_core::ports::ThemeStorePort;
use mt_core::Theme;

use crate::fs::{read_json, write_json};

pub const DEFAULT_THEME_FILE: &str = "theme.json";

#[derive(Debug, Serialize, Deserialize)]
struct StoredTheme {
    theme: Theme,
}

pub struct FileThemeRepository {
    theme_file_path: PathBuf,
}

impl FileThemeRepository {
    pub fn new(theme_file_path: PathBuf) -> Self {
        Self { theme_file_path }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_THEME_FILE))
    }
}

#[async_trait]
impl ThemeStorePort for FileThemeRepository {
    async fn load(&self) -> anyhow::Result<Option<Theme>> {
        let stored: Option<StoredTheme> = read_json(&self.theme_file_path).await?;
        Ok(stored.map(|s| s.theme))
    }

    async fn save(&self, theme: Theme) -> anyhow::Result<()> {
        write_json(&self.theme_file_path, &StoredTheme { theme }).await
    }
}
