use async_trait::async_trait;

use crate::theme::Theme;

#[async_trait]
pub trait ThemeStorePort: Send + Sync {
    /// Stored theme, `None` if the user never picked one.
    async fn load(&self) -> anyhow::Result<Option<Theme>>;
    async fn save(&self, theme: Theme) -> anyhow::Result<()>;
}
