use std::sync::Arc;

use tracing::info;

use mt_core::ports::ThemeStorePort;
use mt_core::Theme;

use super::ResolveTheme;

/// Use case for flipping between light and dark and remembering the choice.
pub struct ToggleTheme {
    theme_store: Arc<dyn ThemeStorePort>,
    resolve: ResolveTheme,
}

impl ToggleTheme {
    pub fn new(theme_store: Arc<dyn ThemeStorePort>, prefers_dark: bool) -> Self {
        Self {
            resolve: ResolveTheme::new(theme_store.clone(), prefers_dark),
            theme_store,
        }
    }

    /// Returns the newly active theme.
    pub async fn execute(&self) -> anyhow::Result<Theme> {
        let next = self.resolve.execute().await?.toggled();
        self.theme_store.save(next).await?;
        info!(theme = next.as_str(), "theme toggled");
        Ok(next)
    }
}
