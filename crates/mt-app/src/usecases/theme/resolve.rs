use std::sync::Arc;

use tracing::debug;

use mt_core::ports::ThemeStorePort;
use mt_core::Theme;

/// Use case for picking the theme to render with: the stored choice if the
/// user made one, else the system preference.
pub struct ResolveTheme {
    theme_store: Arc<dyn ThemeStorePort>,
    prefers_dark: bool,
}

impl ResolveTheme {
    pub fn new(theme_store: Arc<dyn ThemeStorePort>, prefers_dark: bool) -> Self {
        Self {
            theme_store,
            prefers_dark,
        }
    }

    pub async fn execute(&self) -> anyhow::Result<Theme> {
        let theme = match self.theme_store.load().await? {
            Some(stored) => stored,
            None => Theme::from_system_preference(self.prefers_dark),
        };
        debug!(theme = theme.as_str(), "theme resolved");
        Ok(theme)
    }
}
