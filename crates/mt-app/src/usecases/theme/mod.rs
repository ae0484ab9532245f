//! Appearance use cases.

mod resolve;
mod toggle;

pub use resolve::ResolveTheme;
pub use toggle::ToggleTheme;

#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::Mutex;

    use mt_core::ports::ThemeStorePort;
    use mt_core::Theme;

    #[derive(Default)]
    pub(crate) struct MockThemeStore {
        pub stored: Mutex<Option<Theme>>,
    }

    #[async_trait::async_trait]
    impl ThemeStorePort for MockThemeStore {
        async fn load(&self) -> anyhow::Result<Option<Theme>> {
            Ok(*self.stored.lock().unwrap())
        }

        async fn save(&self, theme: Theme) -> anyhow::Result<()> {
            *self.stored.lock().unwrap() = Some(theme);
            Ok(())
        }
    }
}
