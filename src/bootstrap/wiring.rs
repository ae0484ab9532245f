//! # Dependency Injection
//!
//! Creates the infra adapters and groups them into [`AppDeps`].
//!
//! Assembly only: no business decisions and no config validation. This is
//! the only place that depends on `mt-infra` and `mt-app` together.

use std::path::PathBuf;
use std::sync::Arc;

use mt_app::AppDeps;
use mt_core::config::AppConfig;
use mt_core::ports::WizardEventPort;
use mt_infra::{
    FileThemeRepository, FileUserRepository, InMemoryAuthSession, LocalIdentityProvider,
    SystemClock,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Failed to resolve application data directory: {0}")]
    DataDir(#[source] anyhow::Error),
}

/// Concrete file locations derived from the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    /// Empty configured locations fall back to `default_root`.
    pub fn resolve(config: &AppConfig, default_root: PathBuf) -> Self {
        let data_dir = if config.data_dir.as_os_str().is_empty() {
            default_root
        } else {
            config.data_dir.clone()
        };
        let logs_dir = if config.log_dir.as_os_str().is_empty() {
            data_dir.join("logs")
        } else {
            config.log_dir.clone()
        };
        Self { data_dir, logs_dir }
    }

    /// Resolves against the platform data directory.
    pub fn from_config(config: &AppConfig) -> WiringResult<Self> {
        let default_root = if config.data_dir.as_os_str().is_empty() {
            mt_infra::fs::app_data_dir().map_err(WiringError::DataDir)?
        } else {
            PathBuf::new()
        };
        Ok(Self::resolve(config, default_root))
    }
}

/// Everything the console needs after assembly.
pub struct WiredApp {
    pub deps: AppDeps,
    pub session: Arc<InMemoryAuthSession>,
    pub prefers_dark: bool,
}

pub fn wire_dependencies(
    config: &AppConfig,
    paths: &AppPaths,
    wizard_events: Arc<dyn WizardEventPort>,
) -> WiredApp {
    let session = Arc::new(InMemoryAuthSession::new());
    let users = Arc::new(FileUserRepository::new(paths.data_dir.clone()));

    let deps = AppDeps {
        auth_session: session.clone(),
        identity_provider: Arc::new(LocalIdentityProvider::with_defaults(
            paths.data_dir.clone(),
            session.clone(),
        )),
        profile_sync: users.clone(),
        user_repo: users,
        theme_store: Arc::new(FileThemeRepository::with_defaults(paths.data_dir.clone())),
        wizard_events,
        clock: Arc::new(SystemClock),
    };

    WiredApp {
        deps,
        session,
        prefers_dark: config.prefers_dark,
    }
}
