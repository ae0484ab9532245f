//! Application entry: configuration, tracing, wiring, then the console loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::BufReader;
use tracing::info;

use mt_core::AuthStatus;

use super::config::load_config_or_empty;
use super::tracing::init_tracing_subscriber;
use super::wiring::{wire_dependencies, AppPaths};
use crate::console::{Console, ConsoleWizardEvents};

/// Overrides the location of `config.toml`.
pub const CONFIG_ENV: &str = "MYTRIBE_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config.toml";

fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Runs the interactive application on stdin/stdout until `quit` or EOF.
pub async fn run_app() -> anyhow::Result<()> {
    let config_path = config_path();
    let config = load_config_or_empty(&config_path)?;
    let paths = AppPaths::from_config(&config)?;

    init_tracing_subscriber(Some(&paths.logs_dir))?;
    info!(
        config = %config_path.display(),
        data_dir = %paths.data_dir.display(),
        "starting mytribe"
    );

    let (wizard_events, wizard_output) = ConsoleWizardEvents::channel();
    let wired = wire_dependencies(&config, &paths, Arc::new(wizard_events));

    // Local accounts do not persist a session between runs.
    wired.session.publish(AuthStatus::SignedOut);

    let console = Console::new(wired.deps, wired.prefers_dark, wizard_output);
    let mut stdout = tokio::io::stdout();
    console.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;

    info!("mytribe stopped");
    Ok(())
}
