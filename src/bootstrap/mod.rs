pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_empty};
pub use run::run_app;
pub use wiring::{wire_dependencies, AppPaths, WiredApp};
