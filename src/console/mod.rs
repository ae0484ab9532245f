//! Line-oriented presentation layer.

pub mod command;
pub mod render;
pub mod session;

pub use command::{Command, CommandError};
pub use render::ConsoleWizardEvents;
pub use session::{Console, Reply};
