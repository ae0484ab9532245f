//! Profile setup use cases.
//!
//! This module exposes the profile setup orchestrator and the submit use
//! case it delegates persistence to.

mod context;
pub mod orchestrator;
mod submit;

pub use orchestrator::{ProfileSetupError, ProfileSetupOrchestrator, SubmitOutcome};
pub use submit::{SubmitProfile, SubmitProfileError};
