//! MyTribe Application Orchestration Layer
//!
//! This crate contains the onboarding use cases and the profile setup
//! orchestrator that drives the wizard core over injected ports.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
pub use usecases::profile_setup::{ProfileSetupError, ProfileSetupOrchestrator, SubmitOutcome};
