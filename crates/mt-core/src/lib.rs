//! # mt-core
//!
//! Core domain models and business logic for MyTribe onboarding.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod config;
pub mod ids;
pub mod ports;
pub mod profile;
pub mod session;
pub mod theme;
pub mod user;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::UserId;
pub use profile::{
    CompletedProfile, ErrorMap, FieldUpdate, FormData, NotificationPreferences, ProfileField,
    WizardStep,
};
pub use session::{Access, AuthStatus, Identity};
pub use theme::Theme;
pub use wizard::{ProfileWizard, WizardSnapshot};
