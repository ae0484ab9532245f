//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The hosted identity provider and the
//! document store are reached only through these traits, which keeps the
//! wizard core testable without either.

mod auth_session;
mod clock;
mod identity_provider;
mod profile_sync;
mod theme_store;
mod user_repository;
mod wizard_event;

pub use auth_session::AuthSessionPort;
pub use clock::ClockPort;
pub use identity_provider::IdentityProviderPort;
pub use profile_sync::ProfileSyncPort;
pub use theme_store::ThemeStorePort;
pub use user_repository::UserRepositoryPort;
pub use wizard_event::WizardEventPort;
