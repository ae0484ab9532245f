//! # Application Dependencies
//!
//! Dependency grouping for use-case construction.
//!
//! **Note**: This is NOT a Builder pattern. No build steps, no default
//! values, no hidden logic. Just parameter grouping.

use std::sync::Arc;

use mt_core::ports::*;

use crate::usecases::auth::{EnsureUserRecord, SignInWithEmail, SignOut, SignUpWithEmail};
use crate::usecases::dashboard::GetDashboard;
use crate::usecases::profile_setup::{ProfileSetupOrchestrator, SubmitProfile};
use crate::usecases::theme::{ResolveTheme, ToggleTheme};

/// Every port the application layer needs. All fields are required.
#[derive(Clone)]
pub struct AppDeps {
    // Session / identity
    pub auth_session: Arc<dyn AuthSessionPort>,
    pub identity_provider: Arc<dyn IdentityProviderPort>,

    // Storage
    pub profile_sync: Arc<dyn ProfileSyncPort>,
    pub user_repo: Arc<dyn UserRepositoryPort>,
    pub theme_store: Arc<dyn ThemeStorePort>,

    // Presentation
    pub wizard_events: Arc<dyn WizardEventPort>,

    // System
    pub clock: Arc<dyn ClockPort>,
}

impl AppDeps {
    pub fn profile_setup(&self) -> ProfileSetupOrchestrator {
        ProfileSetupOrchestrator::new(
            Arc::new(SubmitProfile::from_ports(self.profile_sync.clone())),
            self.auth_session.clone(),
            self.clock.clone(),
            self.wizard_events.clone(),
        )
    }

    pub fn ensure_user_record(&self) -> EnsureUserRecord {
        EnsureUserRecord::from_ports(self.user_repo.clone(), self.clock.clone())
    }

    pub fn sign_up_with_email(&self) -> SignUpWithEmail {
        SignUpWithEmail::new(
            self.identity_provider.clone(),
            Arc::new(self.ensure_user_record()),
        )
    }

    pub fn sign_in_with_email(&self) -> SignInWithEmail {
        SignInWithEmail::new(
            self.identity_provider.clone(),
            Arc::new(self.ensure_user_record()),
        )
    }

    pub fn sign_out(&self) -> SignOut {
        SignOut::from_ports(self.identity_provider.clone())
    }

    pub fn resolve_theme(&self, prefers_dark: bool) -> ResolveTheme {
        ResolveTheme::new(self.theme_store.clone(), prefers_dark)
    }

    pub fn toggle_theme(&self, prefers_dark: bool) -> ToggleTheme {
        ToggleTheme::new(self.theme_store.clone(), prefers_dark)
    }

    pub fn get_dashboard(&self) -> GetDashboard {
        GetDashboard::from_ports(self.auth_session.clone(), self.user_repo.clone())
    }
}
