//! Profile setup orchestrator.
//!
//! This module coordinates the profile wizard core with the session,
//! the clock, profile sync and the presentation hook.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use mt_core::ports::{AuthSessionPort, ClockPort, WizardEventPort};
use mt_core::session::resolve_access;
use mt_core::wizard::{SubmitRejected, Transition, WizardEvent, WizardOutcome};
use mt_core::{
    Access, AuthStatus, CompletedProfile, ErrorMap, FieldUpdate, ProfileField, ProfileWizard,
    WizardSnapshot,
};

use super::context::ProfileSetupContext;
use super::submit::SubmitProfile;

/// Errors produced by the profile setup orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileSetupError {
    #[error("no signed-in user")]
    NotSignedIn,
    #[error("the profile wizard is no longer active")]
    WizardClosed,
    #[error("a profile submission is already in flight")]
    SubmitInProgress,
    #[error("submission is only possible from the final step (currently on step {0})")]
    NotOnFinalStep(u8),
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the host should leave the wizard.
    Completed(CompletedProfile),
    /// The final step failed validation; nothing was sent.
    Invalid(ErrorMap),
    /// Profile sync failed; the banner message is also in the snapshot.
    SyncFailed { message: String },
}

/// Orchestrator that drives the profile wizard and its side effects.
pub struct ProfileSetupOrchestrator {
    context: Arc<ProfileSetupContext>,

    submit_profile: Arc<SubmitProfile>,
    auth_session: Arc<dyn AuthSessionPort>,
    clock: Arc<dyn ClockPort>,
    event_port: Arc<dyn WizardEventPort>,
}

impl ProfileSetupOrchestrator {
    pub fn new(
        submit_profile: Arc<SubmitProfile>,
        auth_session: Arc<dyn AuthSessionPort>,
        clock: Arc<dyn ClockPort>,
        event_port: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self {
            context: ProfileSetupContext::default().arc(),
            submit_profile,
            auth_session,
            clock,
            event_port,
        }
    }

    /// Applies the session's current status and reports whether the wizard
    /// can be shown.
    pub async fn sync_session(&self) -> Access {
        let status = self.auth_session.current();
        self.apply_auth_status(&status).await
    }

    /// Follows session changes until the session source goes away.
    pub fn watch_session(self: Arc<Self>) -> JoinHandle<()> {
        let mut receiver = self.auth_session.subscribe();
        tokio::spawn(
            async move {
                loop {
                    let status = receiver.borrow_and_update().clone();
                    self.apply_auth_status(&status).await;
                    if receiver.changed().await.is_err() {
                        debug!("auth session source closed");
                        break;
                    }
                }
            }
            .instrument(info_span!("usecase.profile_setup.watch_session")),
        )
    }

    /// Feeds one session status into the wizard.
    ///
    /// The first signed-in identity pre-fills the form. A different user
    /// signing in, or signing out, ends the wizard session.
    pub async fn apply_auth_status(&self, status: &AuthStatus) -> Access {
        let access = resolve_access(status);
        match &access {
            Access::Ready(identity) => {
                let change = {
                    let mut wizard = self.context.wizard().await;
                    if wizard.initialize(identity) {
                        self.context.set_identity(Some(identity.clone())).await;
                        Some((true, wizard.snapshot()))
                    } else {
                        let owner = self.context.identity().await;
                        let switched = owner.is_some_and(|owner| owner.uid != identity.uid);
                        if switched && wizard.is_active() {
                            wizard.end_session();
                            self.context.set_identity(None).await;
                            Some((false, wizard.snapshot()))
                        } else {
                            None
                        }
                    }
                };
                match change {
                    Some((true, snapshot)) => {
                        info!(uid = %identity.uid, "profile wizard initialized");
                        self.emit(&snapshot).await;
                    }
                    Some((false, snapshot)) => {
                        warn!(uid = %identity.uid, "another user signed in during profile setup");
                        self.emit(&snapshot).await;
                    }
                    None => {}
                }
            }
            Access::RedirectToSignUp => {
                let snapshot = {
                    let mut wizard = self.context.wizard().await;
                    if wizard.is_active() {
                        wizard.end_session();
                        self.context.set_identity(None).await;
                        Some(wizard.snapshot())
                    } else {
                        None
                    }
                };
                if let Some(snapshot) = snapshot {
                    warn!("user signed out during profile setup");
                    self.emit(&snapshot).await;
                }
            }
            Access::Pending => {}
        }
        access
    }

    pub async fn set_field(&self, update: FieldUpdate) -> Result<(), ProfileSetupError> {
        self.dispatch(WizardEvent::SetField(update)).await.map(|_| ())
    }

    /// Validates one field and returns its error, if any.
    pub async fn blur(&self, field: ProfileField) -> Result<Option<String>, ProfileSetupError> {
        match self.dispatch(WizardEvent::Blur(field)).await? {
            WizardOutcome::FieldValidated { error, .. } => Ok(error),
            _ => Ok(None),
        }
    }

    pub async fn next(&self) -> Result<Transition, ProfileSetupError> {
        self.transition(WizardEvent::Next).await
    }

    pub async fn previous(&self) -> Result<Transition, ProfileSetupError> {
        self.transition(WizardEvent::Previous).await
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        self.context.wizard().await.snapshot()
    }

    /// Applies a synchronous interaction and emits the resulting snapshot.
    pub async fn dispatch(&self, event: WizardEvent) -> Result<WizardOutcome, ProfileSetupError> {
        let span = info_span!("usecase.profile_setup.dispatch", event = ?event);
        async {
            let today = self.clock.today();
            let (outcome, snapshot) = {
                let mut wizard = self.context.wizard().await;
                ensure_active(&wizard)?;
                let from = wizard.current_step();
                let outcome = wizard.apply(event, today);
                if let WizardOutcome::Transition(transition) = &outcome {
                    info!(
                        from = ?from,
                        to = ?transition.current_step(),
                        blocked = matches!(transition, Transition::Blocked { .. }),
                        "profile wizard transition"
                    );
                }
                (outcome, wizard.snapshot())
            };
            self.emit(&snapshot).await;
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Validates the final step and persists the profile for the
    /// signed-in user.
    ///
    /// The wizard lock is released while profile sync runs; the wizard's
    /// submitting flag rejects a second submission in the meantime.
    pub async fn submit(&self) -> Result<SubmitOutcome, ProfileSetupError> {
        let span = info_span!("usecase.profile_setup.submit");
        async {
            let signed_in = match self.sync_session().await {
                Access::Ready(identity) => identity,
                Access::Pending | Access::RedirectToSignUp => {
                    return Err(ProfileSetupError::NotSignedIn)
                }
            };
            let (identity, profile, snapshot) = {
                let mut wizard = self.context.wizard().await;
                ensure_active(&wizard)?;
                // The profile is only ever saved for the user who is signed in now.
                let identity = self
                    .context
                    .identity()
                    .await
                    .filter(|owner| owner.uid == signed_in.uid)
                    .ok_or(ProfileSetupError::NotSignedIn)?;
                match wizard.begin_submit(self.clock.now(), self.clock.today()) {
                    Ok(profile) => (identity, profile, wizard.snapshot()),
                    Err(SubmitRejected::Invalid(errors)) => {
                        let snapshot = wizard.snapshot();
                        drop(wizard);
                        debug!(error_count = errors.len(), "profile submission blocked");
                        self.emit(&snapshot).await;
                        return Ok(SubmitOutcome::Invalid(errors));
                    }
                    Err(rejected) => return Err(rejected.into()),
                }
            };
            self.emit(&snapshot).await;

            let result = self.submit_profile.execute(&identity.uid, &profile).await;
            let saved = match &result {
                Ok(()) => true,
                Err(err) => {
                    error!(error = %err, uid = %identity.uid, "failed to save profile");
                    false
                }
            };

            let snapshot = {
                let mut wizard = self.context.wizard().await;
                wizard.finish_submit(saved);
                wizard.snapshot()
            };
            self.emit(&snapshot).await;

            if saved {
                info!(uid = %identity.uid, "profile setup completed");
                Ok(SubmitOutcome::Completed(profile))
            } else {
                Ok(SubmitOutcome::SyncFailed {
                    message: snapshot.submit_error.unwrap_or_default(),
                })
            }
        }
        .instrument(span)
        .await
    }

    async fn transition(&self, event: WizardEvent) -> Result<Transition, ProfileSetupError> {
        match self.dispatch(event).await? {
            WizardOutcome::Transition(transition) => Ok(transition),
            _ => {
                let step = self.context.wizard().await.current_step();
                Ok(Transition::Unchanged { step })
            }
        }
    }

    async fn emit(&self, snapshot: &WizardSnapshot) {
        self.event_port.emit_wizard_changed(snapshot).await;
    }
}

fn ensure_active(wizard: &ProfileWizard) -> Result<(), ProfileSetupError> {
    if wizard.is_active() {
        Ok(())
    } else {
        Err(ProfileSetupError::WizardClosed)
    }
}

impl From<SubmitRejected> for ProfileSetupError {
    fn from(rejected: SubmitRejected) -> Self {
        match rejected {
            SubmitRejected::InProgress => ProfileSetupError::SubmitInProgress,
            SubmitRejected::NotOnFinalStep(step) => ProfileSetupError::NotOnFinalStep(step),
            SubmitRejected::Closed | SubmitRejected::Invalid(_) => ProfileSetupError::WizardClosed,
        }
    }
}
