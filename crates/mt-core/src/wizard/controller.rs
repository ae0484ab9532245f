use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::profile::{
    rules, CompletedProfile, ErrorMap, FieldUpdate, FormData, ProfileField, StepValidator,
    WizardStep,
};
use crate::session::{Identity, ProfilePrefill};

use super::event::{WizardEvent, WizardOutcome};
use super::snapshot::WizardSnapshot;

/// Banner shown when profile sync rejects the submission.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to save profile. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardLifecycle {
    Active,
    /// Profile saved; the host navigates away.
    Completed,
    /// The user signed out mid-flow.
    SessionEnded,
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: WizardStep, to: WizardStep },
    /// Validation failed; the step's errors are in the error map.
    Blocked { step: WizardStep, errors: ErrorMap },
    /// Already at the boundary.
    Unchanged { step: WizardStep },
}

impl Transition {
    pub fn current_step(&self) -> WizardStep {
        match self {
            Transition::Moved { to, .. } => *to,
            Transition::Blocked { step, .. } | Transition::Unchanged { step } => *step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InProgress,
    #[error("submission is only possible from the final step (currently on step {0})")]
    NotOnFinalStep(u8),
    #[error("the final step has validation errors")]
    Invalid(ErrorMap),
    #[error("the wizard is no longer active")]
    Closed,
}

/// Multi-step profile form state.
#[derive(Debug, Clone)]
pub struct ProfileWizard {
    step: WizardStep,
    form: FormData,
    errors: ErrorMap,
    submitting: bool,
    submit_error: Option<String>,
    initialized: bool,
    lifecycle: WizardLifecycle,
}

impl Default for ProfileWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::FIRST,
            form: FormData::default(),
            errors: ErrorMap::new(),
            submitting: false,
            submit_error: None,
            initialized: false,
            lifecycle: WizardLifecycle::Active,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn lifecycle(&self) -> WizardLifecycle {
        self.lifecycle
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == WizardLifecycle::Active
    }

    /// Pre-fills identity-derived fields. Only the first call has an effect.
    pub fn initialize(&mut self, identity: &Identity) -> bool {
        if self.initialized {
            return false;
        }
        ProfilePrefill::from_identity(identity).apply_to(&mut self.form);
        self.initialized = true;
        debug!(uid = %identity.uid, "profile wizard pre-filled from identity");
        true
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        self.form.apply(update);
    }

    /// Validates one field and records the result under that field only.
    pub fn validate_field_on_blur(&mut self, field: ProfileField, today: NaiveDate) -> Option<String> {
        let error = rules::validate_field(&self.form, field, today);
        self.errors.set(field, error.clone());
        error
    }

    pub fn go_next(&mut self, today: NaiveDate) -> Transition {
        let from = self.step;
        if from == WizardStep::BasicInfo {
            for field in from.fields() {
                self.validate_field_on_blur(*field, today);
            }
        }

        let report = StepValidator::validate_step(from, &self.form, today);
        self.errors.merge_scoped(report.covered_fields(), &report.errors);
        if !report.is_valid() {
            return Transition::Blocked {
                step: from,
                errors: report.errors,
            };
        }

        let to = from.next();
        if to == from {
            return Transition::Unchanged { step: from };
        }
        self.step = to;
        Transition::Moved { from, to }
    }

    pub fn go_previous(&mut self) -> Transition {
        let from = self.step;
        let to = from.previous();
        if to == from {
            return Transition::Unchanged { step: from };
        }
        self.step = to;
        Transition::Moved { from, to }
    }

    /// Applies a synchronous interaction.
    pub fn apply(&mut self, event: WizardEvent, today: NaiveDate) -> WizardOutcome {
        match event {
            WizardEvent::SetField(update) => {
                let field = update.field();
                self.set_field(update);
                WizardOutcome::FieldSet(field)
            }
            WizardEvent::Blur(field) => WizardOutcome::FieldValidated {
                field,
                error: self.validate_field_on_blur(field, today),
            },
            WizardEvent::Next => WizardOutcome::Transition(self.go_next(today)),
            WizardEvent::Previous => WizardOutcome::Transition(self.go_previous()),
        }
    }

    /// Validates the final step and, if it passes, marks the wizard as
    /// submitting and returns the payload to persist.
    pub fn begin_submit(
        &mut self,
        now: DateTime<Utc>,
        today: NaiveDate,
    ) -> Result<CompletedProfile, SubmitRejected> {
        if !self.is_active() {
            return Err(SubmitRejected::Closed);
        }
        if self.submitting {
            return Err(SubmitRejected::InProgress);
        }
        if !self.step.is_last() {
            return Err(SubmitRejected::NotOnFinalStep(self.step.number()));
        }

        let report = StepValidator::validate_step(self.step, &self.form, today);
        self.errors.merge_scoped(report.covered_fields(), &report.errors);
        if !report.is_valid() {
            return Err(SubmitRejected::Invalid(report.errors));
        }

        self.submitting = true;
        self.submit_error = None;
        Ok(CompletedProfile::new(self.form.clone(), now))
    }

    /// Records the profile sync result of the submission started by
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(&mut self, saved: bool) {
        self.submitting = false;
        if saved {
            self.lifecycle = WizardLifecycle::Completed;
        } else {
            self.submit_error = Some(SUBMIT_FAILED_MESSAGE.to_string());
        }
    }

    pub fn end_session(&mut self) {
        if self.lifecycle == WizardLifecycle::Active {
            self.lifecycle = WizardLifecycle::SessionEnded;
        }
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot::capture(self)
    }
}
