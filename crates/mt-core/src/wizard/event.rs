use crate::profile::{FieldUpdate, ProfileField};

use super::controller::Transition;

/// Synchronous user interactions with the wizard.
///
/// Submission is not an event here because it needs the profile sync port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Field content changed.
    SetField(FieldUpdate),
    /// Field lost focus.
    Blur(ProfileField),
    /// "Next" pressed.
    Next,
    /// "Previous" pressed.
    Previous,
}

/// Result of applying a [`WizardEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    FieldSet(ProfileField),
    FieldValidated {
        field: ProfileField,
        error: Option<String>,
    },
    Transition(Transition),
}
