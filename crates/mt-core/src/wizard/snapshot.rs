use serde::Serialize;

use crate::profile::{ErrorMap, FormData, WizardStep};

use super::controller::{ProfileWizard, WizardLifecycle};

/// Progress indicator entry for one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepIndicator {
    pub number: u8,
    pub title: &'static str,
    pub completed: bool,
    pub current: bool,
}

/// Read-only view of the wizard handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: WizardStep,
    pub steps: Vec<StepIndicator>,
    pub form_data: FormData,
    pub errors: ErrorMap,
    pub submitting: bool,
    pub submit_error: Option<String>,
    pub lifecycle: WizardLifecycle,
}

impl WizardSnapshot {
    pub(crate) fn capture(wizard: &ProfileWizard) -> Self {
        let current = wizard.current_step();
        let steps = WizardStep::ALL
            .into_iter()
            .map(|step| StepIndicator {
                number: step.number(),
                title: step.title(),
                completed: current > step,
                current: current == step,
            })
            .collect();

        Self {
            current_step: current,
            steps,
            form_data: wizard.form().clone(),
            errors: wizard.errors().clone(),
            submitting: wizard.is_submitting(),
            submit_error: wizard.submit_error().map(str::to_string),
            lifecycle: wizard.lifecycle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::FieldUpdate;
    use chrono::NaiveDate;

    #[test]
    fn indicators_mark_earlier_steps_completed() {
        let mut wizard = ProfileWizard::new();
        wizard.set_field(FieldUpdate::FirstName("Ada".into()));
        wizard.set_field(FieldUpdate::LastName("Lovelace".into()));
        wizard.set_field(FieldUpdate::Username("ada".into()));
        wizard.go_next(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let snapshot = wizard.snapshot();

        assert_eq!(snapshot.current_step, WizardStep::AboutYou);
        let flags: Vec<(bool, bool)> = snapshot
            .steps
            .iter()
            .map(|s| (s.completed, s.current))
            .collect();
        assert_eq!(flags, vec![(true, false), (false, true), (false, false)]);
    }

    #[test]
    fn serializes_for_the_presentation_layer() {
        let value = serde_json::to_value(ProfileWizard::new().snapshot()).unwrap();
        assert_eq!(value["currentStep"], 1);
        assert_eq!(value["steps"][0]["title"], "Basic Info");
        assert_eq!(value["lifecycle"], "active");
        assert_eq!(value["formData"]["notificationPreferences"]["email"], true);
    }
}
