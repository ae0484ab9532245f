//! Wizard steps and the per-step validator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::ErrorMap;
use super::field::ProfileField;
use super::form::FormData;
use super::rules;

/// One numbered phase of the profile wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    BasicInfo,
    AboutYou,
    Preferences,
}

const BASIC_INFO_FIELDS: &[ProfileField] = &[
    ProfileField::FirstName,
    ProfileField::LastName,
    ProfileField::Username,
    ProfileField::DateOfBirth,
    ProfileField::PhoneNumber,
];
const ABOUT_YOU_FIELDS: &[ProfileField] = &[ProfileField::Bio];
const PREFERENCES_FIELDS: &[ProfileField] = &[];

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::BasicInfo;
    pub const LAST: WizardStep = WizardStep::Preferences;
    pub const ALL: [WizardStep; 3] = [
        WizardStep::BasicInfo,
        WizardStep::AboutYou,
        WizardStep::Preferences,
    ];

    pub fn number(self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::AboutYou => 2,
            WizardStep::Preferences => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::BasicInfo),
            2 => Some(WizardStep::AboutYou),
            3 => Some(WizardStep::Preferences),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::AboutYou => "About You",
            WizardStep::Preferences => "Preferences",
        }
    }

    /// Fields whose rules gate leaving this step.
    pub fn fields(self) -> &'static [ProfileField] {
        match self {
            WizardStep::BasicInfo => BASIC_INFO_FIELDS,
            WizardStep::AboutYou => ABOUT_YOU_FIELDS,
            WizardStep::Preferences => PREFERENCES_FIELDS,
        }
    }

    /// Following step, saturating at the last one.
    pub fn next(self) -> Self {
        match self {
            WizardStep::BasicInfo => WizardStep::AboutYou,
            WizardStep::AboutYou | WizardStep::Preferences => WizardStep::Preferences,
        }
    }

    /// Preceding step, saturating at the first one.
    pub fn previous(self) -> Self {
        match self {
            WizardStep::BasicInfo | WizardStep::AboutYou => WizardStep::BasicInfo,
            WizardStep::Preferences => WizardStep::AboutYou,
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        WizardStep::from_number(number).ok_or_else(|| format!("no wizard step {number}"))
    }
}

/// Outcome of validating every field of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: WizardStep,
    pub errors: ErrorMap,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields this report speaks for, including the ones that passed.
    pub fn covered_fields(&self) -> &'static [ProfileField] {
        self.step.fields()
    }
}

pub struct StepValidator;

impl StepValidator {
    /// Runs the rules of every field belonging to `step`.
    pub fn validate_step(step: WizardStep, form: &FormData, today: NaiveDate) -> StepReport {
        let mut errors = ErrorMap::new();
        for field in step.fields() {
            errors.set(*field, rules::validate_field(form, *field, today));
        }
        StepReport { step, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        assert_eq!(WizardStep::Preferences.next(), WizardStep::Preferences);
        assert_eq!(WizardStep::BasicInfo.previous(), WizardStep::BasicInfo);
        assert_eq!(WizardStep::BasicInfo.next().next(), WizardStep::Preferences);
    }

    #[test]
    fn step_one_collects_every_failing_field() {
        let form = FormData {
            first_name: "".into(),
            last_name: "L0velace".into(),
            username: "ada".into(),
            phone_number: Some("123".into()),
            ..Default::default()
        };

        let report = StepValidator::validate_step(WizardStep::BasicInfo, &form, today());

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 3);
        assert_eq!(
            report.errors.get(ProfileField::FirstName),
            Some("First name is required")
        );
        assert_eq!(
            report.errors.get(ProfileField::LastName),
            Some("Last name can only contain alphabets")
        );
        assert!(report.errors.contains(ProfileField::PhoneNumber));
        assert!(!report.errors.contains(ProfileField::Username));
    }

    #[test]
    fn step_two_checks_bio_only() {
        let form = FormData::default();
        let report = StepValidator::validate_step(WizardStep::AboutYou, &form, today());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors.contains(ProfileField::Bio));
    }

    #[test]
    fn step_three_is_always_valid() {
        let report =
            StepValidator::validate_step(WizardStep::Preferences, &FormData::default(), today());
        assert!(report.is_valid());
    }

    #[test]
    fn steps_serialize_as_numbers() {
        assert_eq!(serde_json::to_string(&WizardStep::AboutYou).unwrap(), "2");
        assert_eq!(
            serde_json::from_str::<WizardStep>("3").unwrap(),
            WizardStep::Preferences
        );
        assert!(serde_json::from_str::<WizardStep>("4").is_err());
    }
}
