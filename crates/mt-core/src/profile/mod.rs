//! Profile domain module.
//!
//! The form-data aggregate collected by the profile setup wizard, the
//! per-field validation rules and the per-step validator built on them.

mod completed;
mod errors;
mod field;
mod form;
pub mod rules;
pub mod step;

pub use completed::CompletedProfile;
pub use errors::ErrorMap;
pub use field::{FieldUpdate, NotificationChannel, ParseFieldError, ProfileField};
pub use form::{FormData, NotificationPreferences};
pub use step::{StepReport, StepValidator, WizardStep};
