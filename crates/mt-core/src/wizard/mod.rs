//! Profile setup wizard domain module.
//!
//! [`ProfileWizard`] is the synchronous heart of the flow: it owns the form
//! data, the error map and the step cursor. Side effects (persisting the
//! profile, observing the session) live in the application layer.

mod controller;
mod event;
mod snapshot;

pub use controller::{
    ProfileWizard, SubmitRejected, Transition, WizardLifecycle, SUBMIT_FAILED_MESSAGE,
};
pub use event::{WizardEvent, WizardOutcome};
pub use snapshot::{StepIndicator, WizardSnapshot};
