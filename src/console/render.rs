//! Text rendering of wizard state and the console's wizard event adapter.

use std::fmt::Write as _;

use async_trait::async_trait;
use tokio::sync::mpsc;

use mt_core::ports::WizardEventPort;
use mt_core::wizard::{Transition, WizardLifecycle};
use mt_core::{ProfileField, WizardSnapshot, WizardStep};

/// Fields shown on each step, in display order.
fn displayed_fields(step: WizardStep) -> &'static [ProfileField] {
    match step {
        WizardStep::BasicInfo => &[
            ProfileField::FirstName,
            ProfileField::LastName,
            ProfileField::Username,
            ProfileField::ProfilePicture,
            ProfileField::DateOfBirth,
            ProfileField::PhoneNumber,
        ],
        WizardStep::AboutYou => &[ProfileField::Bio, ProfileField::Location],
        WizardStep::Preferences => &[ProfileField::NotificationPreferences],
    }
}

pub fn render_snapshot(snapshot: &WizardSnapshot) -> String {
    let mut out = String::new();

    let progress: Vec<String> = snapshot
        .steps
        .iter()
        .map(|step| {
            let mark = if step.completed {
                "x"
            } else if step.current {
                ">"
            } else {
                " "
            };
            format!("[{mark}] {}", step.title)
        })
        .collect();
    let _ = writeln!(out, "{}", progress.join("  "));

    let current = snapshot.current_step;
    let _ = writeln!(
        out,
        "Step {} of {}: {}",
        current.number(),
        WizardStep::LAST.number(),
        current.title()
    );

    let form = &snapshot.form_data;
    for field in displayed_fields(current) {
        if *field == ProfileField::NotificationPreferences {
            let prefs = &form.notification_preferences;
            let _ = writeln!(
                out,
                "  email: {}  push: {}  sms: {}",
                on_off(prefs.email),
                on_off(prefs.push),
                on_off(prefs.sms)
            );
            continue;
        }
        let _ = writeln!(out, "  {field}: {}", form.text(*field));
    }

    for (field, message) in snapshot.errors.iter() {
        let _ = writeln!(out, "  ! {field}: {message}");
    }
    if snapshot.submitting {
        let _ = writeln!(out, "  saving...");
    }
    if let Some(message) = &snapshot.submit_error {
        let _ = writeln!(out, "  ! {message}");
    }
    match snapshot.lifecycle {
        WizardLifecycle::Active => {}
        WizardLifecycle::Completed => {
            let _ = writeln!(out, "Profile complete.");
        }
        WizardLifecycle::SessionEnded => {
            let _ = writeln!(out, "Signed out. Sign in again to continue.");
        }
    }

    out.trim_end().to_string()
}

pub fn render_transition(transition: &Transition) -> String {
    match transition {
        Transition::Moved { to, .. } => format!("-> {}", to.title()),
        Transition::Blocked { errors, .. } => {
            format!("Please fix {} field(s) before continuing.", errors.len())
        }
        Transition::Unchanged { step } => format!("Already on {}.", step.title()),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

/// Forwards rendered snapshots to the console loop.
pub struct ConsoleWizardEvents {
    sender: mpsc::UnboundedSender<String>,
}

impl ConsoleWizardEvents {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl WizardEventPort for ConsoleWizardEvents {
    async fn emit_wizard_changed(&self, snapshot: &WizardSnapshot) {
        // The receiver is gone only while the console shuts down.
        let _ = self.sender.send(render_snapshot(snapshot));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_core::{FieldUpdate, ProfileWizard};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn first_step_lists_basic_fields_and_errors() {
        let mut wizard = ProfileWizard::new();
        wizard.set_field(FieldUpdate::FirstName("Ada".into()));
        wizard.go_next(today());

        let text = render_snapshot(&wizard.snapshot());

        assert!(text.starts_with("[>] Basic Info  [ ] About You  [ ] Preferences"));
        assert!(text.contains("Step 1 of 3: Basic Info"));
        assert!(text.contains("  firstName: Ada"));
        assert!(text.contains("  ! lastName: Last name is required"));
        assert!(!text.contains("bio"));
    }

    #[test]
    fn preferences_step_shows_channel_flags() {
        let mut wizard = ProfileWizard::new();
        wizard.set_field(FieldUpdate::FirstName("Ada".into()));
        wizard.set_field(FieldUpdate::LastName("Lovelace".into()));
        wizard.set_field(FieldUpdate::Username("ada".into()));
        wizard.go_next(today());
        wizard.set_field(FieldUpdate::Bio("Poetical science".into()));
        wizard.go_next(today());

        let text = render_snapshot(&wizard.snapshot());

        assert!(text.starts_with("[x] Basic Info  [x] About You  [>] Preferences"));
        assert!(text.contains("email: on  push: on  sms: off"));
    }

    #[test]
    fn transitions_render_briefly() {
        let moved = Transition::Moved {
            from: WizardStep::BasicInfo,
            to: WizardStep::AboutYou,
        };
        assert_eq!(render_transition(&moved), "-> About You");
        assert_eq!(
            render_transition(&Transition::Unchanged {
                step: WizardStep::BasicInfo
            }),
            "Already on Basic Info."
        );
    }

    #[tokio::test]
    async fn events_are_forwarded_as_text() {
        let (events, mut receiver) = ConsoleWizardEvents::channel();
        events
            .emit_wizard_changed(&ProfileWizard::new().snapshot())
            .await;

        let text = receiver.recv().await.unwrap();
        assert!(text.contains("Step 1 of 3"));
    }
}
