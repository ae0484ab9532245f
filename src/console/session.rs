//! The interactive console: reads commands, runs use cases, prints results.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

use mt_app::usecases::auth::SignInWithEmail;
use mt_app::usecases::dashboard::DashboardView;
use mt_app::{AppDeps, ProfileSetupError, ProfileSetupOrchestrator, SubmitOutcome};
use mt_core::wizard::WizardLifecycle;
use mt_core::Access;

use super::command::{Command, HELP};
use super::render::render_transition;

const PROMPT: &str = "> ";
const SIGN_IN_REQUIRED: &str = "Please sign up or sign in first.";

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Silent,
    Quit,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Reply::Text(message.into())
    }
}

/// The wizard in use and the task that follows the session for it.
struct ActiveWizard {
    orchestrator: Arc<ProfileSetupOrchestrator>,
    watcher: JoinHandle<()>,
}

impl ActiveWizard {
    fn start(deps: &AppDeps) -> Self {
        let orchestrator = Arc::new(deps.profile_setup());
        let watcher = orchestrator.clone().watch_session();
        Self {
            orchestrator,
            watcher,
        }
    }
}

impl Drop for ActiveWizard {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

pub struct Console {
    deps: AppDeps,
    prefers_dark: bool,
    sign_in: SignInWithEmail,
    wizard: Mutex<ActiveWizard>,
    wizard_output: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl Console {
    /// `wizard_output` receives the snapshots rendered by the wizard event
    /// adapter wired into `deps`. Must be called inside a tokio runtime.
    pub fn new(
        deps: AppDeps,
        prefers_dark: bool,
        wizard_output: mpsc::UnboundedReceiver<String>,
    ) -> Self {
        Self {
            sign_in: deps.sign_in_with_email(),
            wizard: Mutex::new(ActiveWizard::start(&deps)),
            wizard_output: Mutex::new(wizard_output),
            deps,
            prefers_dark,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, output: &mut W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(b"MyTribe. Type `help` for commands.\n").await?;
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let reply = match Command::parse(&line) {
                Ok(Some(command)) => self.execute(command).await?,
                Ok(None) => Reply::Silent,
                Err(err) => Reply::text(err.to_string()),
            };

            for rendered in self.drain_wizard_output().await {
                output.write_all(rendered.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            match reply {
                Reply::Text(text) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                }
                Reply::Silent => {}
                Reply::Quit => break,
            }
        }
        output.flush().await?;
        Ok(())
    }

    /// Runs one command. Failures the user can act on come back as text;
    /// only storage errors propagate.
    pub async fn execute(&self, command: Command) -> anyhow::Result<Reply> {
        let span = info_span!("console.execute", command = command_name(&command));
        self.dispatch(command).instrument(span).await
    }

    async fn dispatch(&self, command: Command) -> anyhow::Result<Reply> {
        let reply = match command {
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply::Quit,
            Command::SignUp(form) => match self.deps.sign_up_with_email().execute(&form).await {
                Ok(identity) => {
                    self.start_wizard_if_needed().await;
                    Reply::text(format!(
                        "Welcome, {}! Let's set up your profile.",
                        identity.display_name.as_deref().unwrap_or("friend")
                    ))
                }
                Err(err) => Reply::text(err.to_string()),
            },
            Command::SignIn(form) => match self.sign_in.execute(&form).await {
                Ok(_) => {
                    self.start_wizard_if_needed().await;
                    Reply::text("Signed in.")
                }
                Err(err) => Reply::text(err.to_string()),
            },
            Command::SignOut => match self.deps.sign_out().execute().await {
                Ok(()) => {
                    self.current_wizard().await.sync_session().await;
                    Reply::text("Signed out.")
                }
                Err(err) => Reply::text(err.to_string()),
            },
            Command::Set(update) => {
                let wizard = match self.ready_wizard().await {
                    Ok(wizard) => wizard,
                    Err(reply) => return Ok(reply),
                };
                wizard_reply(wizard.set_field(update).await.map(|()| Reply::Silent))
            }
            Command::Blur(field) => {
                let wizard = match self.ready_wizard().await {
                    Ok(wizard) => wizard,
                    Err(reply) => return Ok(reply),
                };
                wizard_reply(wizard.blur(field).await.map(|error| match error {
                    Some(message) => Reply::text(format!("{field}: {message}")),
                    None => Reply::text(format!("{field}: ok")),
                }))
            }
            Command::Next => {
                let wizard = match self.ready_wizard().await {
                    Ok(wizard) => wizard,
                    Err(reply) => return Ok(reply),
                };
                wizard_reply(wizard.next().await.map(|t| Reply::text(render_transition(&t))))
            }
            Command::Back => {
                let wizard = match self.ready_wizard().await {
                    Ok(wizard) => wizard,
                    Err(reply) => return Ok(reply),
                };
                wizard_reply(
                    wizard
                        .previous()
                        .await
                        .map(|t| Reply::text(render_transition(&t))),
                )
            }
            Command::Submit => {
                let wizard = match self.ready_wizard().await {
                    Ok(wizard) => wizard,
                    Err(reply) => return Ok(reply),
                };
                wizard_reply(wizard.submit().await.map(|outcome| match outcome {
                    SubmitOutcome::Completed(_) => {
                        Reply::text("Profile saved. Taking you to your dashboard.")
                    }
                    SubmitOutcome::Invalid(errors) => Reply::text(format!(
                        "Please fix {} field(s) before submitting.",
                        errors.len()
                    )),
                    SubmitOutcome::SyncFailed { message } => Reply::text(message),
                }))
            }
            Command::Show => {
                let snapshot = self.current_wizard().await.snapshot().await;
                Reply::text(super::render::render_snapshot(&snapshot))
            }
            Command::Theme { toggle } => {
                let theme = if toggle {
                    self.deps.toggle_theme(self.prefers_dark).execute().await?
                } else {
                    self.deps.resolve_theme(self.prefers_dark).execute().await?
                };
                Reply::text(format!("Theme: {}", theme.as_str()))
            }
            Command::Dashboard => {
                let view = self.deps.get_dashboard().execute().await?;
                match &view {
                    DashboardView::Pending => Reply::text("Loading..."),
                    DashboardView::RedirectToSignUp => Reply::text(SIGN_IN_REQUIRED),
                    DashboardView::Ready { identity, .. } => Reply::text(format!(
                        "Dashboard for {}. Profile {}.",
                        identity.email.as_deref().unwrap_or("unknown user"),
                        if view.profile_completed() {
                            "complete"
                        } else {
                            "incomplete"
                        }
                    )),
                }
            }
        };
        Ok(reply)
    }

    async fn current_wizard(&self) -> Arc<ProfileSetupOrchestrator> {
        self.wizard.lock().await.orchestrator.clone()
    }

    /// The wizard, synced with the session; a reply if nobody is signed in.
    async fn ready_wizard(&self) -> Result<Arc<ProfileSetupOrchestrator>, Reply> {
        let wizard = self.current_wizard().await;
        match wizard.sync_session().await {
            Access::Ready(_) => Ok(wizard),
            Access::Pending | Access::RedirectToSignUp => Err(Reply::text(SIGN_IN_REQUIRED)),
        }
    }

    /// Hands the current session to the wizard. A wizard that is finished,
    /// or that belonged to another user, is replaced by a fresh one.
    async fn start_wizard_if_needed(&self) {
        let mut slot = self.wizard.lock().await;
        slot.orchestrator.sync_session().await;
        if slot.orchestrator.snapshot().await.lifecycle != WizardLifecycle::Active {
            debug!("starting a new profile wizard");
            *slot = ActiveWizard::start(&self.deps);
            slot.orchestrator.sync_session().await;
        }
    }

    async fn drain_wizard_output(&self) -> Vec<String> {
        let mut receiver = self.wizard_output.lock().await;
        let mut rendered = Vec::new();
        while let Ok(text) = receiver.try_recv() {
            rendered.push(text);
        }
        // Only the latest state matters to the reader.
        rendered.split_off(rendered.len().saturating_sub(1))
    }
}

fn wizard_reply(result: Result<Reply, ProfileSetupError>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(ProfileSetupError::NotSignedIn) => Reply::text(SIGN_IN_REQUIRED),
        Err(ProfileSetupError::WizardClosed) => {
            Reply::text("This profile setup has ended. Sign in to start again.")
        }
        Err(err) => {
            warn!(error = %err, "wizard command rejected");
            Reply::text(err.to_string())
        }
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Help => "help",
        Command::Quit => "quit",
        Command::SignUp(_) => "signup",
        Command::SignIn(_) => "signin",
        Command::SignOut => "signout",
        Command::Set(_) => "set",
        Command::Blur(_) => "blur",
        Command::Next => "next",
        Command::Back => "back",
        Command::Submit => "submit",
        Command::Show => "show",
        Command::Theme { .. } => "theme",
        Command::Dashboard => "dashboard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::wiring::{wire_dependencies, AppPaths};
    use crate::console::render::ConsoleWizardEvents;
    use mt_core::config::AppConfig;
    use mt_core::ports::UserRepositoryPort;
    use mt_core::AuthStatus;
    use mt_infra::FileUserRepository;
    use tempfile::TempDir;

    fn console(dir: &TempDir) -> Console {
        let config = AppConfig::empty();
        let paths = AppPaths::resolve(&config, dir.path().to_path_buf());
        let (events, output) = ConsoleWizardEvents::channel();
        let wired = wire_dependencies(&config, &paths, Arc::new(events));
        wired.session.publish(AuthStatus::SignedOut);
        Console::new(wired.deps, wired.prefers_dark, output)
    }

    async fn say(console: &Console, line: &str) -> Reply {
        let command = Command::parse(line).unwrap().unwrap();
        console.execute(command).await.unwrap()
    }

    #[tokio::test]
    async fn wizard_commands_require_a_signed_in_user() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);

        assert_eq!(say(&console, "next").await, Reply::text(SIGN_IN_REQUIRED));
        assert_eq!(say(&console, "dashboard").await, Reply::text(SIGN_IN_REQUIRED));
    }

    #[tokio::test]
    async fn sign_up_prefills_the_wizard() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);

        let reply = say(&console, "signup ada@example.com secret Ada Lovelace").await;
        assert_eq!(
            reply,
            Reply::text("Welcome, Ada Lovelace! Let's set up your profile.")
        );

        let Reply::Text(shown) = say(&console, "show").await else {
            panic!("show renders text");
        };
        assert!(shown.contains("Step 1 of 3: Basic Info"));
        assert!(shown.contains("firstName: Ada"));
        assert!(shown.contains("username: ada"));
    }

    #[tokio::test]
    async fn full_profile_setup_reaches_a_complete_dashboard() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);
        say(&console, "signup ada@example.com secret Ada Lovelace").await;

        assert_eq!(say(&console, "next").await, Reply::text("-> About You"));
        assert_eq!(
            say(&console, "submit").await,
            Reply::text("submission is only possible from the final step (currently on step 2)")
        );
        say(&console, "set bio Short").await;
        assert_eq!(
            say(&console, "blur bio").await,
            Reply::text("bio: Bio should be at least 10 characters")
        );
        say(&console, "set bio Poetical science, mostly").await;
        assert_eq!(say(&console, "next").await, Reply::text("-> Preferences"));
        say(&console, "set notificationPreferences.push on").await;

        assert_eq!(
            say(&console, "submit").await,
            Reply::text("Profile saved. Taking you to your dashboard.")
        );
        assert_eq!(
            say(&console, "dashboard").await,
            Reply::text("Dashboard for ada@example.com. Profile complete.")
        );
    }

    #[tokio::test]
    async fn signing_in_again_after_sign_out_starts_a_fresh_wizard() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);
        say(&console, "signup ada@example.com secret Ada Lovelace").await;
        say(&console, "set location London").await;

        assert_eq!(say(&console, "signout").await, Reply::text("Signed out."));
        assert_eq!(say(&console, "back").await, Reply::text(SIGN_IN_REQUIRED));

        assert_eq!(
            say(&console, "signin ada@example.com secret").await,
            Reply::text("Signed in.")
        );
        let snapshot = console.current_wizard().await.snapshot().await;
        assert_eq!(snapshot.lifecycle, WizardLifecycle::Active);
        assert_eq!(snapshot.form_data.location, "");
        assert_eq!(snapshot.form_data.first_name, "Ada");
    }

    #[tokio::test]
    async fn a_different_user_signing_in_gets_their_own_wizard() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);
        say(&console, "signup ada@example.com secret Ada Lovelace").await;
        say(&console, "set location London").await;

        say(&console, "signup grace@example.com hopper1 Grace Hopper").await;
        let snapshot = console.current_wizard().await.snapshot().await;
        assert_eq!(snapshot.lifecycle, WizardLifecycle::Active);
        assert_eq!(snapshot.form_data.first_name, "Grace");
        assert_eq!(snapshot.form_data.location, "");

        say(&console, "next").await;
        say(&console, "set bio Wrote the first compiler").await;
        say(&console, "next").await;
        assert_eq!(
            say(&console, "submit").await,
            Reply::text("Profile saved. Taking you to your dashboard.")
        );

        let users = FileUserRepository::new(dir.path().to_path_buf());
        let grace = users.find_by_email("grace@example.com").await.unwrap().unwrap();
        let ada = users.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert!(grace.profile_completed());
        assert!(!ada.profile_completed());
    }

    #[tokio::test]
    async fn session_changes_reach_the_wizard_without_a_command() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::empty();
        let paths = AppPaths::resolve(&config, dir.path().to_path_buf());
        let (events, output) = ConsoleWizardEvents::channel();
        let wired = wire_dependencies(&config, &paths, Arc::new(events));
        let session = wired.session.clone();
        session.publish(AuthStatus::SignedOut);
        let console = Console::new(wired.deps, wired.prefers_dark, output);
        say(&console, "signup ada@example.com secret Ada Lovelace").await;

        session.publish(AuthStatus::SignedOut);

        let wizard = console.current_wizard().await;
        while wizard.snapshot().await.lifecycle == WizardLifecycle::Active {
            tokio::task::yield_now().await;
        }
        assert_eq!(wizard.snapshot().await.lifecycle, WizardLifecycle::SessionEnded);
    }

    #[tokio::test]
    async fn run_prints_replies_and_stops_on_quit() {
        let dir = TempDir::new().unwrap();
        let console = console(&dir);
        let input: &[u8] = b"theme\nbogus\n\nquit\nhelp\n";
        let mut output = Vec::new();

        console.run(input, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Theme: light"));
        assert!(text.contains("unknown command: bogus"));
        assert!(!text.contains("commands:"));
    }
}
