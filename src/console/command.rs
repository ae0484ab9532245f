//! Line commands understood by the console driver.

use mt_core::auth::{SignInForm, SignUpForm};
use mt_core::profile::ParseFieldError;
use mt_core::{FieldUpdate, ProfileField};

pub const HELP: &str = "\
commands:
  signup <email> <password> <full name>
  signin <email> <password>
  signout
  set <field> [value]        e.g. set firstName Ada, set notificationPreferences.sms on
  blur <field>
  next | back
  submit
  show
  theme [toggle]
  dashboard
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    SignUp(SignUpForm),
    SignIn(SignInForm),
    SignOut,
    Set(FieldUpdate),
    Blur(ProfileField),
    Next,
    Back,
    Submit,
    Show,
    Theme { toggle: bool },
    Dashboard,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0} (type `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Field(#[from] ParseFieldError),
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let Some((verb, rest)) = split_word(line) else {
            return Ok(None);
        };

        let command = match verb {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "signup" => {
                let (email, rest) =
                    split_word(rest).ok_or(CommandError::Usage("signup <email> <password> <full name>"))?;
                let (password, full_name) =
                    split_word(rest).ok_or(CommandError::Usage("signup <email> <password> <full name>"))?;
                Command::SignUp(SignUpForm {
                    full_name: full_name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            "signin" => {
                let (email, rest) =
                    split_word(rest).ok_or(CommandError::Usage("signin <email> <password>"))?;
                let password = rest.split_whitespace().next().unwrap_or("");
                Command::SignIn(SignInForm {
                    email: email.to_string(),
                    password: password.to_string(),
                })
            }
            "signout" => Command::SignOut,
            "set" => {
                let (field, value) = split_word(rest).ok_or(CommandError::Usage("set <field> [value]"))?;
                Command::Set(FieldUpdate::parse(field, value)?)
            }
            "blur" => {
                let (field, _) = split_word(rest).ok_or(CommandError::Usage("blur <field>"))?;
                Command::Blur(field.parse()?)
            }
            "next" => Command::Next,
            "back" | "prev" | "previous" => Command::Back,
            "submit" => Command::Submit,
            "show" => Command::Show,
            "theme" => match rest {
                "" => Command::Theme { toggle: false },
                "toggle" => Command::Theme { toggle: true },
                _ => return Err(CommandError::Usage("theme [toggle]")),
            },
            "dashboard" => Command::Dashboard,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(idx) => Some((&input[..idx], input[idx..].trim())),
        None => Some((input, "")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mt_core::profile::NotificationChannel;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn signup_keeps_spaces_in_full_name() {
        let command = Command::parse("signup ada@example.com secret Ada  Lovelace").unwrap();
        assert_eq!(
            command,
            Some(Command::SignUp(SignUpForm {
                full_name: "Ada  Lovelace".into(),
                email: "ada@example.com".into(),
                password: "secret".into(),
            }))
        );
    }

    #[test]
    fn signin_without_password_parses_to_empty_password() {
        let command = Command::parse("signin ada@example.com").unwrap();
        assert_eq!(
            command,
            Some(Command::SignIn(SignInForm {
                email: "ada@example.com".into(),
                password: String::new(),
            }))
        );
    }

    #[test]
    fn set_passes_raw_value_through() {
        assert_eq!(
            Command::parse("set bio I like  engines").unwrap(),
            Some(Command::Set(FieldUpdate::Bio("I like  engines".into())))
        );
        assert_eq!(
            Command::parse("set phoneNumber").unwrap(),
            Some(Command::Set(FieldUpdate::PhoneNumber(None)))
        );
        assert_eq!(
            Command::parse("set notificationPreferences.push off").unwrap(),
            Some(Command::Set(FieldUpdate::Notification {
                channel: NotificationChannel::Push,
                enabled: false,
            }))
        );
    }

    #[test]
    fn unknown_field_and_verb_are_reported() {
        assert!(matches!(
            Command::parse("set nickname Ada"),
            Err(CommandError::Field(ParseFieldError::UnknownField(_)))
        ));
        assert!(matches!(
            Command::parse("dance"),
            Err(CommandError::Unknown(verb)) if verb == "dance"
        ));
        assert_eq!(
            Command::parse("blur").unwrap_err(),
            CommandError::Usage("blur <field>")
        );
    }

    #[test]
    fn navigation_aliases() {
        assert_eq!(Command::parse("prev").unwrap(), Some(Command::Back));
        assert_eq!(Command::parse("next").unwrap(), Some(Command::Next));
        assert_eq!(
            Command::parse("theme toggle").unwrap(),
            Some(Command::Theme { toggle: true })
        );
    }
}
