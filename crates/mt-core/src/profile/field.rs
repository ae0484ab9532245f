use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Names of the fields held by [`FormData`](super::FormData).
///
/// Serialized in camelCase, matching the stored profile document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    FirstName,
    LastName,
    Username,
    Bio,
    Location,
    ProfilePicture,
    DateOfBirth,
    PhoneNumber,
    NotificationPreferences,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::FirstName,
        ProfileField::LastName,
        ProfileField::Username,
        ProfileField::Bio,
        ProfileField::Location,
        ProfileField::ProfilePicture,
        ProfileField::DateOfBirth,
        ProfileField::PhoneNumber,
        ProfileField::NotificationPreferences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::FirstName => "firstName",
            ProfileField::LastName => "lastName",
            ProfileField::Username => "username",
            ProfileField::Bio => "bio",
            ProfileField::Location => "location",
            ProfileField::ProfilePicture => "profilePicture",
            ProfileField::DateOfBirth => "dateOfBirth",
            ProfileField::PhoneNumber => "phoneNumber",
            ProfileField::NotificationPreferences => "notificationPreferences",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseFieldError {
    #[error("unknown profile field: {0}")]
    UnknownField(String),
    #[error("unknown notification channel: {0}")]
    UnknownChannel(String),
    #[error("invalid flag value for {field}: {value}")]
    InvalidFlag { field: String, value: String },
}

impl FromStr for ProfileField {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ParseFieldError::UnknownField(s.to_string()))
    }
}

/// Notification channels a user can opt in or out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Push,
    Sms,
}

impl FromStr for NotificationChannel {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(NotificationChannel::Email),
            "push" => Ok(NotificationChannel::Push),
            "sms" => Ok(NotificationChannel::Sms),
            other => Err(ParseFieldError::UnknownChannel(other.to_string())),
        }
    }
}

/// A single field mutation.
///
/// Optional fields take `None` (or an empty string) to mean "absent".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    FirstName(String),
    LastName(String),
    Username(String),
    Bio(String),
    Location(String),
    ProfilePicture(Option<String>),
    DateOfBirth(Option<String>),
    PhoneNumber(Option<String>),
    Notification {
        channel: NotificationChannel,
        enabled: bool,
    },
}

impl FieldUpdate {
    pub fn field(&self) -> ProfileField {
        match self {
            FieldUpdate::FirstName(_) => ProfileField::FirstName,
            FieldUpdate::LastName(_) => ProfileField::LastName,
            FieldUpdate::Username(_) => ProfileField::Username,
            FieldUpdate::Bio(_) => ProfileField::Bio,
            FieldUpdate::Location(_) => ProfileField::Location,
            FieldUpdate::ProfilePicture(_) => ProfileField::ProfilePicture,
            FieldUpdate::DateOfBirth(_) => ProfileField::DateOfBirth,
            FieldUpdate::PhoneNumber(_) => ProfileField::PhoneNumber,
            FieldUpdate::Notification { .. } => ProfileField::NotificationPreferences,
        }
    }

    /// Builds an update from a field name and raw input text.
    ///
    /// Notification toggles are addressed as `notificationPreferences.<channel>`
    /// and accept `true`/`false`/`on`/`off`.
    pub fn parse(name: &str, raw: &str) -> Result<Self, ParseFieldError> {
        if let Some(channel) = name.strip_prefix("notificationPreferences.") {
            let channel = channel.parse::<NotificationChannel>()?;
            let enabled = match raw.trim() {
                "true" | "on" | "1" => true,
                "false" | "off" | "0" => false,
                other => {
                    return Err(ParseFieldError::InvalidFlag {
                        field: name.to_string(),
                        value: other.to_string(),
                    })
                }
            };
            return Ok(FieldUpdate::Notification { channel, enabled });
        }

        let optional = |raw: &str| (!raw.trim().is_empty()).then(|| raw.to_string());
        let update = match name.parse::<ProfileField>()? {
            ProfileField::FirstName => FieldUpdate::FirstName(raw.to_string()),
            ProfileField::LastName => FieldUpdate::LastName(raw.to_string()),
            ProfileField::Username => FieldUpdate::Username(raw.to_string()),
            ProfileField::Bio => FieldUpdate::Bio(raw.to_string()),
            ProfileField::Location => FieldUpdate::Location(raw.to_string()),
            ProfileField::ProfilePicture => FieldUpdate::ProfilePicture(optional(raw)),
            ProfileField::DateOfBirth => FieldUpdate::DateOfBirth(optional(raw)),
            ProfileField::PhoneNumber => FieldUpdate::PhoneNumber(optional(raw)),
            ProfileField::NotificationPreferences => {
                return Err(ParseFieldError::UnknownField(name.to_string()))
            }
        };
        Ok(update)
    }
}
