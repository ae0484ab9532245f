use serde::{Deserialize, Serialize};

use super::field::{FieldUpdate, NotificationChannel, ProfileField};

/// Per-channel notification opt-ins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPreferences {
    pub email: bool,
    pub push: bool,
    pub sms: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            sms: false,
        }
    }
}

impl NotificationPreferences {
    pub fn set(&mut self, channel: NotificationChannel, enabled: bool) {
        match channel {
            NotificationChannel::Email => self.email = enabled,
            NotificationChannel::Push => self.push = enabled,
            NotificationChannel::Sms => self.sms = enabled,
        }
    }
}

/// Everything the profile wizard collects across its three steps.
///
/// Client-local until final submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub bio: String,
    pub location: String,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub notification_preferences: NotificationPreferences,
}

impl FormData {
    /// Overwrites one field. No validation happens here.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FirstName(v) => self.first_name = v,
            FieldUpdate::LastName(v) => self.last_name = v,
            FieldUpdate::Username(v) => self.username = v,
            FieldUpdate::Bio(v) => self.bio = v,
            FieldUpdate::Location(v) => self.location = v,
            FieldUpdate::ProfilePicture(v) => self.profile_picture = v,
            FieldUpdate::DateOfBirth(v) => self.date_of_birth = v,
            FieldUpdate::PhoneNumber(v) => self.phone_number = v,
            FieldUpdate::Notification { channel, enabled } => {
                self.notification_preferences.set(channel, enabled)
            }
        }
    }

    /// Text value of a field as seen by the validation rules.
    ///
    /// Absent optional values read as the empty string; the preferences
    /// record has no text form.
    pub fn text(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::FirstName => &self.first_name,
            ProfileField::LastName => &self.last_name,
            ProfileField::Username => &self.username,
            ProfileField::Bio => &self.bio,
            ProfileField::Location => &self.location,
            ProfileField::ProfilePicture => self.profile_picture.as_deref().unwrap_or(""),
            ProfileField::DateOfBirth => self.date_of_birth.as_deref().unwrap_or(""),
            ProfileField::PhoneNumber => self.phone_number.as_deref().unwrap_or(""),
            ProfileField::NotificationPreferences => "",
        }
    }
}
