use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::form::FormData;

/// The payload handed to profile sync on final submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedProfile {
    #[serde(flatten)]
    pub form: FormData,
    pub profile_completed: bool,
    #[serde(with = "iso_millis")]
    pub profile_completed_at: DateTime<Utc>,
}

impl CompletedProfile {
    pub fn new(form: FormData, completed_at: DateTime<Utc>) -> Self {
        Self {
            form,
            profile_completed: true,
            profile_completed_at: completed_at,
        }
    }

    /// Completion timestamp as ISO-8601 with millisecond precision.
    pub fn completed_at_iso(&self) -> String {
        self.profile_completed_at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// RFC 3339 in UTC with exactly three fractional digits, e.g.
/// `2024-06-01T12:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn payload_flattens_form_and_flags_completion() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let profile = CompletedProfile::new(
            FormData {
                username: "ada".into(),
                ..Default::default()
            },
            at,
        );

        let value = serde_json::to_value(&profile).unwrap();

        assert_eq!(value["username"], "ada");
        assert_eq!(value["profileCompleted"], true);
        assert_eq!(value["profileCompletedAt"], "2024-06-01T12:30:00.000Z");
        assert_eq!(profile.completed_at_iso(), "2024-06-01T12:30:00.000Z");
    }

    #[test]
    fn stored_timestamp_reads_back_unchanged() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        let profile = CompletedProfile::new(FormData::default(), at);

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"profileCompletedAt\":\"2024-06-01T12:30:00.250Z\""));

        let back: CompletedProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.profile_completed_at, at);
    }
}
