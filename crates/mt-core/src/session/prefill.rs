use super::Identity;
use crate::profile::FormData;

/// Form values derivable from the provider identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePrefill {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub profile_picture: Option<String>,
}

impl ProfilePrefill {
    /// Splits the display name on spaces (first token, then the rest joined
    /// by single spaces) and takes the email local part as username.
    pub fn from_identity(identity: &Identity) -> Self {
        let mut parts = identity
            .display_name
            .as_deref()
            .unwrap_or("")
            .split(' ');
        let first_name = parts.next().unwrap_or("").to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        let username = identity
            .email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .unwrap_or("")
            .to_string();

        Self {
            first_name,
            last_name,
            username,
            profile_picture: identity.photo_url.clone().filter(|url| !url.is_empty()),
        }
    }

    pub fn apply_to(self, form: &mut FormData) {
        form.first_name = self.first_name;
        form.last_name = self.last_name;
        form.username = self.username;
        form.profile_picture = self.profile_picture;
    }
}
