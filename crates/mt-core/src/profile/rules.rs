//! Per-field validation rules.
//!
//! Each field has exactly one rule chain; the first failing check of the
//! chain produces the message, except for `bio` where the length check is
//! applied last and wins.

use chrono::{Datelike, NaiveDate};

use super::field::ProfileField;
use super::form::FormData;

pub const NAME_MAX_LEN: usize = 15;
pub const USERNAME_MAX_LEN: usize = 15;
pub const BIO_MIN_LEN: usize = 10;
pub const MIN_AGE_YEARS: i32 = 15;
pub const PHONE_DIGITS: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates `value` as the content of `field`.
///
/// `today` must be captured once by the caller and reused for every field
/// checked in the same pass.
pub fn validate(field: ProfileField, value: &str, today: NaiveDate) -> Option<String> {
    match field {
        ProfileField::FirstName => validate_name("First name", value),
        ProfileField::LastName => validate_name("Last name", value),
        ProfileField::Username => validate_username(value),
        ProfileField::DateOfBirth => validate_date_of_birth(value, today),
        ProfileField::PhoneNumber => validate_phone_number(value),
        ProfileField::Bio => validate_bio(value),
        ProfileField::Location
        | ProfileField::ProfilePicture
        | ProfileField::NotificationPreferences => None,
    }
}

/// Validates the current value of `field` in `form`.
pub fn validate_field(form: &FormData, field: ProfileField, today: NaiveDate) -> Option<String> {
    validate(field, form.text(field), today)
}

fn validate_name(label: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else if !value.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(format!("{label} can only contain alphabets"))
    } else if value.chars().count() > NAME_MAX_LEN {
        Some(format!("{label} cannot exceed {NAME_MAX_LEN} characters"))
    } else {
        None
    }
}

fn validate_username(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some("Username is required".to_string())
    } else if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("Username can only be alphanumeric".to_string())
    } else if value.chars().count() > USERNAME_MAX_LEN {
        Some(format!("Username cannot exceed {USERNAME_MAX_LEN} characters"))
    } else {
        None
    }
}

fn validate_date_of_birth(value: &str, today: NaiveDate) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    let Ok(birth) = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT) else {
        return Some("Date of birth must be a valid date".to_string());
    };
    if age_on(birth, today) < MIN_AGE_YEARS {
        Some(format!("You must be at least {MIN_AGE_YEARS} years old"))
    } else {
        None
    }
}

fn validate_phone_number(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let exact_digits =
        value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit());
    if exact_digits {
        None
    } else {
        Some(format!("Phone number must be exactly {PHONE_DIGITS} digits"))
    }
}

fn validate_bio(value: &str) -> Option<String> {
    let mut error = None;
    if value.trim().is_empty() {
        error = Some("Tell us a bit about yourself".to_string());
    }
    if value.chars().count() < BIO_MIN_LEN {
        error = Some(format!("Bio should be at least {BIO_MIN_LEN} characters"));
    }
    error
}

/// Whole years between `birth` and `today`.
///
/// The birthday in `today`'s year is a separate value; `birth` itself is
/// never shifted. A 29 February birthday falls on 1 March in common years.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_this_year = birth
        .with_year(today.year())
        .or_else(|| NaiveDate::from_ymd_opt(today.year(), 3, 1))
        .unwrap_or(birth);
    let mut age = today.year() - birth.year();
    if today < birthday_this_year {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    #[test]
    fn first_name_rule_chain_order() {
        let v = |s: &str| validate(ProfileField::FirstName, s, today());
        assert_eq!(v("   ").as_deref(), Some("First name is required"));
        assert_eq!(v("Ada1").as_deref(), Some("First name can only contain alphabets"));
        assert_eq!(v("Ada Mae").as_deref(), Some("First name can only contain alphabets"));
        assert_eq!(
            v("Abcdefghijklmnop").as_deref(),
            Some("First name cannot exceed 15 characters")
        );
        assert_eq!(v("Abcdefghijklmno"), None);
    }

    #[test]
    fn last_name_uses_its_own_label() {
        assert_eq!(
            validate(ProfileField::LastName, "", today()).as_deref(),
            Some("Last name is required")
        );
        assert_eq!(
            validate(ProfileField::LastName, "O'Neil", today()).as_deref(),
            Some("Last name can only contain alphabets")
        );
    }

    #[test]
    fn non_ascii_letters_are_rejected() {
        assert_eq!(
            validate(ProfileField::FirstName, "Zoë", today()).as_deref(),
            Some("First name can only contain alphabets")
        );
    }

    #[test]
    fn username_rule_chain_order() {
        let v = |s: &str| validate(ProfileField::Username, s, today());
        assert_eq!(v("").as_deref(), Some("Username is required"));
        assert_eq!(v("ada_l").as_deref(), Some("Username can only be alphanumeric"));
        assert_eq!(
            v("ada1234567890123").as_deref(),
            Some("Username cannot exceed 15 characters")
        );
        assert_eq!(v("ada1815"), None);
    }

    #[test]
    fn phone_number_requires_exactly_ten_digits() {
        let v = |s: &str| validate(ProfileField::PhoneNumber, s, today());
        assert_eq!(v("5551234567"), None);
        assert_eq!(v(""), None);
        let message = Some("Phone number must be exactly 10 digits".to_string());
        assert_eq!(v("555-123-4567"), message);
        assert_eq!(v("555123456"), message);
        assert_eq!(v("55512345678"), message);
        assert_eq!(v("５５５１２３４５６７"), message);
    }

    #[test]
    fn date_of_birth_age_boundary() {
        let v = |s: &str| validate(ProfileField::DateOfBirth, s, today());
        assert_eq!(
            v("2009-06-02").as_deref(),
            Some("You must be at least 15 years old")
        );
        assert_eq!(v("2009-05-31"), None);
        assert_eq!(v("2009-06-01"), None);
        assert_eq!(v(""), None);
    }

    #[test]
    fn unparseable_date_of_birth_is_rejected() {
        assert_eq!(
            validate(ProfileField::DateOfBirth, "01/02/2000", today()).as_deref(),
            Some("Date of birth must be a valid date")
        );
    }

    #[test]
    fn blank_date_of_birth_is_absent() {
        assert_eq!(validate(ProfileField::DateOfBirth, "", today()), None);
        assert_eq!(validate(ProfileField::DateOfBirth, "   ", today()), None);
    }

    #[test]
    fn age_on_handles_leap_day_birthdays() {
        let birth = date(2008, 2, 29);
        assert_eq!(age_on(birth, date(2023, 2, 28)), 14);
        assert_eq!(age_on(birth, date(2023, 3, 1)), 15);
        assert_eq!(age_on(birth, date(2024, 2, 29)), 16);
    }

    #[test]
    fn age_on_does_not_disturb_birth_date() {
        let birth = date(2000, 12, 31);
        assert_eq!(age_on(birth, today()), 23);
        assert_eq!(birth, date(2000, 12, 31));
    }

    #[test]
    fn bio_length_message_wins() {
        let v = |s: &str| validate(ProfileField::Bio, s, today());
        assert_eq!(v("").as_deref(), Some("Bio should be at least 10 characters"));
        assert_eq!(v("short").as_deref(), Some("Bio should be at least 10 characters"));
        assert_eq!(
            v("            ").as_deref(),
            Some("Tell us a bit about yourself")
        );
        assert_eq!(v("I build bridges."), None);
    }

    #[test]
    fn unconstrained_fields_always_pass() {
        assert_eq!(validate(ProfileField::Location, "", today()), None);
        assert_eq!(validate(ProfileField::ProfilePicture, "not a url", today()), None);
    }
}
