//! Custom `validator` rules shared by request DTOs.

use std::borrow::Cow;

use validator::ValidationError;

const PHONE_MIN_DIGITS: usize = 10;
const PHONE_MAX_DIGITS: usize = 15;

/// Digits only, with an optional leading `+`, 10 to 15 digits long.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    let ok = digits.chars().all(|c| c.is_ascii_digit())
        && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len());

    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("phone must be 10-15 digits")))
    }
}

/// Lowercase letters, digits and inner hyphens, 3 to 63 characters.
pub fn validate_subdomain(subdomain: &str) -> Result<(), ValidationError> {
    let len_ok = (3..=63).contains(&subdomain.len());
    let chars_ok = subdomain
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    let edges_ok = !subdomain.starts_with('-') && !subdomain.ends_with('-');

    if len_ok && chars_ok && edges_ok {
        Ok(())
    } else {
        Err(ValidationError::new("subdomain").with_message(Cow::Borrowed(
            "subdomain must be 3-63 lowercase letters, digits or hyphens",
        )))
    }
}
