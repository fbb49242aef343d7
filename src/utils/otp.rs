//! One-time codes for owner phone verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use hostelhub_core::constant_time_eq;

pub const OTP_LENGTH: usize = 6;

/// A uniformly random 6-digit code, zero padded.
pub fn generate_otp() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{:06}", code)
}

pub fn otp_expiry(now: DateTime<Utc>, ttl_seconds: i64) -> DateTime<Utc> {
    now + Duration::seconds(ttl_seconds)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Mismatch,
    Expired,
}

/// Checks a submitted code against the stored one. A wrong code is reported
/// before an expired one.
pub fn check_otp(
    submitted: &str,
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> OtpCheck {
    match (stored, expires_at) {
        (Some(code), _) if !constant_time_eq(code.as_bytes(), submitted.trim().as_bytes()) => {
            OtpCheck::Mismatch
        }
        (None, _) => OtpCheck::Mismatch,
        (Some(_), Some(expires_at)) if expires_at > now => OtpCheck::Valid,
        (Some(_), _) => OtpCheck::Expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_is_six_digits() {
        for _ in 0..200 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LENGTH);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_expiry_uses_ttl() {
        let now = Utc::now();
        assert_eq!(otp_expiry(now, 900) - now, Duration::minutes(15));
    }

    #[test]
    fn test_check_otp() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);
        let earlier = now - Duration::seconds(1);

        assert_eq!(check_otp("123456", Some("123456"), Some(later), now), OtpCheck::Valid);
        assert_eq!(check_otp(" 123456 ", Some("123456"), Some(later), now), OtpCheck::Valid);
        assert_eq!(check_otp("654321", Some("123456"), Some(later), now), OtpCheck::Mismatch);
        assert_eq!(check_otp("654321", Some("123456"), Some(earlier), now), OtpCheck::Mismatch);
        assert_eq!(check_otp("123456", Some("123456"), Some(earlier), now), OtpCheck::Expired);
        assert_eq!(check_otp("123456", Some("123456"), None, now), OtpCheck::Expired);
        assert_eq!(check_otp("123456", None, Some(later), now), OtpCheck::Mismatch);
        assert_eq!(check_otp("12345", Some("123456"), Some(later), now), OtpCheck::Mismatch);
    }
}
