use crate::env::parse_or;

pub const DEFAULT_OTP_TTL_SECONDS: i64 = 900;
pub const DEFAULT_OTP_MAX_ATTEMPTS: i32 = 5;

#[derive(Clone, Debug)]
pub struct OtpConfig {
    pub ttl_seconds: i64,
    /// Wrong codes allowed before the OTP is discarded
    pub max_attempts: i32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_OTP_TTL_SECONDS,
            max_attempts: DEFAULT_OTP_MAX_ATTEMPTS,
        }
    }
}

impl OtpConfig {
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: parse_or("OTP_TTL_SECONDS", DEFAULT_OTP_TTL_SECONDS),
            max_attempts: parse_or("OTP_MAX_ATTEMPTS", DEFAULT_OTP_MAX_ATTEMPTS).max(1),
        }
    }
}
