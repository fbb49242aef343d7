use crate::env::{flag, parse_or, string_or};

pub const DEFAULT_OWNER_TOKEN_TTL: i64 = 604_800; // 7 days
pub const DEFAULT_STUDENT_TOKEN_TTL: i64 = 604_800; // 7 days
pub const DEFAULT_SUPER_ADMIN_TOKEN_TTL: i64 = 86_400; // 24 hours

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Seconds
    pub owner_token_ttl: i64,
    pub student_token_ttl: i64,
    pub super_admin_token_ttl: i64,
    /// Adds the `Secure` attribute to auth cookies.
    pub secure_cookies: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: string_or("JWT_SECRET", "your-secret-key-change-in-production"),
            owner_token_ttl: parse_or("JWT_OWNER_EXPIRY", DEFAULT_OWNER_TOKEN_TTL),
            student_token_ttl: parse_or("JWT_STUDENT_EXPIRY", DEFAULT_STUDENT_TOKEN_TTL),
            super_admin_token_ttl: parse_or(
                "JWT_SUPER_ADMIN_EXPIRY",
                DEFAULT_SUPER_ADMIN_TOKEN_TTL,
            ),
            secure_cookies: flag("COOKIE_SECURE", false),
        }
    }

    /// Config with default lifetimes and the given secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            owner_token_ttl: DEFAULT_OWNER_TOKEN_TTL,
            student_token_ttl: DEFAULT_STUDENT_TOKEN_TTL,
            super_admin_token_ttl: DEFAULT_SUPER_ADMIN_TOKEN_TTL,
            secure_cookies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_defaults() {
        let config = JwtConfig::with_secret("s3cret");
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.owner_token_ttl, 7 * 24 * 3600);
        assert_eq!(config.student_token_ttl, 7 * 24 * 3600);
        assert_eq!(config.super_admin_token_ttl, 24 * 3600);
        assert!(!config.secure_cookies);
    }
}
