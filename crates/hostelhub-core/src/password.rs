//! Password hashing and credential verification.
//!
//! New secrets are always hashed with bcrypt. Verification never fails with
//! an error for a well-formed input: a mismatch or an unreadable hash both
//! yield `false`.
//!
//! Student rows created before hashing was introduced still hold their
//! password in plaintext. [`verify_student_secret`] accepts both encodings so
//! those accounts keep working until they are rehashed on their next login.

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

/// Verifies a secret against a bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    match verify(password, hashed) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}

/// Returns true when the stored secret is not a bcrypt hash.
pub fn is_legacy_secret(stored: &str) -> bool {
    !BCRYPT_PREFIXES.iter().any(|prefix| stored.starts_with(prefix))
}

/// Verifies a student secret, accepting legacy plaintext rows.
pub fn verify_student_secret(password: &str, stored: &str) -> bool {
    if is_legacy_secret(stored) {
        constant_time_eq(password.as_bytes(), stored.as_bytes())
    } else {
        verify_password(password, stored)
    }
}

/// Burns one bcrypt verification when no account matched the identifier.
///
/// Login paths call this so that an unknown identifier costs about as much
/// as a wrong password.
pub fn verify_against_dummy(password: &str) {
    let dummy = DUMMY_HASH.get_or_init(|| hash("hostelhub-dummy-secret", DEFAULT_COST).ok());
    if let Some(dummy) = dummy {
        let _ = verify(password, dummy);
    }
}

/// Compares two byte strings without short-circuiting on the first
/// differing byte.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_is_legacy_secret() {
        assert!(is_legacy_secret("password123"));
        assert!(is_legacy_secret(""));
        assert!(!is_legacy_secret(
            "$2b$12$abcdefghijklmnopqrstuuabcdefghijklmnopqrstuvwxyz01234"
        ));
        assert!(!is_legacy_secret("$2y$10$whatever"));
    }

    #[test]
    fn test_verify_password_malformed_hash_is_false() {
        assert!(!verify_password("secret", "$2b$not-a-real-hash"));
    }
}
