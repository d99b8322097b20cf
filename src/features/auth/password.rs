//! Password hashing with Argon2.
//!
//! Accounts migrated from the previous portal still store their password as plain
//! text. Those rows are recognised by not being a PHC string (`$argon2id$...`);
//! they are compared directly and flagged so the caller can persist a real hash.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;
use subtle::ConstantTimeEq;

use crate::core::error::{AppError, Result};

/// Outcome of checking a password against the stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    /// Matched an Argon2 hash
    Valid,
    /// Matched a legacy plaintext value; the stored credential should be rehashed
    ValidLegacy,
    Invalid,
}

impl PasswordCheck {
    pub fn is_valid(self) -> bool {
        !matches!(self, PasswordCheck::Invalid)
    }
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, stored: &str) -> PasswordCheck {
    if !is_phc_hash(stored) {
        return if bool::from(password.as_bytes().ct_eq(stored.as_bytes())) {
            PasswordCheck::ValidLegacy
        } else {
            PasswordCheck::Invalid
        };
    }

    match PasswordHash::new(stored) {
        Ok(parsed) => {
            if Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
            {
                PasswordCheck::Valid
            } else {
                PasswordCheck::Invalid
            }
        }
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {}", e);
            PasswordCheck::Invalid
        }
    }
}

fn is_phc_hash(stored: &str) -> bool {
    stored.starts_with("$argon2")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_eq!(
            verify_password("correct horse battery", &hash),
            PasswordCheck::Valid
        );
        assert_eq!(verify_password("wrong", &hash), PasswordCheck::Invalid);
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same-password").unwrap();
        let b = hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_plaintext_fallback() {
        assert_eq!(
            verify_password("old-secret", "old-secret"),
            PasswordCheck::ValidLegacy
        );
        assert_eq!(
            verify_password("old-secreT", "old-secret"),
            PasswordCheck::Invalid
        );
        assert_eq!(verify_password("", "old-secret"), PasswordCheck::Invalid);
    }

    #[test]
    fn test_malformed_phc_string_is_rejected() {
        assert_eq!(
            verify_password("$argon2id$broken", "$argon2id$broken"),
            PasswordCheck::Invalid
        );
    }
}
