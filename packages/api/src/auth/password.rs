//! # Password hashing and verification: Argon2id
//!
//! [`hash_password`] salts with [`OsRng`] and returns a PHC-format string
//! (`$argon2id$v=19$...`) for the `password_hash` column. [`verify_password`]
//! returns `Ok(false)` on mismatch and `Err` only when the stored hash is
//! malformed.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Password(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| ApiError::Password(format!("Invalid password hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(hash_password("short"), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-hash").is_err());
    }
}
