//! Password hashing with Argon2id
//!
//! Hashes are stored as PHC strings, so the salt and cost parameters travel
//! with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{SpendbookError, SpendbookResult};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash `password` with a fresh random salt
pub fn hash_password(password: &str) -> SpendbookResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| SpendbookError::Encryption(format!("Password hashing failed: {}", e)))
}

/// Check `password` against a stored PHC string.
///
/// A malformed stored hash is an error; a wrong password is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> SpendbookResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| SpendbookError::Encryption(format!("Invalid stored hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
