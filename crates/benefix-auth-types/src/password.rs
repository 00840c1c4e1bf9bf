//! Argon2id hashing for account passwords.
//!
//! Passwords are hashed at every write and verified against the stored
//! PHC string at every login. Plaintext never reaches the database.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors returned by the hashing functions.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    Hashing,
    #[error("stored password hash is malformed")]
    MalformedHash,
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// Default parameters (argon2 0.5): m=19456 KiB, t=2, p=1 — the OWASP
/// recommendation. Returns a PHC-formatted string (`$argon2id$...`).
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::Hashing)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
///
/// `Ok(false)` means the password does not match. `Err(MalformedHash)`
/// means the stored value is not a parseable PHC string, which indicates
/// data corruption rather than a wrong password.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::MalformedHash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(_) => Ok(false),
    }
}
