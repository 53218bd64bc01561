//! Salted one-way password credentials.
//!
//! Hashes are Argon2id PHC strings; the salt travels inside the string so a
//! stored value is all that is needed to verify a candidate password.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use thiserror::Error;

/// Errors produced while deriving a password hash.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The supplied password was empty.
    #[error("password cannot be empty")]
    Empty,
    /// The hashing primitive failed.
    #[error("password hashing failed")]
    Hash,
}

/// Stored password credential.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash `password` with a freshly generated salt.
    pub fn hash(password: &str) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }

        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|_| PasswordError::Hash)
    }

    /// Wrap a PHC string loaded from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check `password` against this credential. A malformed stored value
    /// never verifies.
    pub fn verify(&self, password: &str) -> bool {
        let Ok(parsed) = PhcString::new(&self.0) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
