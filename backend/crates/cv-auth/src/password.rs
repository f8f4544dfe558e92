//! Argon2 password hashing.
//!
//! Production builds use `Argon2::default()` (Argon2id, 19 MiB, 2 passes).
//! Unit tests of this crate use minimal parameters so they stay fast; the
//! PHC string records its own parameters, so either kind verifies anywhere.

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
#[cfg(test)]
use argon2::{Algorithm, Params, Version};
use error_location::ErrorLocation;

#[inline]
fn argon2_instance() -> Argon2<'static> {
    #[cfg(test)]
    {
        match Params::new(1024, 1, 1, None) {
            Ok(params) => Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            Err(_) => Argon2::default(),
        }
    }

    #[cfg(not(test))]
    {
        Argon2::default()
    }
}

/// Hash a password into a PHC string suitable for storage.
#[track_caller]
pub fn hash_password(password: &str) -> AuthErrorResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instance()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Check a password against a stored PHC string.
/// A malformed stored hash never matches.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    argon2_instance()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
