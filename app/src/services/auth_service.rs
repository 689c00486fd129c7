// app/src/services/auth_service.rs

//! Password hashing for the identity provider.

use crate::errors::{details, AppError};
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use serde_json::json;
use tracing::{debug, error, instrument};

/// Hashes a plain-text password with Argon2 and a fresh random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    return Err(AppError::validation(
      "EMPTY_PASSWORD",
      "Password cannot be empty.",
      details([("password", json!("Password cannot be empty."))]),
    ));
  }

  let salt = SaltString::generate(&mut OsRng);
  match Argon2::default().hash_password(password.as_bytes(), &salt) {
    Ok(hash) => {
      debug!("Password hashed successfully.");
      Ok(hash.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!("Password hashing process failed: {}", argon_err)))
    }
  }
}

/// Checks `provided_password` against a stored Argon2 hash. A mismatch is
/// `Ok(false)`; only a malformed hash is an error.
#[instrument(name = "auth_service::verify_password", skip_all, err(Display))]
pub fn verify_password(hashed_password: &str, provided_password: &str) -> Result<bool, AppError> {
  let parsed_hash = PasswordHash::new(hashed_password).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other) => {
      error!(error = %other, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!("Password verification process failed: {}", other)))
    }
  }
}
