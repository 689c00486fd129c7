// app/src/services/identity.rs

//! The identity provider: auth users and the role claim carried in their
//! metadata.

use super::auth_service::{hash_password, verify_password};
use super::fault::FaultTrigger;
use crate::errors::{details, AppError, Result};
use crate::models::UserType;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;
use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
  /// Creates an auth user and returns its id. Fails with a conflict when the
  /// email is taken.
  async fn create_user(&self, email: &str, password: &str) -> Result<Uuid>;

  /// Returns whether a user was removed.
  async fn delete_user(&self, user_id: Uuid) -> Result<bool>;

  /// Writes the role claim. Called at most once per signup, never retried.
  async fn grant_role(&self, user_id: Uuid, user_type: UserType) -> Result<()>;

  async fn role_of(&self, user_id: Uuid) -> Result<Option<UserType>>;

  /// Returns the user id when the credentials match. Sign-in itself is
  /// served by the provider, not by this service; this check is here for
  /// tests and local tooling that confirm which password an account got.
  async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Uuid>>;
}

#[derive(Debug, Clone)]
struct Identity {
  email: String,
  password_hash: String,
  role: Option<UserType>,
}

#[derive(Default)]
pub struct MemoryIdentityProvider {
  users: RwLock<HashMap<Uuid, Identity>>,
  create_fault: FaultTrigger,
  grant_fault: FaultTrigger,
  delete_fault: FaultTrigger,
}

impl MemoryIdentityProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn fail_next_create(&self) {
    self.create_fault.arm(1);
  }

  pub fn fail_next_grant(&self) {
    self.grant_fault.arm(1);
  }

  pub fn fail_next_delete(&self) {
    self.delete_fault.arm(1);
  }

  pub fn user_count(&self) -> usize {
    self.users.read().len()
  }

  pub fn contains(&self, user_id: Uuid) -> bool {
    self.users.read().contains_key(&user_id)
  }

  fn injected_failure(operation: &str) -> AppError {
    warn!(operation, "Injected identity provider failure.");
    AppError::external("IDENTITY_PROVIDER_FAILURE", format!("Identity provider rejected {}", operation))
  }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
  #[instrument(name = "identity::create_user", skip(self, password), err(Display))]
  async fn create_user(&self, email: &str, password: &str) -> Result<Uuid> {
    if self.create_fault.trips() {
      return Err(Self::injected_failure("create_user"));
    }
    let normalized = email.trim().to_lowercase();
    let password_hash = hash_password(password)?;

    let mut users = self.users.write();
    if users.values().any(|identity| identity.email == normalized) {
      return Err(AppError::conflict(
        "EMAIL_TAKEN",
        format!("An account already exists for {}", normalized),
        details([("email", json!(normalized))]),
      ));
    }
    let user_id = Uuid::new_v4();
    users.insert(
      user_id,
      Identity {
        email: normalized,
        password_hash,
        role: None,
      },
    );
    info!(%user_id, "Auth user created.");
    Ok(user_id)
  }

  #[instrument(name = "identity::delete_user", skip(self), err(Display))]
  async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
    if self.delete_fault.trips() {
      return Err(Self::injected_failure("delete_user"));
    }
    let removed = self.users.write().remove(&user_id).is_some();
    info!(removed, "Auth user delete finished.");
    Ok(removed)
  }

  #[instrument(name = "identity::grant_role", skip(self), err(Display))]
  async fn grant_role(&self, user_id: Uuid, user_type: UserType) -> Result<()> {
    if self.grant_fault.trips() {
      return Err(Self::injected_failure("grant_role"));
    }
    let mut users = self.users.write();
    let identity = users
      .get_mut(&user_id)
      .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", format!("No auth user {}", user_id)))?;
    identity.role = Some(user_type);
    Ok(())
  }

  async fn role_of(&self, user_id: Uuid) -> Result<Option<UserType>> {
    Ok(self.users.read().get(&user_id).and_then(|identity| identity.role))
  }

  async fn verify_credentials(&self, email: &str, password: &str) -> Result<Option<Uuid>> {
    let normalized = email.trim().to_lowercase();
    let candidate = self
      .users
      .read()
      .iter()
      .find(|(_, identity)| identity.email == normalized)
      .map(|(id, identity)| (*id, identity.password_hash.clone()));
    match candidate {
      Some((user_id, hash)) if verify_password(&hash, password)? => Ok(Some(user_id)),
      _ => Ok(None),
    }
  }
}
