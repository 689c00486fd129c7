// app/src/hooks/signup_hooks.rs

use super::keys;
use crate::errors::{AppError, Details, Result};
use crate::models::{ApprovalStatus, Profile, SignupApprovalRequest, UserType};
use crate::services::backend::Backend;
use crate::workflows::contexts::{SignupHookContext, SignupInput};
use chrono::Utc;
use hookline::{ContextData, SharedState};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

fn is_digits(value: &str, min: usize, max: usize) -> bool {
  (min..=max).contains(&value.len()) && value.chars().all(|c| c.is_ascii_digit())
}

/// Field-level problems in a signup form, keyed by form field. Empty when
/// the form is acceptable.
pub fn signup_field_errors(input: &SignupInput) -> Details {
  let mut errors = Details::new();
  let email = input.email.trim();
  if email.is_empty() || !email.contains('@') {
    errors.insert("email".into(), json!("A valid email address is required."));
  }
  if input.name.trim().is_empty() {
    errors.insert("name".into(), json!("Name is required."));
  }
  if !is_digits(&input.phone1, 2, 3) {
    errors.insert("phone1".into(), json!("Must be 2 or 3 digits."));
  }
  if !is_digits(&input.phone2, 4, 4) {
    errors.insert("phone2".into(), json!("Must be exactly 4 digits."));
  }
  if !is_digits(&input.phone3, 4, 4) {
    errors.insert("phone3".into(), json!("Must be exactly 4 digits."));
  }
  if input.password != input.confirm_password {
    errors.insert("confirmPassword".into(), json!("Passwords do not match."));
  }
  match input.user_type {
    UserType::StoreManager if input.store_id.is_none() => {
      errors.insert("storeId".into(), json!("Store managers must select a store."));
    }
    UserType::Hq => {
      errors.insert("userType".into(), json!("HQ accounts cannot be created through signup."));
    }
    _ => {}
  }
  errors
}

#[instrument(name = "step::validate_signup", skip_all, err(Display))]
pub async fn validate_signup(
  backend: Arc<Backend>,
  ctx: ContextData<SignupHookContext>,
  _shared: SharedState,
) -> Result<()> {
  let input = ctx.read().input.clone();
  let errors = signup_field_errors(&input);
  if !errors.is_empty() {
    debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Signup form rejected.");
    return Err(AppError::validation("INVALID_SIGNUP", "Signup form has invalid fields.", errors));
  }
  if let Some(store_id) = input.store_id {
    if backend.stores.find(store_id).await?.is_none() {
      return Err(AppError::not_found("STORE_NOT_FOUND", format!("Store {} does not exist", store_id)));
    }
  }
  Ok(())
}

/// Writes the role claim for the new auth user.
#[instrument(name = "step::update_app_metadata", skip_all, err(Display))]
pub async fn update_app_metadata(
  backend: Arc<Backend>,
  ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  let user_id: Uuid = shared.require(keys::USER_ID)?;
  let user_type = ctx.read().input.user_type;
  backend.identity.grant_role(user_id, user_type).await?;
  info!(%user_id, %user_type, "Role granted.");
  Ok(())
}

#[instrument(name = "step::create_profile", skip_all, err(Display))]
pub async fn create_profile(
  backend: Arc<Backend>,
  ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  let user_id: Uuid = shared.require(keys::USER_ID)?;
  let profile = {
    let guard = ctx.read();
    Profile {
      id: Uuid::new_v4(),
      user_id,
      name: guard.input.name.trim().to_string(),
      email: guard.input.email.trim().to_lowercase(),
      phone: guard.input.phone_number(),
      user_type: guard.input.user_type,
      created_at: Utc::now(),
    }
  };
  let profile = backend.profiles.insert(profile).await?;
  shared.set(keys::PROFILE_ID, profile.id);
  ctx.write().profile_id = Some(profile.id);
  Ok(())
}

pub async fn delete_profile(
  backend: Arc<Backend>,
  _ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  if let Some(profile_id) = shared.get::<Uuid>(keys::PROFILE_ID) {
    backend.profiles.delete(profile_id).await?;
  }
  Ok(())
}

/// Store managers wait for HQ; everyone else is approved on the spot.
#[instrument(name = "step::request_signup_approval", skip_all, err(Display))]
pub async fn request_signup_approval(
  backend: Arc<Backend>,
  ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  let user_id: Uuid = shared.require(keys::USER_ID)?;
  let store_id = ctx.read().input.store_id;
  let status = if store_id.is_some() {
    ApprovalStatus::Pending
  } else {
    ApprovalStatus::Approved
  };
  let request = backend
    .approval_requests
    .insert(SignupApprovalRequest {
      id: Uuid::new_v4(),
      user_id,
      store_id,
      status,
      reviewed_by: None,
      reviewed_at: None,
      reason: None,
      created_at: Utc::now(),
    })
    .await?;
  shared.set(keys::APPROVAL_REQUEST_ID, request.id);
  {
    let mut guard = ctx.write();
    guard.approval_request_id = Some(request.id);
    guard.approval_status = Some(status);
  }
  info!(request_id = %request.id, %status, "Signup approval request recorded.");
  Ok(())
}

pub async fn delete_approval_request(
  backend: Arc<Backend>,
  _ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  if let Some(request_id) = shared.get::<Uuid>(keys::APPROVAL_REQUEST_ID) {
    backend.approval_requests.delete(request_id).await?;
  }
  Ok(())
}

/// Undoes the caller's primary write: the auth user itself.
pub async fn delete_user(
  backend: Arc<Backend>,
  _ctx: ContextData<SignupHookContext>,
  shared: SharedState,
) -> Result<()> {
  if let Some(user_id) = shared.get::<Uuid>(keys::USER_ID) {
    let removed = backend.identity.delete_user(user_id).await?;
    debug!(%user_id, removed, "Auth user compensated.");
  }
  Ok(())
}
