// app/src/services/authz.rs

//! Role checks run by the services before a workflow starts.

use super::backend::Backend;
use crate::errors::{AppError, Result};
use crate::models::{Profile, StoreMember, UserType};
use tracing::{debug, instrument};
use uuid::Uuid;

pub async fn profile_of(backend: &Backend, user_id: Uuid) -> Result<Option<Profile>> {
  backend.profiles.select_one(&|p: &Profile| p.user_id == user_id).await
}

/// Store members may manage their store; HQ may manage any store.
#[instrument(name = "authz::require_store_member", skip(backend), err(Display))]
pub async fn require_store_member(backend: &Backend, user_id: Uuid, store_id: Uuid) -> Result<()> {
  if let Some(profile) = profile_of(backend, user_id).await? {
    if profile.user_type == UserType::Hq {
      debug!("HQ user acting on store.");
      return Ok(());
    }
  }
  let membership = backend
    .store_members
    .select_one(&|m: &StoreMember| m.user_id == user_id && m.store_id == store_id)
    .await?;
  match membership {
    Some(_) => Ok(()),
    None => Err(AppError::authorization(
      "NOT_STORE_MEMBER",
      format!("User {} is not a member of store {}", user_id, store_id),
    )),
  }
}

#[instrument(name = "authz::require_hq", skip(backend), err(Display))]
pub async fn require_hq(backend: &Backend, user_id: Uuid) -> Result<Profile> {
  match profile_of(backend, user_id).await? {
    Some(profile) if profile.user_type == UserType::Hq => Ok(profile),
    _ => Err(AppError::authorization("HQ_ONLY", "Only HQ may review signup requests")),
  }
}

#[instrument(name = "authz::require_profile", skip(backend), err(Display))]
pub async fn require_profile(backend: &Backend, user_id: Uuid) -> Result<Profile> {
  profile_of(backend, user_id)
    .await?
    .ok_or_else(|| AppError::authorization("UNKNOWN_USER", format!("No profile for user {}", user_id)))
}
