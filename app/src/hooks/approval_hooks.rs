// app/src/hooks/approval_hooks.rs

use super::keys;
use crate::errors::{details, AppError, Result};
use crate::models::{ApprovalStatus, SignupApprovalRequest, StoreMember};
use crate::services::backend::Backend;
use crate::workflows::contexts::ApproveRequestHookContext;
use chrono::Utc;
use hookline::{ContextData, SharedState};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Deletes every membership of `user_id` in `store_id`. Returns how many were
/// removed. Rejection and the compensation of approval both go through here.
pub async fn delete_store_membership(backend: &Backend, user_id: Uuid, store_id: Uuid) -> Result<usize> {
  let memberships = backend
    .store_members
    .select(&|m: &StoreMember| m.user_id == user_id && m.store_id == store_id)
    .await?;
  let mut removed = 0;
  for membership in memberships {
    if backend.store_members.delete(membership.id).await? {
      removed += 1;
    }
  }
  debug!(%user_id, %store_id, removed, "Store membership removal finished.");
  Ok(removed)
}

fn reviewed_request(ctx: &ContextData<ApproveRequestHookContext>) -> Result<SignupApprovalRequest> {
  ctx
    .read()
    .request
    .clone()
    .ok_or_else(|| AppError::Internal("Review workflow ran without the request being loaded".to_string()))
}

#[instrument(name = "step::add_store_member", skip_all, err(Display))]
pub async fn add_store_member(
  backend: Arc<Backend>,
  ctx: ContextData<ApproveRequestHookContext>,
  shared: SharedState,
) -> Result<()> {
  let request = reviewed_request(&ctx)?;
  let Some(store_id) = request.store_id else {
    warn!(request_id = %request.id, "Approved request names no store; no membership to add.");
    return Ok(());
  };
  let user_id = request.user_id;

  let existing = backend
    .store_members
    .select_one(&|m: &StoreMember| m.user_id == user_id && m.store_id == store_id)
    .await?;
  if existing.is_some() {
    return Err(AppError::conflict(
      "MEMBER_ALREADY_EXISTS",
      format!("User {} is already a member of store {}", user_id, store_id),
      details([("userId", json!(user_id)), ("storeId", json!(store_id))]),
    ));
  }

  let member = backend
    .store_members
    .insert(StoreMember {
      id: Uuid::new_v4(),
      user_id,
      store_id,
      created_at: Utc::now(),
    })
    .await?;
  shared.set(keys::STORE_MEMBER_ID, member.id);
  ctx.write().store_member_id = Some(member.id);
  info!(%user_id, %store_id, "Store member added.");
  Ok(())
}

/// Compensates `add_store_member`, only when it actually inserted a row.
pub async fn remove_added_member(
  backend: Arc<Backend>,
  ctx: ContextData<ApproveRequestHookContext>,
  shared: SharedState,
) -> Result<()> {
  if !shared.contains(keys::STORE_MEMBER_ID) {
    return Ok(());
  }
  let request = reviewed_request(&ctx)?;
  if let Some(store_id) = request.store_id {
    delete_store_membership(&backend, request.user_id, store_id).await?;
  }
  Ok(())
}

#[instrument(name = "step::remove_store_member", skip_all, err(Display))]
pub async fn remove_store_member(
  backend: Arc<Backend>,
  ctx: ContextData<ApproveRequestHookContext>,
  _shared: SharedState,
) -> Result<()> {
  let request = reviewed_request(&ctx)?;
  if let Some(store_id) = request.store_id {
    delete_store_membership(&backend, request.user_id, store_id).await?;
  }
  Ok(())
}

/// Undoes the caller's primary write: puts the request back in the status it
/// had and clears the review fields.
pub async fn revert_request_status(
  backend: Arc<Backend>,
  _ctx: ContextData<ApproveRequestHookContext>,
  shared: SharedState,
) -> Result<()> {
  let (Some(request_id), Some(previous)) = (
    shared.get::<Uuid>(keys::REQUEST_ID),
    shared.get::<ApprovalStatus>(keys::PREVIOUS_STATUS),
  ) else {
    return Ok(());
  };
  let revert = move |request: &mut SignupApprovalRequest| -> Result<()> {
    request.status = previous;
    request.reviewed_by = None;
    request.reviewed_at = None;
    request.reason = None;
    Ok(())
  };
  backend.approval_requests.update(request_id, &revert).await?;
  info!(%request_id, %previous, "Request status reverted.");
  Ok(())
}
