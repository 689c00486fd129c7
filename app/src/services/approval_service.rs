// app/src/services/approval_service.rs

use super::authz::require_hq;
use super::backend::Backend;
use super::roll_back;
use crate::errors::{details, AppError, Result};
use crate::hooks::keys;
use crate::models::{ApprovalStatus, SignupApprovalRequest};
use crate::workflows::contexts::{ApproveRequestHookContext, ReviewDecision};
use crate::workflows::Workflows;
use chrono::Utc;
use hookline::ContextData;
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
  pub request: SignupApprovalRequest,
  pub store_member_id: Option<Uuid>,
}

/// Moves a pending signup request to APPROVED or REJECTED and adjusts store
/// membership to match. On failure the membership change and the status
/// change are both undone.
#[instrument(name = "service::review_signup_request", skip(backend, workflows, reason), err(Display))]
pub async fn review_signup_request(
  backend: &Backend,
  workflows: &Workflows,
  request_id: Uuid,
  reviewer_id: Uuid,
  decision: ReviewDecision,
  reason: Option<String>,
) -> Result<ReviewOutcome> {
  require_hq(backend, reviewer_id).await?;
  let request = backend
    .approval_requests
    .find(request_id)
    .await?
    .ok_or_else(|| AppError::not_found("REQUEST_NOT_FOUND", format!("Signup request {} does not exist", request_id)))?;

  let mut context = ApproveRequestHookContext::new(request_id, reviewer_id, decision, reason.clone());
  context.request = Some(request);
  let ctx = ContextData::new(context);
  let workflow = match decision {
    ReviewDecision::Approve => &workflows.approve_request,
    ReviewDecision::Reject => &workflows.reject_request,
  };
  let mut run = workflow.begin(ctx.clone());

  let result: Result<SignupApprovalRequest> = async {
    run.run_before().await?;

    let target = decision.target_status();
    let transition = move |request: &mut SignupApprovalRequest| -> Result<()> {
      if request.status != ApprovalStatus::Pending {
        return Err(AppError::conflict(
          "INVALID_STATUS_TRANSITION",
          format!("Request is {} and can no longer be reviewed", request.status),
          details([("from", json!(request.status)), ("to", json!(target))]),
        ));
      }
      request.status = target;
      request.reviewed_by = Some(reviewer_id);
      request.reviewed_at = Some(Utc::now());
      request.reason = reason.clone();
      Ok(())
    };
    let updated = backend.approval_requests.update(request_id, &transition).await?;
    run.shared().set(keys::REQUEST_ID, request_id);
    run.shared().set(keys::PREVIOUS_STATUS, ApprovalStatus::Pending);

    run.run_after().await?;
    Ok(updated)
  }
  .await;

  let request = match result {
    Ok(request) => request,
    Err(e) => return Err(roll_back(&mut run, e).await),
  };

  let store_member_id = ctx.read().store_member_id;
  info!(%request_id, status = %request.status, "Signup request reviewed.");
  Ok(ReviewOutcome {
    request,
    store_member_id,
  })
}

pub async fn approve_signup_request(
  backend: &Backend,
  workflows: &Workflows,
  request_id: Uuid,
  reviewer_id: Uuid,
) -> Result<ReviewOutcome> {
  review_signup_request(backend, workflows, request_id, reviewer_id, ReviewDecision::Approve, None).await
}

pub async fn reject_signup_request(
  backend: &Backend,
  workflows: &Workflows,
  request_id: Uuid,
  reviewer_id: Uuid,
  reason: Option<String>,
) -> Result<ReviewOutcome> {
  review_signup_request(backend, workflows, request_id, reviewer_id, ReviewDecision::Reject, reason).await
}
