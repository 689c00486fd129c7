// app/src/services/signup_service.rs

use super::backend::Backend;
use super::roll_back;
use crate::errors::Result;
use crate::hooks::keys;
use crate::models::ApprovalStatus;
use crate::workflows::contexts::{SignupHookContext, SignupInput};
use crate::workflows::Workflows;
use hookline::ContextData;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupOutcome {
  pub user_id: Uuid,
  pub profile_id: Uuid,
  pub approval_request_id: Uuid,
  pub approval_status: ApprovalStatus,
}

/// Creates the auth user, then its role claim, profile and approval request.
/// Any failure removes whatever was already created.
#[instrument(name = "service::signup", skip_all, fields(email = %input.email), err(Display))]
pub async fn signup(backend: &Backend, workflows: &Workflows, input: SignupInput) -> Result<SignupOutcome> {
  let ctx = ContextData::new(SignupHookContext::new(input));
  let mut run = workflows.signup.begin(ctx.clone());

  let result: Result<()> = async {
    run.run_before().await?;

    let (email, password) = {
      let guard = ctx.read();
      (guard.input.email.clone(), guard.input.password.clone())
    };
    let user_id = backend.identity.create_user(&email, &password).await?;
    run.shared().set(keys::USER_ID, user_id);
    ctx.write().user_id = Some(user_id);

    run.run_after().await?;
    Ok(())
  }
  .await;

  if let Err(e) = result {
    return Err(roll_back(&mut run, e).await);
  }

  let shared = run.shared();
  let outcome = SignupOutcome {
    user_id: shared.require(keys::USER_ID)?,
    profile_id: shared.require(keys::PROFILE_ID)?,
    approval_request_id: shared.require(keys::APPROVAL_REQUEST_ID)?,
    approval_status: ctx.read().approval_status.unwrap_or(ApprovalStatus::Pending),
  };
  info!(user_id = %outcome.user_id, status = %outcome.approval_status, "Signup completed.");
  Ok(outcome)
}
