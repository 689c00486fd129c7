// app/src/web/handlers/approval_handlers.rs

use super::acting_user;
use crate::errors::AppError;
use crate::services::approval_service;
use crate::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct RejectPayload {
  #[serde(default)]
  pub reason: Option<String>,
}

#[instrument(name = "handler::approve_request", skip(app_state, req), fields(request_id = %path.as_ref()))]
pub async fn approve_request_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let reviewer_id = acting_user(&req)?;
  let outcome =
    approval_service::approve_signup_request(&app_state.backend, &app_state.workflows, path.into_inner(), reviewer_id)
      .await?;
  Ok(HttpResponse::Ok().json(outcome))
}

/// The body is optional; without one the request is rejected with no reason.
#[instrument(name = "handler::reject_request", skip(app_state, req, req_payload), fields(request_id = %path.as_ref()))]
pub async fn reject_request_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<Uuid>,
  req_payload: Option<web::Json<RejectPayload>>,
) -> Result<HttpResponse, AppError> {
  let reviewer_id = acting_user(&req)?;
  let reason = req_payload.and_then(|payload| payload.into_inner().reason);
  let outcome = approval_service::reject_signup_request(
    &app_state.backend,
    &app_state.workflows,
    path.into_inner(),
    reviewer_id,
    reason,
  )
  .await?;
  Ok(HttpResponse::Ok().json(outcome))
}
