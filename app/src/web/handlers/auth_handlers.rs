// app/src/web/handlers/auth_handlers.rs

use crate::errors::AppError;
use crate::services::signup_service;
use crate::state::AppState;
use crate::workflows::contexts::SignupInput;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

#[instrument(
  name = "handler::signup",
  skip(app_state, req_payload),
  fields(req_email = %req_payload.email)
)]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SignupInput>,
) -> Result<HttpResponse, AppError> {
  let outcome = signup_service::signup(&app_state.backend, &app_state.workflows, req_payload.into_inner()).await?;
  info!(user_id = %outcome.user_id, "Signup request served.");
  Ok(HttpResponse::Created().json(json!({
    "message": "Signup successful.",
    "signup": outcome,
  })))
}
