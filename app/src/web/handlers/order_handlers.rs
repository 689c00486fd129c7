// app/src/web/handlers/order_handlers.rs

use super::acting_user;
use crate::errors::AppError;
use crate::services::order_service;
use crate::state::AppState;
use crate::workflows::contexts::CreateOrderInput;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::instrument;

#[instrument(name = "handler::create_order", skip_all, fields(lines = req_payload.lines.len()))]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  req_payload: web::Json<CreateOrderInput>,
) -> Result<HttpResponse, AppError> {
  let user_id = acting_user(&req)?;
  let outcome =
    order_service::create_order(&app_state.backend, &app_state.workflows, user_id, req_payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(outcome))
}
