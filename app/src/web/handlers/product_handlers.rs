// app/src/web/handlers/product_handlers.rs

use super::acting_user;
use crate::errors::AppError;
use crate::services::product_service;
use crate::state::AppState;
use crate::workflows::contexts::CreateProductInput;
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::instrument;
use uuid::Uuid;

#[instrument(name = "handler::create_product", skip(app_state, req, req_payload), fields(store_id = %path.as_ref()))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  path: web::Path<Uuid>,
  req_payload: web::Json<CreateProductInput>,
) -> Result<HttpResponse, AppError> {
  let user_id = acting_user(&req)?;
  let outcome = product_service::create_product(
    &app_state.backend,
    &app_state.workflows,
    path.into_inner(),
    user_id,
    req_payload.into_inner(),
  )
  .await?;
  Ok(HttpResponse::Created().json(outcome))
}
