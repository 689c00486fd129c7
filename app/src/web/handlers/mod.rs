// app/src/web/handlers/mod.rs

pub mod approval_handlers;
pub mod auth_handlers;
pub mod coop_handlers;
pub mod order_handlers;
pub mod product_handlers;

use crate::errors::{AppError, Result};
use actix_web::HttpRequest;
use uuid::Uuid;

/// Header the auth gateway in front of this service sets to the signed-in
/// user's id.
pub const ACTING_USER_HEADER: &str = "x-user-id";

pub fn acting_user(req: &HttpRequest) -> Result<Uuid> {
  let raw = req
    .headers()
    .get(ACTING_USER_HEADER)
    .ok_or_else(|| AppError::authorization("MISSING_USER", format!("Missing '{}' header", ACTING_USER_HEADER)))?;
  raw
    .to_str()
    .ok()
    .and_then(|value| Uuid::parse_str(value.trim()).ok())
    .ok_or_else(|| AppError::authorization("INVALID_USER", format!("'{}' is not a valid user id", ACTING_USER_HEADER)))
}
