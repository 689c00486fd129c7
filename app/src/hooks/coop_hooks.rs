// app/src/hooks/coop_hooks.rs

use super::{keys, object_path};
use crate::errors::{AppError, Details, Result};
use crate::models::{CoopImage, Product};
use crate::services::backend::Backend;
use crate::services::storage::StoredObject;
use crate::workflows::contexts::{CreateCoopHookContext, CreateCoopInput};
use chrono::Utc;
use hookline::{ContextData, SharedState};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Highest unit price a co-op may be listed at.
pub const MAX_COOP_PRICE: u64 = 1_000_000_000;

pub fn coop_field_errors(input: &CreateCoopInput) -> Details {
  let mut errors = Details::new();
  if input.title.trim().is_empty() {
    errors.insert("title".into(), json!("Title is required."));
  }
  if input.price > MAX_COOP_PRICE {
    errors.insert("price".into(), json!(format!("Must not exceed {}.", MAX_COOP_PRICE)));
  }
  if input.max_quantity < 1 {
    errors.insert("maxQuantity".into(), json!("Must be at least 1."));
  }
  if input.end_at <= input.start_at {
    errors.insert("endAt".into(), json!("Must be after the start time."));
  }
  errors
}

#[instrument(name = "step::validate_coop_input", skip_all, err(Display))]
pub async fn validate_coop_input(
  _backend: Arc<Backend>,
  ctx: ContextData<CreateCoopHookContext>,
  _shared: SharedState,
) -> Result<()> {
  let errors = coop_field_errors(&ctx.read().input);
  if errors.is_empty() {
    Ok(())
  } else {
    Err(AppError::validation("INVALID_COOP", "Co-op form has invalid fields.", errors))
  }
}

/// Copies the source product into a row owned by the co-op's store.
#[instrument(name = "step::create_product", skip_all, err(Display))]
pub async fn create_product(
  backend: Arc<Backend>,
  ctx: ContextData<CreateCoopHookContext>,
  shared: SharedState,
) -> Result<()> {
  let (source_id, store_id) = {
    let guard = ctx.read();
    (guard.input.source_product_id, guard.store_id)
  };
  let source = backend
    .products
    .find(source_id)
    .await?
    .ok_or_else(|| AppError::not_found("PRODUCT_NOT_FOUND", format!("Product {} does not exist", source_id)))?;

  let copy = backend
    .products
    .insert(Product {
      id: Uuid::new_v4(),
      store_id,
      name: source.name,
      description: source.description,
      price: source.price,
      copied_from: Some(source.id),
      created_at: Utc::now(),
    })
    .await?;
  shared.set(keys::PRODUCT_ID, copy.id);
  ctx.write().product_id = Some(copy.id);
  info!(product_id = %copy.id, %source_id, "Product copied for co-op.");
  Ok(())
}

async fn record_coop_image(
  backend: &Backend,
  ctx: &ContextData<CreateCoopHookContext>,
  shared: &SharedState,
  coop_id: Uuid,
  stored: StoredObject,
  position: u32,
) -> Result<()> {
  shared.update(keys::COOP_IMAGE_PATHS, |paths: &mut Vec<String>| paths.push(stored.path.clone()));
  let row = backend
    .coop_images
    .insert(CoopImage {
      id: Uuid::new_v4(),
      coop_id,
      path: stored.path,
      public_url: stored.public_url,
      position,
    })
    .await?;
  shared.update(keys::COOP_IMAGE_IDS, |ids: &mut Vec<Uuid>| ids.push(row.id));
  ctx.write().images.push(row);
  Ok(())
}

/// Uploads the request's new images and copies the reused ones from the
/// product bucket into the co-op bucket, one row per image.
#[instrument(name = "step::create_coop_images", skip_all, err(Display))]
pub async fn create_coop_images(
  backend: Arc<Backend>,
  ctx: ContextData<CreateCoopHookContext>,
  shared: SharedState,
) -> Result<()> {
  let coop_id: Uuid = shared.require(keys::COOP_ID)?;
  let (new_images, images_to_copy) = {
    let mut guard = ctx.write();
    guard.coop_id = Some(coop_id);
    (guard.input.new_images.clone(), guard.input.images_to_copy.clone())
  };
  let coop_bucket = backend.config.coop_bucket.as_str();
  let product_bucket = backend.config.product_bucket.as_str();
  let mut position = 0u32;

  for image in new_images {
    let path = object_path(coop_id, &image.file_name);
    let stored = backend
      .storage
      .upload(coop_bucket, &path, image.bytes, &image.content_type)
      .await?;
    record_coop_image(&backend, &ctx, &shared, coop_id, stored, position).await?;
    position += 1;
  }

  for image in images_to_copy {
    let path = object_path(coop_id, &image.path);
    let stored = backend
      .storage
      .copy(product_bucket, &image.path, coop_bucket, &path)
      .await?;
    record_coop_image(&backend, &ctx, &shared, coop_id, stored, position).await?;
    position += 1;
  }

  debug!(%coop_id, images = position, "Co-op images stored.");
  Ok(())
}

pub async fn remove_coop_images(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateCoopHookContext>,
  shared: SharedState,
) -> Result<()> {
  let paths: Vec<String> = shared.get(keys::COOP_IMAGE_PATHS).unwrap_or_default();
  let ids: Vec<Uuid> = shared.get(keys::COOP_IMAGE_IDS).unwrap_or_default();
  let mut first_error = None;

  if !paths.is_empty() {
    if let Err(e) = backend.storage.remove(&backend.config.coop_bucket, &paths).await {
      warn!(error = %e, "Failed to remove co-op image objects.");
      first_error = Some(e);
    }
  }
  for id in ids {
    if let Err(e) = backend.coop_images.delete(id).await {
      warn!(image_id = %id, error = %e, "Failed to delete co-op image row.");
      first_error.get_or_insert(e);
    }
  }
  first_error.map_or(Ok(()), Err)
}

/// Undoes the caller's primary write: the co-op row.
pub async fn delete_coop(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateCoopHookContext>,
  shared: SharedState,
) -> Result<()> {
  if let Some(coop_id) = shared.get::<Uuid>(keys::COOP_ID) {
    let removed = backend.coops.delete(coop_id).await?;
    info!(%coop_id, removed, "Co-op compensated.");
  }
  Ok(())
}
