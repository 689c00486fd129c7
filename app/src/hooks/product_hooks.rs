// app/src/hooks/product_hooks.rs

use super::{keys, object_path};
use crate::errors::Result;
use crate::models::ProductImage;
use crate::services::backend::Backend;
use crate::workflows::contexts::CreateProductHookContext;
use hookline::{ContextData, SharedState};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Uploads each image to the product bucket and records a row for it. Paths
/// and row ids are stashed one by one so a failure half-way leaves the
/// compensation a complete list.
#[instrument(name = "step::create_product_images", skip_all, err(Display))]
pub async fn create_product_images(
  backend: Arc<Backend>,
  ctx: ContextData<CreateProductHookContext>,
  shared: SharedState,
) -> Result<()> {
  let product_id: Uuid = shared.require(keys::PRODUCT_ID)?;
  let images = ctx.read().input.images.clone();
  let bucket = backend.config.product_bucket.as_str();

  for (position, image) in (0u32..).zip(images) {
    let path = object_path(product_id, &image.file_name);
    let stored = backend
      .storage
      .upload(bucket, &path, image.bytes, &image.content_type)
      .await?;
    shared.update(keys::PRODUCT_IMAGE_PATHS, |paths: &mut Vec<String>| paths.push(stored.path.clone()));

    let row = backend
      .product_images
      .insert(ProductImage {
        id: Uuid::new_v4(),
        product_id,
        path: stored.path,
        public_url: stored.public_url,
        position,
      })
      .await?;
    shared.update(keys::PRODUCT_IMAGE_IDS, |ids: &mut Vec<Uuid>| ids.push(row.id));
    ctx.write().image_ids.push(row.id);
  }
  debug!(%product_id, "Product images stored.");
  Ok(())
}

/// Removes every stashed object and row, carrying on past individual
/// failures and reporting the first one.
pub async fn remove_product_images(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateProductHookContext>,
  shared: SharedState,
) -> Result<()> {
  let paths: Vec<String> = shared.get(keys::PRODUCT_IMAGE_PATHS).unwrap_or_default();
  let ids: Vec<Uuid> = shared.get(keys::PRODUCT_IMAGE_IDS).unwrap_or_default();
  let mut first_error = None;

  if !paths.is_empty() {
    if let Err(e) = backend.storage.remove(&backend.config.product_bucket, &paths).await {
      warn!(error = %e, "Failed to remove product image objects.");
      first_error = Some(e);
    }
  }
  for id in ids {
    if let Err(e) = backend.product_images.delete(id).await {
      warn!(image_id = %id, error = %e, "Failed to delete product image row.");
      first_error.get_or_insert(e);
    }
  }
  first_error.map_or(Ok(()), Err)
}

/// Deletes the product stashed under `productId`. Undoes the primary write of
/// product creation and the product copy made for a co-op.
pub async fn delete_product<TData>(backend: Arc<Backend>, _ctx: ContextData<TData>, shared: SharedState) -> Result<()>
where
  TData: Send + Sync + 'static,
{
  if let Some(product_id) = shared.get::<Uuid>(keys::PRODUCT_ID) {
    let removed = backend.products.delete(product_id).await?;
    info!(%product_id, removed, "Product compensated.");
  }
  Ok(())
}
