// app/src/services/product_service.rs

use super::authz::require_store_member;
use super::backend::Backend;
use super::roll_back;
use crate::errors::{details, AppError, Result};
use crate::hooks::keys;
use crate::models::{Product, ProductImage};
use crate::workflows::contexts::{CreateProductHookContext, CreateProductInput};
use crate::workflows::Workflows;
use chrono::Utc;
use hookline::ContextData;
use serde::Serialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOutcome {
  pub product: Product,
  pub images: Vec<ProductImage>,
}

#[instrument(name = "service::create_product", skip(backend, workflows, input), err(Display))]
pub async fn create_product(
  backend: &Backend,
  workflows: &Workflows,
  store_id: Uuid,
  acting_user_id: Uuid,
  input: CreateProductInput,
) -> Result<ProductOutcome> {
  require_store_member(backend, acting_user_id, store_id).await?;
  if input.name.trim().is_empty() {
    return Err(AppError::validation(
      "INVALID_PRODUCT",
      "Product form has invalid fields.",
      details([("name", json!("Name is required."))]),
    ));
  }

  let ctx = ContextData::new(CreateProductHookContext::new(store_id, acting_user_id, input));
  let mut run = workflows.create_product.begin(ctx.clone());

  let result: Result<Product> = async {
    run.run_before().await?;

    let product = {
      let guard = ctx.read();
      Product {
        id: Uuid::new_v4(),
        store_id,
        name: guard.input.name.trim().to_string(),
        description: guard.input.description.clone(),
        price: guard.input.price,
        copied_from: None,
        created_at: Utc::now(),
      }
    };
    let product = backend.products.insert(product).await?;
    run.shared().set(keys::PRODUCT_ID, product.id);
    ctx.write().product_id = Some(product.id);

    run.run_after().await?;
    Ok(product)
  }
  .await;

  let product = match result {
    Ok(product) => product,
    Err(e) => return Err(roll_back(&mut run, e).await),
  };

  let product_id = product.id;
  let mut images = backend
    .product_images
    .select(&|image: &ProductImage| image.product_id == product_id)
    .await?;
  images.sort_by_key(|image| image.position);
  info!(%product_id, images = images.len(), "Product created.");
  Ok(ProductOutcome { product, images })
}
