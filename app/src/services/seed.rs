// app/src/services/seed.rs

//! Demo data for local runs: an HQ account, a store with a manager, and a
//! catalog product with one image to build co-ops from.

use super::backend::Backend;
use crate::errors::Result;
use crate::models::{Product, ProductImage, Profile, Store, StoreMember, UserType};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

pub const DEMO_PASSWORD: &str = "demo-password";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoData {
  pub hq_user_id: Uuid,
  pub manager_user_id: Uuid,
  pub store_id: Uuid,
  pub product_id: Uuid,
  pub product_image_path: String,
}

async fn seed_account(backend: &Backend, email: &str, name: &str, user_type: UserType) -> Result<Uuid> {
  let user_id = backend.identity.create_user(email, DEMO_PASSWORD).await?;
  backend.identity.grant_role(user_id, user_type).await?;
  backend
    .profiles
    .insert(Profile {
      id: Uuid::new_v4(),
      user_id,
      name: name.to_string(),
      email: email.to_string(),
      phone: "010-0000-0000".to_string(),
      user_type,
      created_at: Utc::now(),
    })
    .await?;
  Ok(user_id)
}

#[instrument(name = "seed::seed_demo_data", skip_all, err(Display))]
pub async fn seed_demo_data(backend: &Backend) -> Result<DemoData> {
  let hq_user_id = seed_account(backend, "hq@example.com", "Headquarters", UserType::Hq).await?;
  let manager_user_id = seed_account(backend, "manager@example.com", "Demo Manager", UserType::StoreManager).await?;

  let store = backend
    .stores
    .insert(Store {
      id: Uuid::new_v4(),
      name: "Demo Store".to_string(),
      address: Some("1 Market Street".to_string()),
      created_at: Utc::now(),
    })
    .await?;
  backend
    .store_members
    .insert(StoreMember {
      id: Uuid::new_v4(),
      user_id: manager_user_id,
      store_id: store.id,
      created_at: Utc::now(),
    })
    .await?;

  let product = backend
    .products
    .insert(Product {
      id: Uuid::new_v4(),
      store_id: store.id,
      name: "Seasonal Apples (5kg)".to_string(),
      description: Some("Catalog product for demo co-ops.".to_string()),
      price: 25_000,
      copied_from: None,
      created_at: Utc::now(),
    })
    .await?;
  let image_path = format!("{}/apples.jpg", product.id);
  let stored = backend
    .storage
    .upload(&backend.config.product_bucket, &image_path, vec![0xFF, 0xD8, 0xFF], "image/jpeg")
    .await?;
  backend
    .product_images
    .insert(ProductImage {
      id: Uuid::new_v4(),
      product_id: product.id,
      path: stored.path.clone(),
      public_url: stored.public_url,
      position: 0,
    })
    .await?;

  let demo = DemoData {
    hq_user_id,
    manager_user_id,
    store_id: store.id,
    product_id: product.id,
    product_image_path: stored.path,
  };
  info!(?demo, "Demo data seeded.");
  Ok(demo)
}
