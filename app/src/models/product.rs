// app/src/models/product.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub store_id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub price: u64,
  /// Set when the row was copied from another product for a co-op.
  pub copied_from: Option<Uuid>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
  pub id: Uuid,
  pub product_id: Uuid,
  pub path: String,
  pub public_url: String,
  pub position: u32,
}

impl Record for Product {
  const TABLE: &'static str = "products";

  fn id(&self) -> Uuid {
    self.id
  }
}

impl Record for ProductImage {
  const TABLE: &'static str = "product_images";

  fn id(&self) -> Uuid {
    self.id
  }
}
