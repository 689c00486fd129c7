// app/src/models/order.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Cancelled,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: Uuid,
  pub user_id: Uuid,
  pub status: OrderStatus,
  pub total_price: u64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub coop_id: Uuid,
  pub quantity: u32,
  pub price: u64,
  pub total_price: u64,
}

impl Record for Order {
  const TABLE: &'static str = "orders";

  fn id(&self) -> Uuid {
    self.id
  }
}

impl Record for OrderItem {
  const TABLE: &'static str = "order_items";

  fn id(&self) -> Uuid {
    self.id
  }
}
