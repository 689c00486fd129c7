// app/src/models/coop.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoopStatus {
  Preparing,
  Ongoing,
  Closed,
  Cancelled,
}

impl CoopStatus {
  /// Status a freshly created co-op starts in, given its sales window.
  pub fn initial(start_at: DateTime<Utc>, end_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
    if now >= end_at {
      CoopStatus::Closed
    } else if now >= start_at {
      CoopStatus::Ongoing
    } else {
      CoopStatus::Preparing
    }
  }
}

impl fmt::Display for CoopStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      CoopStatus::Preparing => "PREPARING",
      CoopStatus::Ongoing => "ONGOING",
      CoopStatus::Closed => "CLOSED",
      CoopStatus::Cancelled => "CANCELLED",
    };
    f.write_str(s)
  }
}

/// A time-boxed group purchase of one product in one store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coop {
  pub id: Uuid,
  pub store_id: Uuid,
  pub product_id: Uuid,
  pub title: String,
  pub description: Option<String>,
  pub price: u64,
  pub max_quantity: u32,
  pub ordered_quantity: u32,
  pub status: CoopStatus,
  pub start_at: DateTime<Utc>,
  pub end_at: DateTime<Utc>,
  pub created_at: DateTime<Utc>,
}

impl Coop {
  pub fn available_quantity(&self) -> u32 {
    self.max_quantity.saturating_sub(self.ordered_quantity)
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoopImage {
  pub id: Uuid,
  pub coop_id: Uuid,
  pub path: String,
  pub public_url: String,
  pub position: u32,
}

impl Record for Coop {
  const TABLE: &'static str = "coops";

  fn id(&self) -> Uuid {
    self.id
  }
}

impl Record for CoopImage {
  const TABLE: &'static str = "coop_images";

  fn id(&self) -> Uuid {
    self.id
  }
}
