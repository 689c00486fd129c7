// app/src/models/store.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
  pub id: Uuid,
  pub name: String,
  pub address: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMember {
  pub id: Uuid,
  pub user_id: Uuid,
  pub store_id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl Record for Store {
  const TABLE: &'static str = "stores";

  fn id(&self) -> Uuid {
    self.id
  }
}

impl Record for StoreMember {
  const TABLE: &'static str = "store_members";

  fn id(&self) -> Uuid {
    self.id
  }
}
