// app/src/models/profile.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
  Consumer,
  StoreManager,
  Hq,
}

impl fmt::Display for UserType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      UserType::Consumer => "CONSUMER",
      UserType::StoreManager => "STORE_MANAGER",
      UserType::Hq => "HQ",
    };
    f.write_str(s)
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub id: Uuid,
  pub user_id: Uuid,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub user_type: UserType,
  pub created_at: DateTime<Utc>,
}

impl Record for Profile {
  const TABLE: &'static str = "profiles";

  fn id(&self) -> Uuid {
    self.id
  }
}
