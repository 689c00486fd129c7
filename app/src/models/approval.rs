// app/src/models/approval.rs

use crate::services::repository::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
  Pending,
  Approved,
  Rejected,
}

impl fmt::Display for ApprovalStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      ApprovalStatus::Pending => "PENDING",
      ApprovalStatus::Approved => "APPROVED",
      ApprovalStatus::Rejected => "REJECTED",
    };
    f.write_str(s)
  }
}

/// A store manager's request to join a store, reviewed by HQ.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupApprovalRequest {
  pub id: Uuid,
  pub user_id: Uuid,
  pub store_id: Option<Uuid>,
  pub status: ApprovalStatus,
  pub reviewed_by: Option<Uuid>,
  pub reviewed_at: Option<DateTime<Utc>>,
  pub reason: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Record for SignupApprovalRequest {
  const TABLE: &'static str = "signup_approval_requests";

  fn id(&self) -> Uuid {
    self.id
  }
}
