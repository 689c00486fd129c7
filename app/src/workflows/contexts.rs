// app/src/workflows/contexts.rs

//! One typed context per workflow. The `input` part is what the caller
//! supplied; the `Option`/`Vec` fields next to it are filled in by the steps
//! as the run progresses.

use crate::models::{ApprovalStatus, CoopImage, SignupApprovalRequest, UserType};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

// --- Signup ---

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupInput {
  pub email: String,
  pub password: String,
  pub confirm_password: String,
  pub name: String,
  pub phone1: String,
  pub phone2: String,
  pub phone3: String,
  pub user_type: UserType,
  #[serde(default)]
  pub store_id: Option<Uuid>,
}

impl SignupInput {
  pub fn phone_number(&self) -> String {
    format!("{}-{}-{}", self.phone1, self.phone2, self.phone3)
  }
}

// Passwords stay out of logs.
impl fmt::Debug for SignupInput {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SignupInput")
      .field("email", &self.email)
      .field("name", &self.name)
      .field("phone", &self.phone_number())
      .field("user_type", &self.user_type)
      .field("store_id", &self.store_id)
      .finish_non_exhaustive()
  }
}

#[derive(Debug, Clone)]
pub struct SignupHookContext {
  pub input: SignupInput,
  pub user_id: Option<Uuid>,
  pub profile_id: Option<Uuid>,
  pub approval_request_id: Option<Uuid>,
  pub approval_status: Option<ApprovalStatus>,
}

impl SignupHookContext {
  pub fn new(input: SignupInput) -> Self {
    Self {
      input,
      user_id: None,
      profile_id: None,
      approval_request_id: None,
      approval_status: None,
    }
  }
}

// --- Images ---

/// An image uploaded with the request.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewImage {
  pub file_name: String,
  pub content_type: String,
  pub bytes: Vec<u8>,
}

impl fmt::Debug for NewImage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NewImage")
      .field("file_name", &self.file_name)
      .field("content_type", &self.content_type)
      .field("size", &self.bytes.len())
      .finish()
  }
}

/// An image already stored in the product bucket, reused by a co-op.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageToCopy {
  pub path: String,
}

// --- Product creation ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductInput {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  pub price: u64,
  #[serde(default)]
  pub images: Vec<NewImage>,
}

#[derive(Debug, Clone)]
pub struct CreateProductHookContext {
  pub store_id: Uuid,
  pub acting_user_id: Uuid,
  pub input: CreateProductInput,
  pub product_id: Option<Uuid>,
  pub image_ids: Vec<Uuid>,
}

impl CreateProductHookContext {
  pub fn new(store_id: Uuid, acting_user_id: Uuid, input: CreateProductInput) -> Self {
    Self {
      store_id,
      acting_user_id,
      input,
      product_id: None,
      image_ids: Vec::new(),
    }
  }
}

// --- Co-op creation ---

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoopInput {
  pub source_product_id: Uuid,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  pub price: u64,
  pub max_quantity: u32,
  pub start_at: DateTime<Utc>,
  pub end_at: DateTime<Utc>,
  #[serde(default)]
  pub new_images: Vec<NewImage>,
  #[serde(default)]
  pub images_to_copy: Vec<ImageToCopy>,
}

#[derive(Debug, Clone)]
pub struct CreateCoopHookContext {
  pub store_id: Uuid,
  pub acting_user_id: Uuid,
  pub input: CreateCoopInput,
  pub product_id: Option<Uuid>,
  pub coop_id: Option<Uuid>,
  pub images: Vec<CoopImage>,
}

impl CreateCoopHookContext {
  pub fn new(store_id: Uuid, acting_user_id: Uuid, input: CreateCoopInput) -> Self {
    Self {
      store_id,
      acting_user_id,
      input,
      product_id: None,
      coop_id: None,
      images: Vec::new(),
    }
  }
}

// --- Order creation ---

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub coop_id: Uuid,
  pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderInput {
  pub lines: Vec<CartLine>,
}

/// A cart line priced from its co-op at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
  pub coop_id: Uuid,
  pub quantity: u32,
  pub price: u64,
}

impl PricedLine {
  /// `None` when quantity times price does not fit in a `u64`.
  pub fn total_price(&self) -> Option<u64> {
    u64::from(self.quantity).checked_mul(self.price)
  }
}

#[derive(Debug, Clone)]
pub struct CreateOrderHookContext {
  pub user_id: Uuid,
  pub input: CreateOrderInput,
  pub priced_lines: Vec<PricedLine>,
  pub order_id: Option<Uuid>,
  pub item_ids: Vec<Uuid>,
}

impl CreateOrderHookContext {
  pub fn new(user_id: Uuid, input: CreateOrderInput, priced_lines: Vec<PricedLine>) -> Self {
    Self {
      user_id,
      input,
      priced_lines,
      order_id: None,
      item_ids: Vec::new(),
    }
  }
}

// --- Approval / rejection ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
  Approve,
  Reject,
}

impl ReviewDecision {
  pub fn target_status(self) -> ApprovalStatus {
    match self {
      ReviewDecision::Approve => ApprovalStatus::Approved,
      ReviewDecision::Reject => ApprovalStatus::Rejected,
    }
  }
}

/// Shared by the approve and reject workflows.
#[derive(Debug, Clone)]
pub struct ApproveRequestHookContext {
  pub request_id: Uuid,
  pub reviewer_id: Uuid,
  pub decision: ReviewDecision,
  pub reason: Option<String>,
  /// The request as it was before the transition.
  pub request: Option<SignupApprovalRequest>,
  pub store_member_id: Option<Uuid>,
}

impl ApproveRequestHookContext {
  pub fn new(request_id: Uuid, reviewer_id: Uuid, decision: ReviewDecision, reason: Option<String>) -> Self {
    Self {
      request_id,
      reviewer_id,
      decision,
      reason,
      request: None,
      store_member_id: None,
    }
  }
}
