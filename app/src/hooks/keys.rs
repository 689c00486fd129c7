// app/src/hooks/keys.rs

//! Shared-state keys. Values are stored with the Rust type noted on each key.

/// `Uuid` of the auth user created by signup.
pub const USER_ID: &str = "userId";
/// `Uuid`
pub const PROFILE_ID: &str = "profileId";
/// `Uuid`
pub const APPROVAL_REQUEST_ID: &str = "approvalRequestId";
/// `Uuid` of the product created by the run (a copy, for co-ops).
pub const PRODUCT_ID: &str = "productId";
/// `Uuid`
pub const COOP_ID: &str = "coopId";
/// `Vec<String>`, appended to as each object lands in the co-op bucket.
pub const COOP_IMAGE_PATHS: &str = "coopImagePaths";
/// `Vec<Uuid>`
pub const COOP_IMAGE_IDS: &str = "coopImageIds";
/// `Vec<String>`, appended to as each object lands in the product bucket.
pub const PRODUCT_IMAGE_PATHS: &str = "productImagePaths";
/// `Vec<Uuid>`
pub const PRODUCT_IMAGE_IDS: &str = "productImageIds";
/// `Uuid`
pub const ORDER_ID: &str = "orderId";
/// `Vec<Uuid>`
pub const ORDER_ITEM_IDS: &str = "orderItemIds";
/// `Vec<(Uuid, u32)>`: co-op id and quantity added to its ordered total.
pub const RESERVED_QUANTITIES: &str = "reservedQuantities";
/// `Uuid` of a membership inserted by the approve workflow.
pub const STORE_MEMBER_ID: &str = "storeMemberId";
/// `ApprovalStatus` a reviewed request had before the transition.
pub const PREVIOUS_STATUS: &str = "previousStatus";
/// `Uuid`
pub const REQUEST_ID: &str = "requestId";
