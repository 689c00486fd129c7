// app/src/models/mod.rs

//! Records persisted through the repository capability.

pub mod approval;
pub mod coop;
pub mod order;
pub mod product;
pub mod profile;
pub mod store;

pub use approval::{ApprovalStatus, SignupApprovalRequest};
pub use coop::{Coop, CoopImage, CoopStatus};
pub use order::{Order, OrderItem, OrderStatus};
pub use product::{Product, ProductImage};
pub use profile::{Profile, UserType};
pub use store::{Store, StoreMember};
