// app/src/services/backend.rs

use super::identity::{IdentityProvider, MemoryIdentityProvider};
use super::repository::{MemoryRepository, Repository};
use super::storage::{BlobStorage, MemoryBlobStorage};
use crate::config::AppConfig;
use crate::models::{
  Coop, CoopImage, Order, OrderItem, Product, ProductImage, Profile, SignupApprovalRequest, Store, StoreMember,
};
use std::sync::Arc;

/// Every external collaborator the workflow steps talk to.
#[derive(Clone)]
pub struct Backend {
  pub profiles: Arc<dyn Repository<Profile>>,
  pub stores: Arc<dyn Repository<Store>>,
  pub store_members: Arc<dyn Repository<StoreMember>>,
  pub approval_requests: Arc<dyn Repository<SignupApprovalRequest>>,
  pub products: Arc<dyn Repository<Product>>,
  pub product_images: Arc<dyn Repository<ProductImage>>,
  pub coops: Arc<dyn Repository<Coop>>,
  pub coop_images: Arc<dyn Repository<CoopImage>>,
  pub orders: Arc<dyn Repository<Order>>,
  pub order_items: Arc<dyn Repository<OrderItem>>,
  pub storage: Arc<dyn BlobStorage>,
  pub identity: Arc<dyn IdentityProvider>,
  pub config: Arc<AppConfig>,
}

impl Backend {
  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    Self {
      profiles: Arc::new(MemoryRepository::<Profile>::new()),
      stores: Arc::new(MemoryRepository::<Store>::new()),
      store_members: Arc::new(MemoryRepository::<StoreMember>::new()),
      approval_requests: Arc::new(MemoryRepository::<SignupApprovalRequest>::new()),
      products: Arc::new(MemoryRepository::<Product>::new()),
      product_images: Arc::new(MemoryRepository::<ProductImage>::new()),
      coops: Arc::new(MemoryRepository::<Coop>::new()),
      coop_images: Arc::new(MemoryRepository::<CoopImage>::new()),
      orders: Arc::new(MemoryRepository::<Order>::new()),
      order_items: Arc::new(MemoryRepository::<OrderItem>::new()),
      storage: Arc::new(MemoryBlobStorage::new(config.storage_public_url.clone())),
      identity: Arc::new(MemoryIdentityProvider::new()),
      config,
    }
  }
}
