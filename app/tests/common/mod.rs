// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper.

use chrono::{Duration, Utc};
use coop_app::config::AppConfig;
use coop_app::models::{
  ApprovalStatus, Coop, CoopImage, CoopStatus, Order, OrderItem, Product, ProductImage, Profile,
  SignupApprovalRequest, Store, StoreMember, UserType,
};
use coop_app::services::backend::Backend;
use coop_app::services::identity::{IdentityProvider, MemoryIdentityProvider};
use coop_app::services::repository::{MemoryRepository, Repository};
use coop_app::services::storage::{BlobStorage, MemoryBlobStorage};
use coop_app::state::AppState;
use coop_app::workflows::contexts::{NewImage, SignupInput};
use coop_app::workflows::Workflows;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;

/// In-memory backend with typed handles on every collaborator, so tests can
/// inject faults and inspect what was left behind.
pub struct Harness {
  pub config: Arc<AppConfig>,
  pub profiles: Arc<MemoryRepository<Profile>>,
  pub stores: Arc<MemoryRepository<Store>>,
  pub store_members: Arc<MemoryRepository<StoreMember>>,
  pub approval_requests: Arc<MemoryRepository<SignupApprovalRequest>>,
  pub products: Arc<MemoryRepository<Product>>,
  pub product_images: Arc<MemoryRepository<ProductImage>>,
  pub coops: Arc<MemoryRepository<Coop>>,
  pub coop_images: Arc<MemoryRepository<CoopImage>>,
  pub orders: Arc<MemoryRepository<Order>>,
  pub order_items: Arc<MemoryRepository<OrderItem>>,
  pub storage: Arc<MemoryBlobStorage>,
  pub identity: Arc<MemoryIdentityProvider>,
  pub state: AppState,
}

impl Harness {
  pub fn new() -> Self {
    setup_tracing();
    let config = Arc::new(AppConfig::default());
    let profiles = Arc::new(MemoryRepository::new());
    let stores = Arc::new(MemoryRepository::new());
    let store_members = Arc::new(MemoryRepository::new());
    let approval_requests = Arc::new(MemoryRepository::new());
    let products = Arc::new(MemoryRepository::new());
    let product_images = Arc::new(MemoryRepository::new());
    let coops = Arc::new(MemoryRepository::new());
    let coop_images = Arc::new(MemoryRepository::new());
    let orders = Arc::new(MemoryRepository::new());
    let order_items = Arc::new(MemoryRepository::new());
    let storage = Arc::new(MemoryBlobStorage::new(config.storage_public_url.clone()));
    let identity = Arc::new(MemoryIdentityProvider::new());

    let backend = Backend {
      profiles: profiles.clone(),
      stores: stores.clone(),
      store_members: store_members.clone(),
      approval_requests: approval_requests.clone(),
      products: products.clone(),
      product_images: product_images.clone(),
      coops: coops.clone(),
      coop_images: coop_images.clone(),
      orders: orders.clone(),
      order_items: order_items.clone(),
      storage: storage.clone(),
      identity: identity.clone(),
      config: config.clone(),
    };

    Self {
      config,
      profiles,
      stores,
      store_members,
      approval_requests,
      products,
      product_images,
      coops,
      coop_images,
      orders,
      order_items,
      storage,
      identity,
      state: AppState::new(backend),
    }
  }

  pub fn backend(&self) -> &Backend {
    &self.state.backend
  }

  pub fn workflows(&self) -> &Workflows {
    &self.state.workflows
  }

  pub async fn seed_store(&self, name: &str) -> Store {
    self
      .stores
      .insert(Store {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: None,
        created_at: Utc::now(),
      })
      .await
      .expect("seed store")
  }

  /// An auth user with role and profile, bypassing the signup workflow. A
  /// `store_id` also makes the user a member of that store.
  pub async fn seed_user(&self, user_type: UserType, store_id: Option<Uuid>) -> Uuid {
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let user_id = self.identity.create_user(&email, "seed-password").await.expect("seed user");
    self.identity.grant_role(user_id, user_type).await.expect("seed role");
    self
      .profiles
      .insert(Profile {
        id: Uuid::new_v4(),
        user_id,
        name: "Seeded".to_string(),
        email,
        phone: "010-1111-2222".to_string(),
        user_type,
        created_at: Utc::now(),
      })
      .await
      .expect("seed profile");
    if let Some(store_id) = store_id {
      self.seed_membership(user_id, store_id).await;
    }
    user_id
  }

  pub async fn seed_membership(&self, user_id: Uuid, store_id: Uuid) -> StoreMember {
    self
      .store_members
      .insert(StoreMember {
        id: Uuid::new_v4(),
        user_id,
        store_id,
        created_at: Utc::now(),
      })
      .await
      .expect("seed membership")
  }

  /// A catalog product with one image in the product bucket. Returns the
  /// product and the image's path.
  pub async fn seed_product(&self, store_id: Uuid) -> (Product, String) {
    let product = self
      .products
      .insert(Product {
        id: Uuid::new_v4(),
        store_id,
        name: "Tangerines 3kg".to_string(),
        description: Some("Jeju".to_string()),
        price: 18_000,
        copied_from: None,
        created_at: Utc::now(),
      })
      .await
      .expect("seed product");
    let path = format!("{}/catalog.jpg", product.id);
    self
      .storage
      .upload(&self.config.product_bucket, &path, vec![1, 2, 3], "image/jpeg")
      .await
      .expect("seed product image");
    (product, path)
  }

  pub async fn seed_coop(&self, status: CoopStatus, max_quantity: u32, ordered_quantity: u32, price: u64) -> Coop {
    let now = Utc::now();
    self
      .coops
      .insert(Coop {
        id: Uuid::new_v4(),
        store_id: Uuid::new_v4(),
        product_id: Uuid::new_v4(),
        title: "Weekend strawberries".to_string(),
        description: None,
        price,
        max_quantity,
        ordered_quantity,
        status,
        start_at: now - Duration::days(1),
        end_at: now + Duration::days(6),
        created_at: now,
      })
      .await
      .expect("seed coop")
  }

  pub async fn seed_pending_request(&self, user_id: Uuid, store_id: Uuid) -> SignupApprovalRequest {
    self
      .approval_requests
      .insert(SignupApprovalRequest {
        id: Uuid::new_v4(),
        user_id,
        store_id: Some(store_id),
        status: ApprovalStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        reason: None,
        created_at: Utc::now(),
      })
      .await
      .expect("seed request")
  }

  pub fn coop_bucket_paths(&self) -> Vec<String> {
    self.storage.paths(&self.config.coop_bucket)
  }

  pub fn product_bucket_paths(&self) -> Vec<String> {
    self.storage.paths(&self.config.product_bucket)
  }
}

pub fn consumer_signup(email: &str) -> SignupInput {
  SignupInput {
    email: email.to_string(),
    password: "correct horse".to_string(),
    confirm_password: "correct horse".to_string(),
    name: "Lee".to_string(),
    phone1: "010".to_string(),
    phone2: "1234".to_string(),
    phone3: "5678".to_string(),
    user_type: UserType::Consumer,
    store_id: None,
  }
}

pub fn image(name: &str) -> NewImage {
  NewImage {
    file_name: name.to_string(),
    content_type: "image/png".to_string(),
    bytes: vec![0x89, 0x50, 0x4E, 0x47],
  }
}

// --- Helper for Tracing Setup ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
