// tests/product_workflow_tests.rs
mod common;

use common::{image, Harness};
use coop_app::models::UserType;
use coop_app::services::product_service::create_product;
use coop_app::services::storage::BlobStorage;
use coop_app::workflows::contexts::CreateProductInput;

fn product_input(images: usize) -> CreateProductInput {
  CreateProductInput {
    name: "Sweet potatoes".to_string(),
    description: None,
    price: 9_900,
    images: (0..images).map(|i| image(&format!("photo-{}.png", i))).collect(),
  }
}

#[tokio::test]
async fn product_with_images_lands_in_the_product_bucket() {
  let h = Harness::new();
  let store = h.seed_store("Songpa").await;
  let manager = h.seed_user(UserType::StoreManager, Some(store.id)).await;

  let outcome = create_product(h.backend(), h.workflows(), store.id, manager, product_input(2))
    .await
    .expect("create product");

  assert_eq!(outcome.product.store_id, store.id);
  assert_eq!(outcome.images.len(), 2);
  assert_eq!(outcome.images[0].position, 0);
  assert!(outcome.images.iter().all(|i| i.product_id == outcome.product.id));
  assert_eq!(h.product_bucket_paths().len(), 2);
  assert!(h.coop_bucket_paths().is_empty());

  let bucket = &h.config.product_bucket;
  let first = &outcome.images[0];
  assert!(h.storage.exists(bucket, &first.path).await.unwrap());
  assert_eq!(h.storage.content_type(bucket, &first.path).as_deref(), Some("image/png"));
  assert_eq!(h.storage.size(bucket, &first.path), Some(4));
  assert!(first.public_url.ends_with(&format!("/{}/{}", bucket, first.path)));
}

#[tokio::test]
async fn upload_failure_removes_earlier_uploads_and_the_product() {
  let h = Harness::new();
  let store = h.seed_store("Songpa").await;
  let manager = h.seed_user(UserType::StoreManager, Some(store.id)).await;
  h.storage.fail_upload_on(2);

  let err = create_product(h.backend(), h.workflows(), store.id, manager, product_input(3))
    .await
    .unwrap_err();

  assert_eq!(err.code(), "STORAGE_FAILURE");
  assert!(h.products.is_empty());
  assert!(h.product_images.is_empty());
  assert!(h.product_bucket_paths().is_empty());
}

#[tokio::test]
async fn cleanup_failure_is_reported_in_logs_not_to_the_caller() {
  let h = Harness::new();
  let store = h.seed_store("Songpa").await;
  let manager = h.seed_user(UserType::StoreManager, Some(store.id)).await;
  h.product_images.fail_insert_on(2);
  h.storage.fail_next_remove();

  let err = create_product(h.backend(), h.workflows(), store.id, manager, product_input(2))
    .await
    .unwrap_err();

  assert_eq!(err.code(), "DATA_STORE_FAILURE");
  // Object removal failed, but the row and product compensations still ran.
  let leftovers = h.product_bucket_paths();
  assert_eq!(leftovers.len(), 2);
  for path in &leftovers {
    assert!(h.storage.exists(&h.config.product_bucket, path).await.unwrap());
  }
  assert!(h.product_images.is_empty());
  assert!(h.products.is_empty());
}

#[tokio::test]
async fn blank_name_and_non_members_are_refused() {
  let h = Harness::new();
  let store = h.seed_store("Songpa").await;
  let manager = h.seed_user(UserType::StoreManager, Some(store.id)).await;
  let consumer = h.seed_user(UserType::Consumer, None).await;

  let blank = CreateProductInput {
    name: "  ".to_string(),
    ..product_input(0)
  };
  let err = create_product(h.backend(), h.workflows(), store.id, manager, blank)
    .await
    .unwrap_err();
  assert_eq!(err.code(), "INVALID_PRODUCT");

  let err = create_product(h.backend(), h.workflows(), store.id, consumer, product_input(0))
    .await
    .unwrap_err();
  assert_eq!(err.code(), "NOT_STORE_MEMBER");
  assert!(h.products.is_empty());
}
