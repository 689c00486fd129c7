// tests/demo_flow_tests.rs
mod common;

use chrono::{Duration, Utc};
use common::{consumer_signup, Harness};
use coop_app::models::{CoopStatus, OrderStatus};
use coop_app::services::coop_service::create_coop;
use coop_app::services::identity::IdentityProvider;
use coop_app::services::order_service::create_order;
use coop_app::services::seed::{seed_demo_data, DEMO_PASSWORD};
use coop_app::services::signup_service::signup;
use coop_app::workflows::contexts::{CartLine, CreateCoopInput, CreateOrderInput, ImageToCopy};

#[tokio::test]
async fn seeded_store_runs_a_group_buy_end_to_end() {
  let h = Harness::new();
  let demo = seed_demo_data(h.backend()).await.expect("seed");

  assert_eq!(
    h.identity.verify_credentials("hq@example.com", DEMO_PASSWORD).await.unwrap(),
    Some(demo.hq_user_id)
  );

  let now = Utc::now();
  let coop = create_coop(
    h.backend(),
    h.workflows(),
    demo.store_id,
    demo.manager_user_id,
    CreateCoopInput {
      source_product_id: demo.product_id,
      title: "Apples for the block".to_string(),
      description: None,
      price: 20_000,
      max_quantity: 4,
      start_at: now - Duration::hours(1),
      end_at: now + Duration::days(3),
      new_images: Vec::new(),
      images_to_copy: vec![ImageToCopy {
        path: demo.product_image_path.clone(),
      }],
    },
  )
  .await
  .expect("create coop")
  .coop;
  assert_eq!(coop.status, CoopStatus::Ongoing);
  assert_eq!(h.coop_bucket_paths().len(), 1);

  let buyer = signup(h.backend(), h.workflows(), consumer_signup("buyer@example.com"))
    .await
    .expect("signup");
  let order = create_order(
    h.backend(),
    h.workflows(),
    buyer.user_id,
    CreateOrderInput {
      lines: vec![CartLine {
        coop_id: coop.id,
        quantity: 4,
      }],
    },
  )
  .await
  .expect("order");

  assert_eq!(order.order.status, OrderStatus::Pending);
  assert_eq!(order.order.total_price, 80_000);
  let stored = h.coops.rows().into_iter().find(|c| c.id == coop.id).expect("coop row");
  assert_eq!(stored.available_quantity(), 0);
}
