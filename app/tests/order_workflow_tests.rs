// tests/order_workflow_tests.rs
mod common;

use common::Harness;
use coop_app::errors::AppError;
use coop_app::hooks::order_hooks::validate_order_creation;
use coop_app::models::{CoopStatus, UserType};
use coop_app::services::order_service::create_order;
use coop_app::services::repository::Repository;
use coop_app::hooks::keys;
use coop_app::workflows::contexts::{CartLine, CreateOrderHookContext, CreateOrderInput};
use hookline::ContextData;
use serde_json::json;
use uuid::Uuid;

fn order_of(lines: &[(Uuid, u32)]) -> CreateOrderInput {
  CreateOrderInput {
    lines: lines
      .iter()
      .map(|&(coop_id, quantity)| CartLine { coop_id, quantity })
      .collect(),
  }
}

async fn ordered_quantity(h: &Harness, coop_id: Uuid) -> u32 {
  h.coops.find(coop_id).await.unwrap().expect("coop").ordered_quantity
}

#[tokio::test]
async fn quantity_beyond_what_is_left_is_refused_with_the_available_amount() {
  let h = Harness::new();
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 8, 3_000).await;

  let err = validate_order_creation(h.backend(), &[CartLine { coop_id: coop.id, quantity: 3 }])
    .await
    .unwrap_err();
  match &err {
    AppError::BusinessRule { code, details, .. } => {
      assert_eq!(*code, "QUANTITY_EXCEEDED");
      assert_eq!(details.get("availableQuantity"), Some(&json!(2)));
      assert_eq!(details.get("requestedQuantity"), Some(&json!(3)));
      assert_eq!(details.get("coopId"), Some(&json!(coop.id)));
    }
    other => panic!("expected a business rule failure, got {:?}", other),
  }

  let priced = validate_order_creation(h.backend(), &[CartLine { coop_id: coop.id, quantity: 2 }])
    .await
    .expect("two are left");
  assert_eq!(priced.len(), 1);
  assert_eq!(priced[0].price, 3_000);
}

#[tokio::test]
async fn order_creates_items_and_reserves_quantity() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 8, 3_000).await;

  let outcome = create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 2)]))
    .await
    .expect("order");

  assert_eq!(outcome.order.total_price, 6_000);
  assert_eq!(outcome.items.len(), 1);
  assert_eq!(outcome.items[0].total_price, 6_000);
  assert_eq!(outcome.items[0].order_id, outcome.order.id);
  assert_eq!(ordered_quantity(&h, coop.id).await, 10);
}

#[tokio::test]
async fn line_total_too_large_for_the_ledger_is_refused_before_any_write() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 0, u64::MAX / 2 + 1).await;

  let err = create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 2)]))
    .await
    .unwrap_err();

  assert!(matches!(err, AppError::BusinessRule { code: "ORDER_TOTAL_OVERFLOW", .. }));
  assert!(h.orders.is_empty());
  assert!(h.order_items.is_empty());
  assert_eq!(ordered_quantity(&h, coop.id).await, 0);
}

#[tokio::test]
async fn order_total_overflowing_across_lines_is_refused() {
  let h = Harness::new();
  let first = h.seed_coop(CoopStatus::Ongoing, 10, 0, u64::MAX - 1).await;
  let second = h.seed_coop(CoopStatus::Ongoing, 10, 0, 2).await;

  let err = validate_order_creation(
    h.backend(),
    &[
      CartLine { coop_id: first.id, quantity: 1 },
      CartLine { coop_id: second.id, quantity: 1 },
    ],
  )
  .await
  .unwrap_err();

  assert_eq!(err.code(), "ORDER_TOTAL_OVERFLOW");
  assert_eq!(err.details().get("coopIds"), Some(&json!([first.id, second.id])));
}

#[tokio::test]
async fn lines_for_the_same_coop_are_summed() {
  let h = Harness::new();
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 8, 1_000).await;

  let err = validate_order_creation(
    h.backend(),
    &[
      CartLine { coop_id: coop.id, quantity: 1 },
      CartLine { coop_id: coop.id, quantity: 2 },
    ],
  )
  .await
  .unwrap_err();

  assert_eq!(err.code(), "QUANTITY_EXCEEDED");
  assert_eq!(err.details().get("requestedQuantity"), Some(&json!(3)));
}

#[tokio::test]
async fn closed_coop_is_not_orderable() {
  let h = Harness::new();
  let coop = h.seed_coop(CoopStatus::Closed, 10, 0, 1_000).await;

  let err = validate_order_creation(h.backend(), &[CartLine { coop_id: coop.id, quantity: 1 }])
    .await
    .unwrap_err();
  assert_eq!(err.code(), "COOP_NOT_ORDERABLE");
}

#[tokio::test]
async fn unknown_coop_and_zero_quantity_are_rejected() {
  let h = Harness::new();
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 0, 1_000).await;

  let missing = validate_order_creation(h.backend(), &[CartLine { coop_id: Uuid::new_v4(), quantity: 1 }])
    .await
    .unwrap_err();
  assert!(matches!(missing, AppError::NotFound { code: "COOP_NOT_FOUND", .. }));

  let zero = validate_order_creation(h.backend(), &[CartLine { coop_id: coop.id, quantity: 0 }])
    .await
    .unwrap_err();
  assert!(matches!(zero, AppError::Validation { .. }));

  let empty = validate_order_creation(h.backend(), &[]).await.unwrap_err();
  assert_eq!(empty.code(), "EMPTY_ORDER");
}

#[tokio::test]
async fn item_failure_removes_the_order() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let coop = h.seed_coop(CoopStatus::Ongoing, 10, 0, 1_000).await;
  h.order_items.fail_next_insert();

  let err = create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 1)]))
    .await
    .unwrap_err();

  assert_eq!(err.code(), "DATA_STORE_FAILURE");
  assert!(h.orders.is_empty());
  assert!(h.order_items.is_empty());
  assert_eq!(ordered_quantity(&h, coop.id).await, 0);
}

#[tokio::test]
async fn reservation_failure_releases_earlier_reservations_and_removes_everything() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let first = h.seed_coop(CoopStatus::Ongoing, 10, 1, 1_000).await;
  let second = h.seed_coop(CoopStatus::Ongoing, 10, 4, 2_000).await;
  h.coops.fail_update_on(2);

  let err = create_order(
    h.backend(),
    h.workflows(),
    buyer,
    order_of(&[(first.id, 3), (second.id, 2)]),
  )
  .await
  .unwrap_err();

  assert_eq!(err.code(), "DATA_STORE_FAILURE");
  assert_eq!(ordered_quantity(&h, first.id).await, 1);
  assert_eq!(ordered_quantity(&h, second.id).await, 4);
  assert!(h.orders.is_empty());
  assert!(h.order_items.is_empty());
}

#[tokio::test]
async fn competing_orders_cannot_oversell() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let coop = h.seed_coop(CoopStatus::Ongoing, 5, 0, 1_000).await;

  let (a, b) = tokio::join!(
    create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 4)])),
    create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 4)])),
  );

  let failures: Vec<AppError> = [a, b].into_iter().filter_map(Result::err).collect();
  assert_eq!(failures.len(), 1);
  assert_eq!(failures[0].code(), "QUANTITY_EXCEEDED");
  assert_eq!(ordered_quantity(&h, coop.id).await, 4);
  assert_eq!(h.orders.len(), 1);
  assert_eq!(h.order_items.len(), 1);
}

#[tokio::test]
async fn capacity_taken_after_validation_is_caught_by_the_reservation() {
  let h = Harness::new();
  let buyer = h.seed_user(UserType::Consumer, None).await;
  let coop = h.seed_coop(CoopStatus::Ongoing, 5, 0, 1_000).await;
  let input = order_of(&[(coop.id, 4)]);

  let stale = validate_order_creation(h.backend(), &input.lines).await.expect("fits for now");
  create_order(h.backend(), h.workflows(), buyer, order_of(&[(coop.id, 4)]))
    .await
    .expect("competing order");

  let ctx = ContextData::new(CreateOrderHookContext::new(buyer, input, stale));
  let mut run = h.workflows().create_order.begin(ctx);
  run.shared().set(keys::ORDER_ID, Uuid::new_v4());
  let err = run.run_after().await.unwrap_err();
  assert_eq!(err.code(), "QUANTITY_EXCEEDED");

  let report = run.run_cleanup().await;
  assert!(report.is_clean());
  assert_eq!(report.compensated(), vec!["reserve_coop_quantity", "create_order_items", "delete_order"]);
  assert_eq!(ordered_quantity(&h, coop.id).await, 4);
  assert_eq!(h.order_items.len(), 1);
}

#[tokio::test]
async fn buyer_without_profile_is_refused() {
  let h = Harness::new();
  let coop = h.seed_coop(CoopStatus::Ongoing, 5, 0, 1_000).await;

  let err = create_order(h.backend(), h.workflows(), Uuid::new_v4(), order_of(&[(coop.id, 1)]))
    .await
    .unwrap_err();
  assert_eq!(err.code(), "UNKNOWN_USER");
}
