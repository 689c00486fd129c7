// app/src/services/order_service.rs

use super::authz::require_profile;
use super::backend::Backend;
use super::roll_back;
use crate::errors::Result;
use crate::hooks::keys;
use crate::hooks::order_hooks::{order_total, validate_order_creation};
use crate::models::{Order, OrderItem, OrderStatus};
use crate::workflows::contexts::{CreateOrderHookContext, CreateOrderInput};
use crate::workflows::Workflows;
use chrono::Utc;
use hookline::ContextData;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutcome {
  pub order: Order,
  pub items: Vec<OrderItem>,
}

#[instrument(name = "service::create_order", skip(backend, workflows, input), err(Display))]
pub async fn create_order(
  backend: &Backend,
  workflows: &Workflows,
  user_id: Uuid,
  input: CreateOrderInput,
) -> Result<OrderOutcome> {
  require_profile(backend, user_id).await?;
  let priced_lines = validate_order_creation(backend, &input.lines).await?;

  let ctx = ContextData::new(CreateOrderHookContext::new(user_id, input, priced_lines));
  let mut run = workflows.create_order.begin(ctx.clone());

  let result: Result<Order> = async {
    run.run_before().await?;

    let total_price = order_total(&ctx.map_read(|c| &c.priced_lines))?;
    let order = backend
      .orders
      .insert(Order {
        id: Uuid::new_v4(),
        user_id,
        status: OrderStatus::Pending,
        total_price,
        created_at: Utc::now(),
      })
      .await?;
    run.shared().set(keys::ORDER_ID, order.id);
    ctx.write().order_id = Some(order.id);

    run.run_after().await?;
    Ok(order)
  }
  .await;

  let order = match result {
    Ok(order) => order,
    Err(e) => return Err(roll_back(&mut run, e).await),
  };

  let order_id = order.id;
  let items = backend
    .order_items
    .select(&|item: &OrderItem| item.order_id == order_id)
    .await?;
  info!(%order_id, total_price = order.total_price, items = items.len(), "Order created.");
  Ok(OrderOutcome { order, items })
}
