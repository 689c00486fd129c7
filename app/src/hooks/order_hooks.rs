// app/src/hooks/order_hooks.rs

use super::keys;
use crate::errors::{details, AppError, Result};
use crate::models::{Coop, CoopStatus, OrderItem};
use crate::services::backend::Backend;
use crate::workflows::contexts::{CartLine, CreateOrderHookContext, PricedLine};
use hookline::{ContextData, SharedState};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub fn quantity_exceeded(coop_id: Uuid, requested: u32, available: u32) -> AppError {
  AppError::business_rule(
    "QUANTITY_EXCEEDED",
    format!(
      "Requested {} but only {} left in co-op {}",
      requested, available, coop_id
    ),
    details([
      ("coopId", json!(coop_id)),
      ("requestedQuantity", json!(requested)),
      ("availableQuantity", json!(available)),
    ]),
  )
}

fn total_overflow(lines: &[PricedLine]) -> AppError {
  AppError::business_rule(
    "ORDER_TOTAL_OVERFLOW",
    "Order total is too large to be charged.",
    details([(
      "coopIds",
      json!(lines.iter().map(|line| line.coop_id).collect::<Vec<_>>()),
    )]),
  )
}

/// Sum of every line's quantity times price.
pub fn order_total(lines: &[PricedLine]) -> Result<u64> {
  lines
    .iter()
    .try_fold(0u64, |sum, line| sum.checked_add(line.total_price()?))
    .ok_or_else(|| total_overflow(lines))
}

fn not_orderable(coop: &Coop) -> AppError {
  AppError::business_rule(
    "COOP_NOT_ORDERABLE",
    format!("Co-op {} is {} and cannot take orders", coop.id, coop.status),
    details([("coopId", json!(coop.id)), ("status", json!(coop.status))]),
  )
}

/// Checks a cart against the current state of its co-ops and prices every
/// line. Lines for the same co-op are summed before the capacity check.
///
/// Runs before the order exists, so it is a plain pre-check rather than a
/// step: nothing it does needs undoing.
#[instrument(name = "order::validate_order_creation", skip_all, fields(lines = lines.len()), err(Display))]
pub async fn validate_order_creation(backend: &Backend, lines: &[CartLine]) -> Result<Vec<PricedLine>> {
  if lines.is_empty() {
    return Err(AppError::validation(
      "EMPTY_ORDER",
      "An order needs at least one line.",
      details([("lines", json!("At least one line is required."))]),
    ));
  }

  let mut requested: Vec<(Uuid, u32)> = Vec::new();
  for line in lines {
    if line.quantity < 1 {
      return Err(AppError::validation(
        "INVALID_QUANTITY",
        "Quantity must be at least 1.",
        details([("coopId", json!(line.coop_id)), ("quantity", json!(line.quantity))]),
      ));
    }
    match requested.iter_mut().find(|(coop_id, _)| *coop_id == line.coop_id) {
      Some((_, total)) => *total = total.saturating_add(line.quantity),
      None => requested.push((line.coop_id, line.quantity)),
    }
  }

  let mut coops = Vec::with_capacity(requested.len());
  for (coop_id, quantity) in requested {
    let coop = backend
      .coops
      .find(coop_id)
      .await?
      .ok_or_else(|| AppError::not_found("COOP_NOT_FOUND", format!("Co-op {} does not exist", coop_id)))?;
    if coop.status != CoopStatus::Ongoing {
      return Err(not_orderable(&coop));
    }
    let available = coop.available_quantity();
    if quantity > available {
      return Err(quantity_exceeded(coop_id, quantity, available));
    }
    coops.push(coop);
  }

  let priced: Vec<PricedLine> = lines
    .iter()
    .filter_map(|line| {
      coops.iter().find(|coop| coop.id == line.coop_id).map(|coop| PricedLine {
        coop_id: line.coop_id,
        quantity: line.quantity,
        price: coop.price,
      })
    })
    .collect();
  order_total(&priced)?;
  Ok(priced)
}

#[instrument(name = "step::create_order_items", skip_all, err(Display))]
pub async fn create_order_items(
  backend: Arc<Backend>,
  ctx: ContextData<CreateOrderHookContext>,
  shared: SharedState,
) -> Result<()> {
  let order_id: Uuid = shared.require(keys::ORDER_ID)?;
  let lines = ctx.read().priced_lines.clone();
  for line in lines {
    let total_price = line
      .total_price()
      .ok_or_else(|| total_overflow(std::slice::from_ref(&line)))?;
    let item = backend
      .order_items
      .insert(OrderItem {
        id: Uuid::new_v4(),
        order_id,
        coop_id: line.coop_id,
        quantity: line.quantity,
        price: line.price,
        total_price,
      })
      .await?;
    shared.update(keys::ORDER_ITEM_IDS, |ids: &mut Vec<Uuid>| ids.push(item.id));
    ctx.write().item_ids.push(item.id);
  }
  debug!(%order_id, "Order items created.");
  Ok(())
}

pub async fn delete_order_items(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateOrderHookContext>,
  shared: SharedState,
) -> Result<()> {
  let ids: Vec<Uuid> = shared.get(keys::ORDER_ITEM_IDS).unwrap_or_default();
  let mut first_error = None;
  for id in ids {
    if let Err(e) = backend.order_items.delete(id).await {
      warn!(item_id = %id, error = %e, "Failed to delete order item.");
      first_error.get_or_insert(e);
    }
  }
  first_error.map_or(Ok(()), Err)
}

/// Adds each line's quantity to its co-op's ordered total. Capacity is
/// checked again inside the update, since other orders may have landed
/// since validation.
#[instrument(name = "step::reserve_coop_quantity", skip_all, err(Display))]
pub async fn reserve_coop_quantity(
  backend: Arc<Backend>,
  ctx: ContextData<CreateOrderHookContext>,
  shared: SharedState,
) -> Result<()> {
  let lines = ctx.read().priced_lines.clone();
  for line in lines {
    let quantity = line.quantity;
    let reserve = move |coop: &mut Coop| -> Result<()> {
      if coop.status != CoopStatus::Ongoing {
        return Err(not_orderable(coop));
      }
      let available = coop.available_quantity();
      if quantity > available {
        return Err(quantity_exceeded(coop.id, quantity, available));
      }
      coop.ordered_quantity += quantity;
      Ok(())
    };
    backend.coops.update(line.coop_id, &reserve).await?;
    shared.update(keys::RESERVED_QUANTITIES, |reserved: &mut Vec<(Uuid, u32)>| {
      reserved.push((line.coop_id, quantity))
    });
  }
  Ok(())
}

/// Gives back exactly what `reserve_coop_quantity` took, newest first.
pub async fn release_coop_quantity(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateOrderHookContext>,
  shared: SharedState,
) -> Result<()> {
  let reserved: Vec<(Uuid, u32)> = shared.get(keys::RESERVED_QUANTITIES).unwrap_or_default();
  let mut first_error = None;
  for (coop_id, quantity) in reserved.into_iter().rev() {
    let release = move |coop: &mut Coop| -> Result<()> {
      coop.ordered_quantity = coop.ordered_quantity.saturating_sub(quantity);
      Ok(())
    };
    if let Err(e) = backend.coops.update(coop_id, &release).await {
      warn!(%coop_id, quantity, error = %e, "Failed to release reserved quantity.");
      first_error.get_or_insert(e);
    }
  }
  first_error.map_or(Ok(()), Err)
}

/// Undoes the caller's primary write: the order row.
pub async fn delete_order(
  backend: Arc<Backend>,
  _ctx: ContextData<CreateOrderHookContext>,
  shared: SharedState,
) -> Result<()> {
  if let Some(order_id) = shared.get::<Uuid>(keys::ORDER_ID) {
    let removed = backend.orders.delete(order_id).await?;
    info!(%order_id, removed, "Order compensated.");
  }
  Ok(())
}
