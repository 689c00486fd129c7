// app/src/workflows/order_workflow.rs

use super::contexts::CreateOrderHookContext;
use crate::errors::AppError;
use crate::hooks::{bind, order_hooks};
use crate::services::backend::Backend;
use hookline::{HookContext, HookRegistry};
use std::sync::Arc;

pub type OrderWorkflow = HookRegistry<CreateOrderHookContext, AppError>;

/// pre-check (caller): order_hooks::validate_order_creation
/// primary (caller): insert the order, stash `orderId`
/// after: create_order_items, reserve_coop_quantity
/// standalone cleanup: delete_order
pub fn build_order_workflow(backend: &Arc<Backend>) -> OrderWorkflow {
  let mut workflow = OrderWorkflow::new("create_order");
  workflow
    .after(
      HookContext::new("create_order_items")
        .hook(bind(backend, order_hooks::create_order_items))
        .cleanup(bind(backend, order_hooks::delete_order_items)),
    )
    .after(
      HookContext::new("reserve_coop_quantity")
        .hook(bind(backend, order_hooks::reserve_coop_quantity))
        .cleanup(bind(backend, order_hooks::release_coop_quantity)),
    )
    .cleanup(HookContext::new("delete_order").cleanup(bind(backend, order_hooks::delete_order)));
  workflow
}
