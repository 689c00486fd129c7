// app/src/workflows/coop_workflow.rs

use super::contexts::CreateCoopHookContext;
use crate::errors::AppError;
use crate::hooks::{bind, coop_hooks, product_hooks};
use crate::services::backend::Backend;
use hookline::{HookContext, HookRegistry};
use std::sync::Arc;

pub type CoopWorkflow = HookRegistry<CreateCoopHookContext, AppError>;

/// before: validate_coop_input, create_product (copy of the source product)
/// primary (caller): insert the co-op, stash `coopId`
/// after: create_coop_images
/// standalone cleanup: delete_coop
///
/// On failure the images go first, then the co-op, then the product copy.
pub fn build_coop_workflow(backend: &Arc<Backend>) -> CoopWorkflow {
  let mut workflow = CoopWorkflow::new("create_coop");
  workflow
    .before(HookContext::new("validate_coop_input").hook(bind(backend, coop_hooks::validate_coop_input)))
    .before(
      HookContext::new("create_product")
        .hook(bind(backend, coop_hooks::create_product))
        .cleanup(bind(backend, product_hooks::delete_product::<CreateCoopHookContext>)),
    )
    .after(
      HookContext::new("create_coop_images")
        .hook(bind(backend, coop_hooks::create_coop_images))
        .cleanup(bind(backend, coop_hooks::remove_coop_images)),
    )
    .cleanup(HookContext::new("delete_coop").cleanup(bind(backend, coop_hooks::delete_coop)));
  workflow
}
