// app/src/workflows/product_workflow.rs

use super::contexts::CreateProductHookContext;
use crate::errors::AppError;
use crate::hooks::{bind, product_hooks};
use crate::services::backend::Backend;
use hookline::{HookContext, HookRegistry};
use std::sync::Arc;

pub type ProductWorkflow = HookRegistry<CreateProductHookContext, AppError>;

/// primary (caller): insert the product, stash `productId`
/// after: create_product_images
/// standalone cleanup: delete_product
pub fn build_product_workflow(backend: &Arc<Backend>) -> ProductWorkflow {
  let mut workflow = ProductWorkflow::new("create_product");
  workflow
    .after(
      HookContext::new("create_product_images")
        .hook(bind(backend, product_hooks::create_product_images))
        .cleanup(bind(backend, product_hooks::remove_product_images)),
    )
    .cleanup(
      HookContext::new("delete_product")
        .cleanup(bind(backend, product_hooks::delete_product::<CreateProductHookContext>)),
    );
  workflow
}
