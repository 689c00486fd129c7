// app/src/workflows/mod.rs

//! Wires the step functions into one `HookRegistry` per business transaction.
//! Registries are built once at startup and shared by every request.

pub mod approval_workflow;
pub mod contexts;
pub mod coop_workflow;
pub mod order_workflow;
pub mod product_workflow;
pub mod signup_workflow;

use crate::services::backend::Backend;
use std::sync::Arc;

pub use approval_workflow::ReviewWorkflow;
pub use coop_workflow::CoopWorkflow;
pub use order_workflow::OrderWorkflow;
pub use product_workflow::ProductWorkflow;
pub use signup_workflow::SignupWorkflow;

/// Every workflow of the application. Approve and reject share a context
/// type, so they are held by field rather than looked up by type.
pub struct Workflows {
  pub signup: SignupWorkflow,
  pub create_product: ProductWorkflow,
  pub create_coop: CoopWorkflow,
  pub create_order: OrderWorkflow,
  pub approve_request: ReviewWorkflow,
  pub reject_request: ReviewWorkflow,
}

impl Workflows {
  pub fn wire(backend: &Arc<Backend>) -> Self {
    tracing::info!("Wiring workflows...");
    let workflows = Self {
      signup: signup_workflow::build_signup_workflow(backend),
      create_product: product_workflow::build_product_workflow(backend),
      create_coop: coop_workflow::build_coop_workflow(backend),
      create_order: order_workflow::build_order_workflow(backend),
      approve_request: approval_workflow::build_approve_workflow(backend),
      reject_request: approval_workflow::build_reject_workflow(backend),
    };
    tracing::info!("All workflows wired.");
    workflows
  }
}
