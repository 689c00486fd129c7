// app/src/workflows/approval_workflow.rs

use super::contexts::ApproveRequestHookContext;
use crate::errors::AppError;
use crate::hooks::{approval_hooks, bind};
use crate::services::backend::Backend;
use hookline::{HookContext, HookRegistry};
use std::sync::Arc;

pub type ReviewWorkflow = HookRegistry<ApproveRequestHookContext, AppError>;

fn revert_status(backend: &Arc<Backend>) -> HookContext<ApproveRequestHookContext, AppError> {
  HookContext::new("revert_request_status").cleanup(bind(backend, approval_hooks::revert_request_status))
}

/// primary (caller): PENDING -> APPROVED, stash `previousStatus`
/// after: add_store_member
/// standalone cleanup: revert_request_status
pub fn build_approve_workflow(backend: &Arc<Backend>) -> ReviewWorkflow {
  let mut workflow = ReviewWorkflow::new("approve_signup_request");
  workflow
    .after(
      HookContext::new("add_store_member")
        .hook(bind(backend, approval_hooks::add_store_member))
        .cleanup(bind(backend, approval_hooks::remove_added_member)),
    )
    .cleanup(revert_status(backend));
  workflow
}

/// primary (caller): PENDING -> REJECTED, stash `previousStatus`
/// after: remove_store_member
/// standalone cleanup: revert_request_status
pub fn build_reject_workflow(backend: &Arc<Backend>) -> ReviewWorkflow {
  let mut workflow = ReviewWorkflow::new("reject_signup_request");
  workflow
    .after(HookContext::new("remove_store_member").hook(bind(backend, approval_hooks::remove_store_member)))
    .cleanup(revert_status(backend));
  workflow
}
