// app/src/workflows/signup_workflow.rs

use super::contexts::SignupHookContext;
use crate::errors::AppError;
use crate::hooks::{bind, signup_hooks};
use crate::services::backend::Backend;
use hookline::{HookContext, HookRegistry};
use std::sync::Arc;

pub type SignupWorkflow = HookRegistry<SignupHookContext, AppError>;

/// before: validate_signup
/// primary (caller): create the auth user, stash `userId`
/// after: update_app_metadata, create_profile, request_signup_approval
/// standalone cleanup: delete_user
pub fn build_signup_workflow(backend: &Arc<Backend>) -> SignupWorkflow {
  let mut workflow = SignupWorkflow::new("signup");
  workflow
    .before(HookContext::new("validate_signup").hook(bind(backend, signup_hooks::validate_signup)))
    .after(HookContext::new("update_app_metadata").hook(bind(backend, signup_hooks::update_app_metadata)))
    .after(
      HookContext::new("create_profile")
        .hook(bind(backend, signup_hooks::create_profile))
        .cleanup(bind(backend, signup_hooks::delete_profile)),
    )
    .after(
      HookContext::new("request_signup_approval")
        .hook(bind(backend, signup_hooks::request_signup_approval))
        .cleanup(bind(backend, signup_hooks::delete_approval_request)),
    )
    .cleanup(HookContext::new("delete_user").cleanup(bind(backend, signup_hooks::delete_user)));
  workflow
}
