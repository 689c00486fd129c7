// app/src/services/mod.rs

//! External collaborators (data store, blob storage, identity provider) and
//! the services that drive each workflow around its primary write.

pub mod approval_service;
pub mod auth_service;
pub mod authz;
pub mod backend;
pub mod coop_service;
pub mod fault;
pub mod identity;
pub mod order_service;
pub mod product_service;
pub mod repository;
pub mod seed;
pub mod signup_service;
pub mod storage;

use crate::errors::AppError;
use hookline::HookRun;
use tracing::{error, info, warn};

/// Compensates a failed run and hands back the error that caused it.
/// Compensation failures are logged, never returned in its place.
pub(crate) async fn roll_back<TData>(run: &mut HookRun<'_, TData, AppError>, cause: AppError) -> AppError
where
  TData: Send + Sync + 'static,
{
  warn!(workflow = run.workflow_name(), error = %cause, "Workflow failed, compensating.");
  let report = run.run_cleanup().await;
  for failure in &report.failures {
    error!(
      workflow = run.workflow_name(),
      step_name = %failure.step_name,
      error = %failure.error,
      "Compensation failed; data may need manual repair."
    );
  }
  if report.is_clean() {
    info!(workflow = run.workflow_name(), compensated = ?report.compensated(), "Workflow rolled back.");
  }
  cause
}
