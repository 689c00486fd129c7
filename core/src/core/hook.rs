// hookline/src/core/hook.rs

//! `HookContext`: one named step of a workflow, made of an optional forward
//! `hook` and an optional compensating `cleanup`.

use super::{ContextData, SharedState};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A forward step. Receives the run's context and shared state; its return
/// value is collected into `PhaseOutcome::outputs`.
pub type HookFn<TData, Err, R> =
  Arc<dyn Fn(ContextData<TData>, SharedState) -> BoxFuture<Result<R, Err>> + Send + Sync>;

/// A compensation. Must be a no-op when the shared keys it relies on are
/// absent, since its forward step may have failed before producing them.
pub type CleanupFn<TData, Err> =
  Arc<dyn Fn(ContextData<TData>, SharedState) -> BoxFuture<Result<(), Err>> + Send + Sync>;

/// Builder for a named step.
///
/// The name is the step's identity: registering two `HookContext`s with the
/// same name into the same list keeps only the first.
pub struct HookContext<TData, Err, R = ()>
where
  TData: Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) hook: Option<HookFn<TData, Err, R>>,
  pub(crate) cleanup: Option<CleanupFn<TData, Err>>,
}

impl<TData, Err, R> HookContext<TData, Err, R>
where
  TData: Send + Sync + 'static,
  Err: Send + 'static,
  R: Send + 'static,
{
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      hook: None,
      cleanup: None,
    }
  }

  /// Sets the forward step. The step's own error type only has to convert
  /// into the registry's `Err`.
  pub fn hook<F, Fut, UserErr>(mut self, handler_fn: F) -> Self
  where
    F: Fn(ContextData<TData>, SharedState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + 'static,
  {
    let hook: HookFn<TData, Err, R> =
      Arc::new(move |ctx: ContextData<TData>, shared: SharedState| -> BoxFuture<Result<R, Err>> {
        let user_fut = handler_fn(ctx, shared);
        Box::pin(async move { user_fut.await.map_err(Into::into) })
      });
    self.hook = Some(hook);
    self
  }

  /// Sets the compensation.
  pub fn cleanup<F, Fut, UserErr>(mut self, cleanup_fn: F) -> Self
  where
    F: Fn(ContextData<TData>, SharedState) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + 'static,
  {
    let cleanup: CleanupFn<TData, Err> =
      Arc::new(move |ctx: ContextData<TData>, shared: SharedState| -> BoxFuture<Result<(), Err>> {
        let user_fut = cleanup_fn(ctx, shared);
        Box::pin(async move { user_fut.await.map_err(Into::into) })
      });
    self.cleanup = Some(cleanup);
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn has_hook(&self) -> bool {
    self.hook.is_some()
  }

  pub fn has_cleanup(&self) -> bool {
    self.cleanup.is_some()
  }
}

impl<TData, Err, R> Clone for HookContext<TData, Err, R>
where
  TData: Send + Sync + 'static,
{
  fn clone(&self) -> Self {
    Self {
      name: self.name.clone(),
      hook: self.hook.clone(),
      cleanup: self.cleanup.clone(),
    }
  }
}

impl<TData, Err, R> std::fmt::Debug for HookContext<TData, Err, R>
where
  TData: Send + Sync + 'static,
{
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HookContext")
      .field("name", &self.name)
      .field("hook_present", &self.hook.is_some())
      .field("cleanup_present", &self.cleanup.is_some())
      .finish()
  }
}
