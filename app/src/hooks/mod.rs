// app/src/hooks/mod.rs

//! Step functions of the workflows. Each one takes the backend, the run's
//! typed context and its shared state; compensations check the shared keys
//! they need and do nothing when those are absent.

pub mod approval_hooks;
pub mod coop_hooks;
pub mod keys;
pub mod order_hooks;
pub mod product_hooks;
pub mod signup_hooks;

use crate::services::backend::Backend;
use hookline::{ContextData, SharedState};
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// Closes a step function over the backend so it fits `HookContext::hook`
/// and `HookContext::cleanup`.
pub(crate) fn bind<TData, F, Fut>(
  backend: &Arc<Backend>,
  step: F,
) -> impl Fn(ContextData<TData>, SharedState) -> Fut + Send + Sync + 'static
where
  TData: Send + Sync + 'static,
  F: Fn(Arc<Backend>, ContextData<TData>, SharedState) -> Fut + Send + Sync + 'static,
  Fut: Future + Send + 'static,
{
  let backend = Arc::clone(backend);
  move |ctx, shared| step(Arc::clone(&backend), ctx, shared)
}

/// `<owner>/<random>-<file name>`, with the file name reduced to a safe
/// character set.
pub(crate) fn object_path(owner: Uuid, file_name: &str) -> String {
  let base = file_name.rsplit('/').next().unwrap_or(file_name);
  let safe: String = base
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
    .collect();
  let safe = if safe.is_empty() { "image".to_string() } else { safe };
  format!("{}/{}-{}", owner, Uuid::new_v4().simple(), safe)
}

#[cfg(test)]
mod tests {
  use super::object_path;
  use uuid::Uuid;

  #[test]
  fn object_path_keeps_owner_prefix_and_sanitizes_name() {
    let owner = Uuid::new_v4();
    let path = object_path(owner, "nested/dir/my photo (1).png");
    assert!(path.starts_with(&format!("{}/", owner)));
    assert!(path.ends_with("-my_photo__1_.png"));
  }

  #[test]
  fn object_paths_never_collide_for_the_same_name() {
    let owner = Uuid::new_v4();
    assert_ne!(object_path(owner, "a.png"), object_path(owner, "a.png"));
  }
}
