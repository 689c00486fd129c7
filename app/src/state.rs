// app/src/state.rs
use crate::config::AppConfig;
use crate::services::backend::Backend;
use crate::workflows::Workflows;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub backend: Arc<Backend>,
  pub workflows: Arc<Workflows>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wires every workflow against `backend`.
  pub fn new(backend: Backend) -> Self {
    let config = backend.config.clone();
    let backend = Arc::new(backend);
    let workflows = Arc::new(Workflows::wire(&backend));
    Self {
      backend,
      workflows,
      config,
    }
  }

  pub fn in_memory(config: Arc<AppConfig>) -> Self {
    Self::new(Backend::in_memory(config))
  }
}
