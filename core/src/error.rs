// hookline/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HookError {
  #[error("Shared value not found for key: {key}")]
  MissingSharedValue { key: String },

  #[error("Shared value for key '{key}' is not a {expected_type}")]
  SharedTypeMismatch { key: String, expected_type: String },

  #[error("Hook '{step_name}' registers neither a hook nor a cleanup")]
  EmptyHook { step_name: String },

  #[error("Error in user-provided step or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },
}

// Unwraps a HookError that travelled inside an anyhow::Error instead of
// nesting it as HandlerError(HookError(...)).
impl From<AnyhowError> for HookError {
  fn from(err: AnyhowError) -> Self {
    match err.downcast::<HookError>() {
      Ok(hook_err) => hook_err,
      Err(source) => HookError::HandlerError { source },
    }
  }
}

pub type HookResult<T, E = HookError> = std::result::Result<T, E>;
