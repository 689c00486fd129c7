// app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use hookline::HookError;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Machine-readable detail bag attached to domain failures (field errors,
/// requested vs available quantities, ...).
pub type Details = Map<String, Value>;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{message}")]
  Validation {
    code: &'static str,
    message: String,
    details: Details,
  },

  #[error("{message}")]
  Authorization { code: &'static str, message: String },

  #[error("{message}")]
  NotFound { code: &'static str, message: String },

  #[error("{message}")]
  Conflict {
    code: &'static str,
    message: String,
    details: Details,
  },

  #[error("{message}")]
  BusinessRule {
    code: &'static str,
    message: String,
    details: Details,
  },

  #[error("{message}")]
  ExternalService { code: &'static str, message: String },

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: HookError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn validation(code: &'static str, message: impl Into<String>, details: Details) -> Self {
    AppError::Validation {
      code,
      message: message.into(),
      details,
    }
  }

  pub fn authorization(code: &'static str, message: impl Into<String>) -> Self {
    AppError::Authorization {
      code,
      message: message.into(),
    }
  }

  pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
    AppError::NotFound {
      code,
      message: message.into(),
    }
  }

  pub fn conflict(code: &'static str, message: impl Into<String>, details: Details) -> Self {
    AppError::Conflict {
      code,
      message: message.into(),
      details,
    }
  }

  pub fn business_rule(code: &'static str, message: impl Into<String>, details: Details) -> Self {
    AppError::BusinessRule {
      code,
      message: message.into(),
      details,
    }
  }

  pub fn external(code: &'static str, message: impl Into<String>) -> Self {
    AppError::ExternalService {
      code,
      message: message.into(),
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      AppError::Validation { code, .. }
      | AppError::Authorization { code, .. }
      | AppError::NotFound { code, .. }
      | AppError::Conflict { code, .. }
      | AppError::BusinessRule { code, .. }
      | AppError::ExternalService { code, .. } => code,
      AppError::Config(_) => "CONFIG_ERROR",
      AppError::Workflow { .. } => "WORKFLOW_ERROR",
      AppError::Internal(_) => "INTERNAL_ERROR",
    }
  }

  /// Empty for variants that carry no details.
  pub fn details(&self) -> Details {
    match self {
      AppError::Validation { details, .. }
      | AppError::Conflict { details, .. }
      | AppError::BusinessRule { details, .. } => details.clone(),
      _ => Details::new(),
    }
  }
}

/// Builds a `Details` map from `(key, value)` pairs.
pub fn details<const N: usize>(pairs: [(&str, Value); N]) -> Details {
  pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

// Steps that fail through anyhow keep their AppError identity.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<AppError>() {
      Ok(app_err) => app_err,
      Err(other) => match other.downcast::<HookError>() {
        Ok(hook_err) => AppError::Workflow { source: hook_err },
        Err(other) => AppError::Internal(other.to_string()),
      },
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation { .. } => StatusCode::BAD_REQUEST,
      AppError::Authorization { .. } => StatusCode::FORBIDDEN,
      AppError::NotFound { .. } => StatusCode::NOT_FOUND,
      AppError::Conflict { .. } => StatusCode::CONFLICT,
      AppError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::ExternalService { .. } => StatusCode::BAD_GATEWAY,
      AppError::Config(_) | AppError::Workflow { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, code = self.code(), "Responding with error");
    } else {
      tracing::warn!(application_error = %self, code = self.code(), "Responding with error");
    }
    HttpResponse::build(status).json(json!({
      "error": self.to_string(),
      "code": self.code(),
      "details": self.details(),
    }))
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
