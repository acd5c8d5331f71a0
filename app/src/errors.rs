// verdant/app/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use verdant::VerdantError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error(transparent)]
  Domain(#[from] VerdantError),
}

impl AppError {
  /// Domain view of this error, for callers that only care about the outcome class.
  pub fn is_retryable(&self) -> bool {
    match self {
      AppError::Domain(e) => e.is_retryable(),
      AppError::Sqlx(e) => crate::db::is_transient(e),
      _ => false,
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Domain(VerdantError::Validation(_)) => StatusCode::BAD_REQUEST,
      AppError::Domain(VerdantError::NotFound(_)) => StatusCode::NOT_FOUND,
      AppError::Domain(VerdantError::Upstream(_)) => StatusCode::BAD_GATEWAY,
      _ if self.is_retryable() => StatusCode::SERVICE_UNAVAILABLE,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    let status = self.status_code();
    let body = match self {
      AppError::Domain(VerdantError::Validation(m)) | AppError::Domain(VerdantError::NotFound(m)) => {
        json!({ "error": m })
      }
      AppError::Config(m) => json!({ "error": "Configuration issue", "detail": m, "retryable": false }),
      AppError::Sqlx(_) => json!({ "error": "Database operation failed", "retryable": self.is_retryable() }),
      AppError::Domain(e) => json!({ "error": "Catalog operation failed", "detail": e.to_string(), "retryable": e.is_retryable() }),
    };
    HttpResponse::build(status).json(body)
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
