// verdant/app/src/services/http.rs

//! Mapping of HTTP client failures onto the domain error classes.

use reqwest::StatusCode;
use std::time::Duration;
use verdant::VerdantError;

use crate::errors::{AppError, Result as AppResult};

pub fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
  reqwest::Client::builder()
    .timeout(timeout)
    .build()
    .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Connection problems and timeouts are transient; anything else means the
/// peer answered with something we cannot use.
pub fn from_reqwest(err: reqwest::Error) -> VerdantError {
  if err.is_timeout() || err.is_connect() {
    VerdantError::unavailable(err)
  } else {
    VerdantError::Upstream(err.to_string())
  }
}

/// Error for a non-success status. 404 is left to callers that know what was
/// being looked up.
pub fn from_status(status: StatusCode, body: &str) -> VerdantError {
  let detail = if body.is_empty() { status.to_string() } else { format!("{}: {}", status, body) };
  if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
    VerdantError::unavailable(anyhow::anyhow!(detail))
  } else {
    VerdantError::Upstream(detail)
  }
}
