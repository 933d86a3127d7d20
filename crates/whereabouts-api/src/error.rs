//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Every recognized core error maps to
/// a 400; unrecognized faults never reach this type.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),
}

impl From<whereabouts_core::Error> for ApiError {
  fn from(err: whereabouts_core::Error) -> Self {
    Self::BadRequest(err.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let ApiError::BadRequest(message) = self;
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
      .into_response()
  }
}
