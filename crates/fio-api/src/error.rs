//! Service and API error types, and the [`axum::response::IntoResponse`]
//! implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use fio_core::person::PersonId;
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by [`PersonService`](crate::service::PersonService).
#[derive(Debug, Error)]
pub enum ServiceError {
  /// A malformed id, age, page or limit string.
  #[error(transparent)]
  Invalid(#[from] fio_core::Error),

  #[error("person {0} not found")]
  NotFound(PersonId),

  #[error("enrichment error: {0}")]
  Enrichment(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

/// An error returned by an API handler.
///
/// Reads report every failure as `400`; writes report service failures as
/// `409`.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body could not be bound.
  #[error("{context}: {details}")]
  BadRequest {
    context: &'static str,
    details: String,
  },

  #[error("{context}: {source}")]
  Read {
    context: &'static str,
    #[source]
    source:  ServiceError,
  },

  #[error("{context}: {source}")]
  Write {
    context: &'static str,
    #[source]
    source:  ServiceError,
  },
}

impl ApiError {
  pub fn invalid_body(details: impl ToString) -> Self {
    ApiError::BadRequest {
      context: "Invalid input",
      details: details.to_string(),
    }
  }

  pub fn read(context: &'static str) -> impl FnOnce(ServiceError) -> Self {
    move |source| ApiError::Read { context, source }
  }

  pub fn write(context: &'static str) -> impl FnOnce(ServiceError) -> Self {
    move |source| ApiError::Write { context, source }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::invalid_body(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, context, details) = match self {
      ApiError::BadRequest { context, details } => {
        (StatusCode::BAD_REQUEST, context, details)
      }
      ApiError::Read { context, source } => {
        (StatusCode::BAD_REQUEST, context, source.to_string())
      }
      ApiError::Write { context, source } => {
        (StatusCode::CONFLICT, context, source.to_string())
      }
    };
    (status, Json(json!({ "error": context, "details": details }))).into_response()
  }
}
