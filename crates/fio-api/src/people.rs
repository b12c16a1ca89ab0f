//! Handlers for `/person` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/person` | Body: [`ReceivedPerson`]; 201 + id |
//! | `GET`    | `/person/filter` | `?page` and `?limit` required; see [`FilterParams`] |
//! | `GET`    | `/person/:id` | Single person |
//! | `PATCH`  | `/person/:id` | Body: [`PersonPatch`]; only changed fields are written |
//! | `DELETE` | `/person/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use fio_core::{
  enrich::Enricher,
  patch::PersonPatch,
  person::{Person, PersonId, ReceivedPerson},
  store::PersonStore,
};
use serde::Serialize;
use tracing::debug;

use crate::{
  error::ApiError,
  service::{FilterParams, PersonService},
};

type Service<S, E> = State<Arc<PersonService<S, E>>>;

#[derive(Debug, Serialize)]
pub struct IdResponse {
  pub message: &'static str,
  pub id:      PersonId,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
  pub message: &'static str,
  pub data:    T,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /person`, body: `{"name","surname","patronymic"?}`
pub async fn create<S, E>(
  State(service): Service<S, E>,
  body: Result<Json<ReceivedPerson>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Json(received) = body?;
  received.validate().map_err(ApiError::invalid_body)?;
  debug!(name = %received.name, "received request to create person");

  let id = service
    .create(received)
    .await
    .map_err(ApiError::write("Failed to create person"))?;

  Ok((
    StatusCode::CREATED,
    Json(IdResponse { message: "Person created successfully", id }),
  ))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /person/:id`
pub async fn get_one<S, E>(
  State(service): Service<S, E>,
  Path(id): Path<String>,
) -> Result<Json<DataResponse<Person>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let person = service
    .get(&id)
    .await
    .map_err(ApiError::read("Failed to get person by ID"))?;
  Ok(Json(DataResponse { message: "Person received successfully", data: person }))
}

// ─── Filter ───────────────────────────────────────────────────────────────────

/// `GET /person/filter?page=..&limit=..[&name=..][&surname=..][&patronymic=..][&age=..][&gender=..][&nationality=..]`
pub async fn filter<S, E>(
  State(service): Service<S, E>,
  Query(params): Query<FilterParams>,
) -> Result<Json<DataResponse<Vec<Person>>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let people = service
    .filter(params)
    .await
    .map_err(ApiError::read("Failed to get people by filter"))?;
  Ok(Json(DataResponse { message: "People received successfully", data: people }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /person/:id`, any subset of the person fields.
pub async fn update<S, E>(
  State(service): Service<S, E>,
  Path(id): Path<String>,
  body: Result<Json<PersonPatch>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Json(patch) = body?;
  debug!(id = %id, ?patch, "received request to update person");

  let id = service
    .update(&id, patch)
    .await
    .map_err(ApiError::write("Failed to update person"))?;
  Ok(Json(IdResponse { message: "Person updated successfully", id }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /person/:id`
pub async fn delete<S, E>(
  State(service): Service<S, E>,
  Path(id): Path<String>,
) -> Result<Json<IdResponse>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let id = service
    .delete(&id)
    .await
    .map_err(ApiError::write("Failed to delete person"))?;
  Ok(Json(IdResponse { message: "Person deleted successfully", id }))
}
