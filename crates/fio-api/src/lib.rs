//! JSON REST API for fio.
//!
//! Exposes an axum [`Router`] backed by a [`PersonService`] over any
//! [`PersonStore`] and [`Enricher`]. TLS and transport concerns are the
//! caller's responsibility.

pub mod error;
pub mod people;
pub mod service;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use fio_core::{enrich::Enricher, store::PersonStore};

pub use error::{ApiError, ServiceError};
pub use service::{FilterParams, PersonService};

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, E>(service: Arc<PersonService<S, E>>) -> Router<()>
where
  S: PersonStore + 'static,
  E: Enricher + 'static,
{
  Router::new()
    .route("/person", post(people::create::<S, E>))
    // Static segment; matched before `{id}`.
    .route("/person/filter", get(people::filter::<S, E>))
    .route(
      "/person/{id}",
      get(people::get_one::<S, E>)
        .patch(people::update::<S, E>)
        .delete(people::delete::<S, E>),
    )
    .with_state(service)
}

// ─── Integration tests ────────────────────────────────────────────────────────
