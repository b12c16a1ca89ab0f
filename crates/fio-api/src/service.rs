//! [`PersonService`] turns raw request strings into typed calls on the
//! store and the enricher.

use fio_core::{
  enrich::Enricher,
  parse::{non_empty, parse_number, require_number},
  patch::PersonPatch,
  person::{Person, PersonId, ReceivedPerson, parse_id},
  store::{Page, PersonFilter, PersonStore, UpdateOutcome},
};
use serde::Deserialize;
use tracing::{Span, info, instrument};

use crate::error::ServiceError;

type Result<T, E = ServiceError> = std::result::Result<T, E>;

// ─── Filter parameters ───────────────────────────────────────────────────────

/// Untyped query parameters of `GET /person/filter`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  /// `"0"` (the default) means "any age".
  pub age:         Option<String>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
  /// Zero-based page index. Required.
  pub page:        Option<String>,
  /// Page size. Required.
  pub limit:       Option<String>,
}

impl FilterParams {
  /// Parse into a [`PersonFilter`]. Empty strings are not filtered on.
  pub fn into_filter(self) -> fio_core::Result<PersonFilter> {
    let age: u32 = parse_number("age", self.age.as_deref().unwrap_or("0"))?;
    let page = Page {
      page:  require_number("page", self.page.as_deref())?,
      limit: require_number("limit", self.limit.as_deref())?,
    };

    Ok(PersonFilter {
      name: non_empty(self.name),
      surname: non_empty(self.surname),
      patronymic: non_empty(self.patronymic),
      age: (age != 0).then_some(age),
      gender: non_empty(self.gender),
      nationality: non_empty(self.nationality),
      page,
    })
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// Validation and translation layer between HTTP handlers and the backends.
///
/// Store and enrichment errors are passed through unchanged (boxed); only
/// malformed input and missing rows are classified here.
pub struct PersonService<S, E> {
  store:    S,
  enricher: E,
  span:     Span,
}

impl<S, E> PersonService<S, E>
where
  S: PersonStore,
  E: Enricher,
{
  pub fn new(store: S, enricher: E) -> Self {
    Self {
      store,
      enricher,
      span: tracing::info_span!("person_service"),
    }
  }

  /// Log inside `span` instead of the default `person_service` span.
  pub fn with_span(mut self, span: Span) -> Self {
    self.span = span;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  /// Enrich `received` and persist the result.
  #[instrument(parent = &self.span, skip_all, fields(name = %received.name))]
  pub async fn create(&self, received: ReceivedPerson) -> Result<PersonId> {
    let person = self.enricher.enrich(received).await.map_err(|e| {
      info!(error = %e, "failed to retrieve extra person data");
      ServiceError::Enrichment(Box::new(e))
    })?;

    let id = self.store.create_person(person.clone()).await.map_err(|e| {
      info!(error = %e, ?person, "failed to create person");
      ServiceError::Store(Box::new(e))
    })?;

    info!(id, ?person, "person created");
    Ok(id)
  }

  #[instrument(parent = &self.span, skip(self))]
  pub async fn get(&self, id: &str) -> Result<Person> {
    let id = parse(id)?;
    let person = self
      .store
      .get_person(id)
      .await
      .map_err(|e| store_error(e, "failed to get person"))?
      .ok_or_else(|| not_found(id))?;

    info!(id, "person received");
    Ok(person)
  }

  #[instrument(parent = &self.span, skip_all)]
  pub async fn filter(&self, params: FilterParams) -> Result<Vec<Person>> {
    let filter = params.into_filter().map_err(|e| {
      info!(error = %e, "invalid filter");
      ServiceError::from(e)
    })?;

    let people = self
      .store
      .list_people(&filter)
      .await
      .map_err(|e| store_error(e, "failed to get people by filter"))?;

    info!(?filter, count = people.len(), "people received");
    Ok(people)
  }

  #[instrument(parent = &self.span, skip(self))]
  pub async fn update(&self, id: &str, patch: PersonPatch) -> Result<PersonId> {
    let id = parse(id)?;
    let outcome = self
      .store
      .update_person(id, patch)
      .await
      .map_err(|e| store_error(e, "failed to update person"))?
      .ok_or_else(|| not_found(id))?;

    match outcome {
      UpdateOutcome::Updated => info!(id, "person updated"),
      UpdateOutcome::Unchanged => info!(id, "person unchanged"),
    }
    Ok(id)
  }

  #[instrument(parent = &self.span, skip(self))]
  pub async fn delete(&self, id: &str) -> Result<PersonId> {
    let id = parse(id)?;
    let deleted = self
      .store
      .delete_person(id)
      .await
      .map_err(|e| store_error(e, "failed to delete person"))?;
    if !deleted {
      return Err(not_found(id));
    }

    info!(id, "person deleted");
    Ok(id)
  }
}

fn parse(raw: &str) -> Result<PersonId> {
  parse_id(raw).map_err(|e| {
    info!(id = raw, error = %e, "invalid id");
    ServiceError::from(e)
  })
}

fn not_found(id: PersonId) -> ServiceError {
  info!(id, "person not found");
  ServiceError::NotFound(id)
}

fn store_error<E>(e: E, what: &'static str) -> ServiceError
where
  E: std::error::Error + Send + Sync + 'static,
{
  info!(error = %e, "{what}");
  ServiceError::Store(Box::new(e))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
