//! The `PersonStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `fio-store-sqlite`).
//! Higher layers (`fio-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use crate::{
  patch::PersonPatch,
  person::{Person, PersonId},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Pagination window for [`PersonStore::list_people`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
  /// Zero-based page index.
  pub page:  u32,
  /// Maximum number of rows per page.
  pub limit: u32,
}

impl Page {
  /// Number of rows to skip: `page * limit`.
  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.limit) }
}

/// Equality filters for [`PersonStore::list_people`]. `None` fields are not
/// filtered on; all supplied fields must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonFilter {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
  pub page:        Page,
}

impl PersonFilter {
  /// A filter matching everyone, windowed by `page`.
  pub fn all(page: Page) -> Self {
    Self {
      name: None,
      surname: None,
      patronymic: None,
      age: None,
      gender: None,
      nationality: None,
      page,
    }
  }
}

/// What [`PersonStore::update_person`] did to an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// At least one column was written.
  Updated,
  /// Nothing in the patch differed from the stored row; no write was issued.
  Unchanged,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a person store backend.
///
/// Gender and nationality are stored as shared dimension rows; backends
/// resolve labels with lookup-or-insert and keep every person pointing at
/// exactly one row of each.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new person and return its id. Either every row is written or
  /// none is.
  fn create_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<PersonId, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// List people matching every supplied field of `filter`, ordered by id.
  fn list_people<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Apply the supplied, changed fields of `patch`. Returns `None` if the
  /// person does not exist.
  fn update_person(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<UpdateOutcome>, Self::Error>> + Send + '_;

  /// Delete a person, then drop its gender and nationality rows if nothing
  /// else references them. Returns `false` if the person does not exist.
  fn delete_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
