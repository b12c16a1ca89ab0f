//! [`SqliteStore`], the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, params, params_from_iter};
use tracing::{Span, debug, instrument};

use fio_core::{
  patch::PersonPatch,
  person::{Person, PersonId},
  store::{PersonFilter, PersonStore, UpdateOutcome},
};

use crate::{
  Result,
  encode::{
    Dimension, PERSON_COLUMNS, PERSON_JOINS, assignments, filter_clause,
    person_from_row, update_sql,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  span: Span,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  /// Run all store operations inside `span` instead of the default
  /// `person_store` span.
  pub fn with_span(mut self, span: Span) -> Self {
    self.span = span;
    self
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(Self {
      conn,
      span: tracing::info_span!("person_store"),
    })
  }
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  #[instrument(parent = &self.span, skip_all, fields(name = %person.name))]
  async fn create_person(&self, person: Person) -> Result<PersonId> {
    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let gender_id = Dimension::Gender.lookup_or_insert(&tx, &person.gender)?;
        let nationality_id =
          Dimension::Nationality.lookup_or_insert(&tx, &person.nationality)?;

        let id: PersonId = tx.query_row(
          "INSERT INTO people (
             name, surname, patronymic, age, gender_id, nationality_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           RETURNING id",
          params![
            person.name,
            person.surname,
            person.patronymic,
            person.age,
            gender_id,
            nationality_id,
          ],
          |r| r.get(0),
        )?;

        tx.commit()?;
        Ok(id)
      })
      .await?;

    debug!(id, "person row inserted");
    Ok(id)
  }

  #[instrument(parent = &self.span, skip(self))]
  async fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
    let person = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PERSON_COLUMNS} {PERSON_JOINS} WHERE p.id = ?1"),
              params![id],
              person_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    debug!(found = person.is_some(), "person row read");
    Ok(person)
  }

  #[instrument(parent = &self.span, skip_all, fields(page = filter.page.page, limit = filter.page.limit))]
  async fn list_people(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
    let (where_clause, mut values) = filter_clause(filter);
    let next = values.len() + 1;
    let sql = format!(
      "SELECT {PERSON_COLUMNS} {PERSON_JOINS}
       {where_clause}
       ORDER BY p.id
       LIMIT ?{next} OFFSET ?{}",
      next + 1
    );
    values.push(i64::from(filter.page.limit).into());
    values.push(i64::try_from(filter.page.offset()).unwrap_or(i64::MAX).into());

    let people = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(params_from_iter(values.iter()), person_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    debug!(count = people.len(), "people listed");
    Ok(people)
  }

  #[instrument(parent = &self.span, skip(self, patch))]
  async fn update_person(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> Result<Option<UpdateOutcome>> {
    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = tx
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} {PERSON_JOINS} WHERE p.id = ?1"),
            params![id],
            person_from_row,
          )
          .optional()?;
        let Some(current) = current else {
          return Ok(None);
        };

        let changes = patch.diff(&current);
        if changes.is_empty() {
          return Ok(Some(UpdateOutcome::Unchanged));
        }

        let gender_id = changes
          .gender
          .as_deref()
          .map(|label| Dimension::Gender.lookup_or_insert(&tx, label))
          .transpose()?;
        let nationality_id = changes
          .nationality
          .as_deref()
          .map(|label| Dimension::Nationality.lookup_or_insert(&tx, label))
          .transpose()?;

        let set = assignments(&changes, gender_id, nationality_id);
        let sql = update_sql(&set);
        let values = set
          .into_iter()
          .map(|a| a.value)
          .chain(std::iter::once(id.into()))
          .collect::<Vec<rusqlite::types::Value>>();

        if tx.execute(&sql, params_from_iter(values.iter()))? == 0 {
          return Ok(None);
        }

        tx.commit()?;
        Ok(Some(UpdateOutcome::Updated))
      })
      .await?;

    debug!(?outcome, "person row updated");
    Ok(outcome)
  }

  #[instrument(parent = &self.span, skip(self))]
  async fn delete_person(&self, id: PersonId) -> Result<bool> {
    let cleanup = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let refs: Option<(i64, i64)> = tx
          .query_row(
            "SELECT gender_id, nationality_id FROM people WHERE id = ?1",
            params![id],
            |r| Ok((r.get(0)?, r.get(1)?)),
          )
          .optional()?;
        let Some((gender_id, nationality_id)) = refs else {
          return Ok(None);
        };

        tx.execute("DELETE FROM people WHERE id = ?1", params![id])?;

        // Best-effort: a failed cleanup leaves an unused label row behind.
        let cleanup = [
          (Dimension::Gender, gender_id),
          (Dimension::Nationality, nationality_id),
        ]
        .map(|(dim, dim_id)| {
          (dim, dim.delete_if_unreferenced(&tx, dim_id).map_err(|e| e.to_string()))
        });

        tx.commit()?;
        Ok(Some(cleanup))
      })
      .await?;

    let Some(cleanup) = cleanup else {
      debug!("no person row to delete");
      return Ok(false);
    };

    for (dim, result) in cleanup {
      match result {
        Ok(removed) => debug!(table = dim.table(), removed, "label cleanup"),
        Err(error) => debug!(table = dim.table(), %error, "label cleanup failed"),
      }
    }
    Ok(true)
  }
}
