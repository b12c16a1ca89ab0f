//! Mapping between domain types and SQL: row decoding, dimension-table
//! statements, and the dynamic `WHERE` / `SET` clauses.
//!
//! Every value reaches SQLite as a bound parameter; only column names taken
//! from fixed `&'static str`s are formatted into statements.

use fio_core::{
  patch::PersonChanges,
  person::Person,
  store::PersonFilter,
};
use rusqlite::{Connection, OptionalExtension as _, Row, params, types::Value};

// ─── Person rows ─────────────────────────────────────────────────────────────

/// Columns selected by every person read, in [`person_from_row`] order.
pub const PERSON_COLUMNS: &str =
  "p.name, p.surname, p.patronymic, p.age, g.gender, n.nationality";

/// `FROM` clause joining a person with both of its labels.
pub const PERSON_JOINS: &str = "FROM people p
     JOIN genders       g ON g.id = p.gender_id
     JOIN nationalities n ON n.id = p.nationality_id";

pub fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    name:        row.get(0)?,
    surname:     row.get(1)?,
    patronymic:  row.get(2)?,
    age:         row.get(3)?,
    gender:      row.get(4)?,
    nationality: row.get(5)?,
  })
}

// ─── Dimension tables ────────────────────────────────────────────────────────

/// A label lookup table referenced by id from `people`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
  Gender,
  Nationality,
}

impl Dimension {
  pub fn table(self) -> &'static str {
    match self {
      Dimension::Gender => "genders",
      Dimension::Nationality => "nationalities",
    }
  }

  /// Label column in [`Self::table`].
  pub fn label_column(self) -> &'static str {
    match self {
      Dimension::Gender => "gender",
      Dimension::Nationality => "nationality",
    }
  }

  /// Foreign-key column in `people`.
  pub fn reference_column(self) -> &'static str {
    match self {
      Dimension::Gender => "gender_id",
      Dimension::Nationality => "nationality_id",
    }
  }

  /// Resolve `label` to its row id, inserting a new row if none exists.
  pub fn lookup_or_insert(
    self,
    conn: &Connection,
    label: &str,
  ) -> rusqlite::Result<i64> {
    let existing = conn
      .query_row(
        &format!(
          "SELECT id FROM {} WHERE {} = ?1",
          self.table(),
          self.label_column()
        ),
        params![label],
        |r| r.get(0),
      )
      .optional()?;
    if let Some(id) = existing {
      return Ok(id);
    }

    conn.query_row(
      &format!(
        "INSERT INTO {} ({}) VALUES (?1) RETURNING id",
        self.table(),
        self.label_column()
      ),
      params![label],
      |r| r.get(0),
    )
  }

  /// Delete row `id` unless some person still references it.
  ///
  /// Returns the number of rows removed (0 or 1).
  pub fn delete_if_unreferenced(
    self,
    conn: &Connection,
    id: i64,
  ) -> rusqlite::Result<usize> {
    conn.execute(
      &format!(
        "DELETE FROM {table} WHERE id = ?1
           AND NOT EXISTS (SELECT 1 FROM people WHERE {reference} = ?1)",
        table = self.table(),
        reference = self.reference_column(),
      ),
      params![id],
    )
  }
}

// ─── WHERE clause ────────────────────────────────────────────────────────────

/// Build the conjunctive `WHERE` clause for `filter` and its bound values.
///
/// Returns an empty clause when nothing is filtered on. Placeholders are
/// numbered from `?1`.
pub fn filter_clause(filter: &PersonFilter) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = vec![];
  let mut values: Vec<Value> = vec![];

  let mut push = |column: &str, value: Value| {
    values.push(value);
    conds.push(format!("{column} = ?{}", values.len()));
  };

  if let Some(v) = &filter.name {
    push("p.name", Value::Text(v.clone()));
  }
  if let Some(v) = &filter.surname {
    push("p.surname", Value::Text(v.clone()));
  }
  if let Some(v) = &filter.patronymic {
    push("p.patronymic", Value::Text(v.clone()));
  }
  if let Some(v) = filter.age {
    push("p.age", Value::Integer(i64::from(v)));
  }
  if let Some(v) = &filter.gender {
    push("g.gender", Value::Text(v.clone()));
  }
  if let Some(v) = &filter.nationality {
    push("n.nationality", Value::Text(v.clone()));
  }

  let clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (clause, values)
}

// ─── SET clause ──────────────────────────────────────────────────────────────

/// A single `column = value` pair of an `UPDATE people SET ...` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
  pub column: &'static str,
  pub value:  Value,
}

/// Turn `changes` into column assignments. `gender_id` / `nationality_id` are
/// the resolved ids for `changes.gender` / `changes.nationality`.
pub fn assignments(
  changes: &PersonChanges,
  gender_id: Option<i64>,
  nationality_id: Option<i64>,
) -> Vec<Assignment> {
  let text = |column, v: &Option<String>| {
    v.as_ref().map(|v| Assignment { column, value: Value::Text(v.clone()) })
  };
  let int = |column, v: Option<i64>| {
    v.map(|v| Assignment { column, value: Value::Integer(v) })
  };

  [
    text("name", &changes.name),
    text("surname", &changes.surname),
    text("patronymic", &changes.patronymic),
    int("age", changes.age.map(i64::from)),
    int(Dimension::Gender.reference_column(), gender_id),
    int(Dimension::Nationality.reference_column(), nationality_id),
  ]
  .into_iter()
  .flatten()
  .collect()
}

/// Render `UPDATE people SET ... WHERE id = ?N`, where `?N` follows the
/// assignment placeholders.
pub fn update_sql(assignments: &[Assignment]) -> String {
  let set = assignments
    .iter()
    .enumerate()
    .map(|(i, a)| format!("{} = ?{}", a.column, i + 1))
    .collect::<Vec<_>>()
    .join(", ");
  format!("UPDATE people SET {set} WHERE id = ?{}", assignments.len() + 1)
}
