//! Partial updates: the `PATCH /person/{id}` body and the diff against the
//! stored record.
//!
//! The diff is independent of any SQL dialect. Backends turn a
//! [`PersonChanges`] into whatever statement they need.

use serde::Deserialize;

use crate::person::Person;

/// Requested changes to a person. Every field is optional; an empty string or
/// a zero age is treated the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonPatch {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

/// The subset of a [`PersonPatch`] that actually differs from the stored
/// record.
///
/// `gender` and `nationality` carry labels; resolving them to dimension row
/// ids is the store's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

impl PersonPatch {
  /// Compute the fields of `self` that are supplied and differ from
  /// `current`.
  pub fn diff(&self, current: &Person) -> PersonChanges {
    PersonChanges {
      name:        changed(&self.name, &current.name),
      surname:     changed(&self.surname, &current.surname),
      patronymic:  changed(
        &self.patronymic,
        current.patronymic.as_deref().unwrap_or_default(),
      ),
      age:         self.age.filter(|&age| age != 0 && age != current.age),
      gender:      changed(&self.gender, &current.gender),
      nationality: changed(&self.nationality, &current.nationality),
    }
  }
}

impl PersonChanges {
  /// `true` when applying these changes would not write anything.
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

fn changed(requested: &Option<String>, current: &str) -> Option<String> {
  requested
    .as_deref()
    .filter(|v| !v.is_empty() && *v != current)
    .map(str::to_owned)
}
