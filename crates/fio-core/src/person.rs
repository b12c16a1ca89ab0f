//! The [`Person`] record and the shapes it takes before enrichment.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, parse::parse_number};

/// Store-assigned integer identity of a person row.
pub type PersonId = i64;

/// A fully enriched person as stored and returned by the API.
///
/// The store-assigned id is not part of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub name:        String,
  pub surname:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub patronymic:  Option<String>,
  pub age:         u32,
  pub gender:      String,
  /// Country code, e.g. `"US"`.
  pub nationality: String,
}

/// The client-supplied shape accepted by `POST /person`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedPerson {
  pub name:       String,
  pub surname:    String,
  #[serde(default)]
  pub patronymic: Option<String>,
}

impl ReceivedPerson {
  /// Reject blank names before any outbound lookup is made.
  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::EmptyField("name"));
    }
    if self.surname.trim().is_empty() {
      return Err(Error::EmptyField("surname"));
    }
    Ok(())
  }

  /// Combine with looked-up demographics into a complete [`Person`].
  pub fn enrich(self, demographics: Demographics) -> Person {
    Person {
      name:        self.name,
      surname:     self.surname,
      patronymic:  self.patronymic,
      age:         demographics.age,
      gender:      demographics.gender,
      nationality: demographics.nationality,
    }
  }
}

/// Guesses produced by the enrichment services for a single name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

/// Parse a path segment into a [`PersonId`].
pub fn parse_id(raw: &str) -> Result<PersonId> { parse_number("id", raw) }
