//! Shared fixtures for the service and router tests.

use fio_core::{
  enrich::Enricher,
  person::{Demographics, Person, ReceivedPerson},
};
use fio_store_sqlite::SqliteStore;
use thiserror::Error;

use crate::service::PersonService;

#[derive(Debug, Error)]
#[error("lookup service unavailable")]
pub struct Unavailable;

/// An [`Enricher`] that answers every name with the same guesses, or always
/// fails.
pub struct StubEnricher {
  fail: bool,
}

impl StubEnricher {
  pub const AGE: u32 = 42;
  pub const GENDER: &'static str = "male";
  pub const NATIONALITY: &'static str = "UA";

  pub fn ok() -> Self { Self { fail: false } }

  pub fn failing() -> Self { Self { fail: true } }
}

impl Enricher for StubEnricher {
  type Error = Unavailable;

  async fn enrich(&self, received: ReceivedPerson) -> Result<Person, Unavailable> {
    if self.fail {
      return Err(Unavailable);
    }
    Ok(received.enrich(Demographics {
      age:         Self::AGE,
      gender:      Self::GENDER.into(),
      nationality: Self::NATIONALITY.into(),
    }))
  }
}

pub fn received(name: &str) -> ReceivedPerson {
  ReceivedPerson {
    name:       name.into(),
    surname:    "Ushakov".into(),
    patronymic: Some("Vasilevich".into()),
  }
}

pub async fn service(enricher: StubEnricher) -> PersonService<SqliteStore, StubEnricher> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  PersonService::new(store, enricher)
}
