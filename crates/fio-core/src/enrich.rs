//! The `Enricher` trait: name → demographic guesses.

use std::future::Future;

use crate::person::{Person, ReceivedPerson};

/// Turns a client-supplied [`ReceivedPerson`] into a complete [`Person`] by
/// looking up age, gender and nationality for the name.
///
/// Implementations either return a fully populated person or fail; partial
/// results are never returned.
pub trait Enricher: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn enrich(
    &self,
    received: ReceivedPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;
}
