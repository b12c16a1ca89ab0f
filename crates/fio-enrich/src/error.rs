//! Error type for `fio-enrich`.

use std::{fmt, time::Duration};

use thiserror::Error;

/// Which of the three lookups failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Age,
  Gender,
  Nationality,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Stage::Age => "age",
      Stage::Gender => "gender",
      Stage::Nationality => "nationality",
    })
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("failed to get {stage}: {source}")]
  Request {
    stage:  Stage,
    #[source]
    source: reqwest::Error,
  },

  #[error("failed to get {stage}: undecodable response: {source}")]
  Decode {
    stage:  Stage,
    #[source]
    source: serde_json::Error,
  },

  #[error("failed to get {stage}: enrichment deadline of {timeout:?} exceeded")]
  Timeout { stage: Stage, timeout: Duration },

  #[error("failed to get nationality: no candidates for {name:?}")]
  NoNationality { name: String },
}

impl Error {
  /// The lookup that produced this error, if any.
  pub fn stage(&self) -> Option<Stage> {
    match self {
      Error::Client(_) => None,
      Error::Request { stage, .. }
      | Error::Decode { stage, .. }
      | Error::Timeout { stage, .. } => Some(*stage),
      Error::NoNationality { .. } => Some(Stage::Nationality),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
