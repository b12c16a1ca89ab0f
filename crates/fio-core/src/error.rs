//! Error types for `fio-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("invalid {field} format: {value:?}")]
  InvalidFormat { field: &'static str, value: String },

  #[error("missing required parameter: {0}")]
  MissingField(&'static str),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
