//! Helpers for turning untyped request strings into domain values.

use std::str::FromStr;

use crate::{Error, Result};

/// Parse `raw` as a number, reporting `field` on failure.
///
/// Surrounding whitespace is ignored; an empty string is a format error.
pub fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
  raw.trim().parse().map_err(|_| Error::InvalidFormat {
    field,
    value: raw.to_owned(),
  })
}

/// Like [`parse_number`], but `None` is a [`Error::MissingField`].
pub fn require_number<T: FromStr>(
  field: &'static str,
  raw: Option<&str>,
) -> Result<T> {
  match raw {
    Some(raw) => parse_number(field, raw),
    None => Err(Error::MissingField(field)),
  }
}

/// Collapse an empty string into `None`.
pub fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}
