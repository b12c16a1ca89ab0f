//! Core types and trait definitions for the fio people directory.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod enrich;
pub mod error;
pub mod parse;
pub mod patch;
pub mod person;
pub mod store;

pub use error::{Error, Result};
