//! Name enrichment over agify / genderize / nationalize compatible APIs.
//!
//! [`EnrichmentClient`] implements [`fio_core::enrich::Enricher`]: the three
//! lookups run one after another under a single deadline, and the first
//! failure aborts the whole enrichment.

mod client;
mod config;

pub mod error;

pub use client::EnrichmentClient;
pub use config::EnrichmentConfig;
pub use error::{Error, Result, Stage};
