//! Wiring for the fio server: configuration and application assembly.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use fio_api::{PersonService, api_router};
use fio_enrich::{EnrichmentClient, EnrichmentConfig};
use fio_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `FIO_*`
/// environment variables (`FIO_ENRICHMENT__TIMEOUT_MS` for nested keys).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
  pub enrichment:    EnrichmentConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "0.0.0.0".to_string(),
      port:          6060,
      database_path: PathBuf::from("fio.db"),
      enrichment:    EnrichmentConfig::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` (if it exists), then overlay the environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
          Environment::with_prefix("FIO")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
        ),
    )
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
    builder.build()?.try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Open the store, build the enrichment client and return the HTTP app.
pub async fn app(config: &ServerConfig) -> anyhow::Result<Router> {
  let store_path = expand_tilde(&config.database_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let enricher = EnrichmentClient::new(config.enrichment.clone())
    .context("failed to build enrichment client")?;

  let service = Arc::new(PersonService::new(store, enricher));
  Ok(api_router(service).layer(TraceLayer::new_for_http()))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
