use std::time::Duration;

use serde::Deserialize;

/// Base URLs of the three lookup services and the shared deadline.
///
/// Each URL is called as `GET <url>?name=<name>`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
  pub agify_url:       String,
  pub genderize_url:   String,
  pub nationalize_url: String,
  /// Budget for all three calls together, in milliseconds.
  pub timeout_ms:      u64,
}

impl EnrichmentConfig {
  pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_ms) }
}

impl Default for EnrichmentConfig {
  fn default() -> Self {
    Self {
      agify_url:       "https://api.agify.io".to_string(),
      genderize_url:   "https://api.genderize.io".to_string(),
      nationalize_url: "https://api.nationalize.io".to_string(),
      timeout_ms:      3000,
    }
  }
}
