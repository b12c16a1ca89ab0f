//! [`EnrichmentClient`]: sequential lookups against the three guessing APIs.

use fio_core::{
  enrich::Enricher,
  person::{Demographics, Person, ReceivedPerson},
};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tokio::time::{Instant, timeout_at};
use tracing::{Span, debug, info, instrument};

use crate::{EnrichmentConfig, Error, Result, Stage};

// ─── Response bodies ─────────────────────────────────────────────────────────

/// `{"count": 298, "name": "michael", "age": 62}`; `age` is `null` for
/// unknown names.
#[derive(Debug, Deserialize)]
struct AgeGuess {
  #[serde(default)]
  age: Option<u32>,
}

/// `{"name": "peter", "gender": "male", "probability": 0.99}`
#[derive(Debug, Deserialize)]
struct GenderGuess {
  #[serde(default)]
  gender: Option<String>,
}

/// `{"name": "johnson", "country": [{"country_id": "US", "probability": 0.4}]}`
#[derive(Debug, Deserialize)]
struct NationalityGuess {
  #[serde(default)]
  country: Vec<CountryCandidate>,
}

#[derive(Debug, Deserialize)]
struct CountryCandidate {
  country_id: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the enrichment services.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct EnrichmentClient {
  http:   Client,
  config: EnrichmentConfig,
  span:   Span,
}

impl EnrichmentClient {
  pub fn new(config: EnrichmentConfig) -> Result<Self> {
    let http = Client::builder().build().map_err(Error::Client)?;
    Ok(Self {
      http,
      config,
      span: tracing::info_span!("enrichment"),
    })
  }

  /// Run lookups inside `span` instead of the default `enrichment` span.
  pub fn with_span(mut self, span: Span) -> Self {
    self.span = span;
    self
  }

  /// `GET <url>?name=<name>` and decode the body, giving up at `deadline`.
  async fn lookup<T: DeserializeOwned>(
    &self,
    stage: Stage,
    url: &str,
    name: &str,
    deadline: Instant,
  ) -> Result<T> {
    let request = async {
      self
        .http
        .get(url)
        .query(&[("name", name)])
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await
    };

    let result = match timeout_at(deadline, request).await {
      Err(_) => Err(Error::Timeout {
        stage,
        timeout: self.config.timeout(),
      }),
      Ok(Err(source)) => Err(Error::Request { stage, source }),
      Ok(Ok(body)) => serde_json::from_slice(&body)
        .map_err(|source| Error::Decode { stage, source }),
    };

    match &result {
      Ok(_) => debug!(%stage, name, "lookup succeeded"),
      Err(error) => info!(%stage, name, %error, "lookup failed"),
    }
    result
  }
}

impl Enricher for EnrichmentClient {
  type Error = Error;

  #[instrument(parent = &self.span, skip_all, fields(name = %received.name))]
  async fn enrich(&self, received: ReceivedPerson) -> Result<Person> {
    let deadline = Instant::now() + self.config.timeout();
    let name = received.name.as_str();

    let age: AgeGuess = self
      .lookup(Stage::Age, &self.config.agify_url, name, deadline)
      .await?;
    let gender: GenderGuess = self
      .lookup(Stage::Gender, &self.config.genderize_url, name, deadline)
      .await?;
    let nationality: NationalityGuess = self
      .lookup(Stage::Nationality, &self.config.nationalize_url, name, deadline)
      .await?;

    let Some(first) = nationality.country.into_iter().next() else {
      info!(name, "no nationality candidates");
      return Err(Error::NoNationality { name: name.to_owned() });
    };

    let demographics = Demographics {
      age:         age.age.unwrap_or_default(),
      gender:      gender.gender.unwrap_or_default(),
      nationality: first.country_id,
    };
    debug!(?demographics, "person enriched");
    Ok(received.enrich(demographics))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
