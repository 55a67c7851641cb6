//! Remote market-price lookup.
//!
//! `PriceSource` is the seam the resolver consumes, so callers can inject
//! their own pricing backend. `MarketPriceClient` is the production
//! implementation: a thin asynchronous client for a MarketCheck-style
//! listing API that reports the mean listing price of matching inventory.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.marketcheck.com/v2/";
const API_KEY_ENV: &str = "MARKETCHECK_API_KEY";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const USER_AGENT: &str = concat!("vehicle-value-engine/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("payload carried no usable price")]
    MissingPrice,
}

/// Remote source of current market prices. The resolver treats every failure
/// mode identically, so implementations are free to be blunt about errors.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Mean listing price for (make, model, year), optionally narrowed by a
    /// trim hint.
    async fn mean_price(
        &self,
        make: &str,
        model: &str,
        year: i32,
        trim: Option<&str>,
    ) -> Result<f64, PricingError>;
}

#[derive(Clone)]
pub struct MarketPriceClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl MarketPriceClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PricingError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base: &str, api_key: impl Into<String>) -> Result<Self, PricingError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Builds a client with the API key from `MARKETCHECK_API_KEY`.
    pub fn from_env() -> Result<Self, PricingError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| PricingError::Api(format!("{API_KEY_ENV} is not set")))?;
        Self::new(api_key)
    }
}

#[async_trait]
impl PriceSource for MarketPriceClient {
    async fn mean_price(
        &self,
        make: &str,
        model: &str,
        year: i32,
        trim: Option<&str>,
    ) -> Result<f64, PricingError> {
        let mut url = self.base_url.join("search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api_key", &self.api_key)
                .append_pair("make", make)
                .append_pair("model", model)
                .append_pair("year", &year.to_string())
                .append_pair("stats", "true")
                .append_pair("per_page", "1");
            if let Some(trim) = trim {
                pairs.append_pair("trim", trim);
            }
        }

        log::debug!("requesting market stats for {year} {make} {model}");

        let response = self.http.get(url).send().await?.error_for_status()?;
        let payload: serde_json::Value = response.json().await?;
        extract_mean_price(payload)
    }
}

/// Pulls `stats.price.mean` out of a search payload. Anything short of a
/// finite, non-negative mean is a failure.
fn extract_mean_price(payload: serde_json::Value) -> Result<f64, PricingError> {
    let parsed: SearchStatsDto =
        serde_json::from_value(payload).map_err(|err| PricingError::Api(err.to_string()))?;

    let mean = parsed
        .stats
        .and_then(|stats| stats.price)
        .and_then(|price| price.mean)
        .ok_or(PricingError::MissingPrice)?;

    if !mean.is_finite() || mean < 0.0 {
        return Err(PricingError::Api(format!("implausible mean price {mean}")));
    }
    Ok(mean)
}

#[derive(Debug, Deserialize)]
struct SearchStatsDto {
    #[serde(default)]
    stats: Option<StatsDto>,
}

#[derive(Debug, Deserialize)]
struct StatsDto {
    #[serde(default)]
    price: Option<PriceStatsDto>,
}

#[derive(Debug, Deserialize)]
struct PriceStatsDto {
    #[serde(default)]
    mean: Option<f64>,
}
