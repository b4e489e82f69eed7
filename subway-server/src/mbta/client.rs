//! MBTA V3 API HTTP client.
//!
//! Provides async methods for the routes and stops endpoints. Requests are
//! retried with exponential backoff on rate limiting and transient
//! failures; any other non-success status fails immediately.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::MbtaError;
use super::types::{RouteResource, StopResource};

/// Default base URL for the MBTA V3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default total tries for one logical fetch (first try plus retries).
const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default backoff unit; attempt n sleeps `unit * 2^n` (1 s, 2 s, 4 s...).
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Route type filter covering light rail (0) and heavy rail (1).
const SUBWAY_ROUTE_TYPES: &str = "0,1";

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// Optional API key sent as `x-api-key`. Anonymous access works but
    /// is rate limited more aggressively.
    pub api_key: Option<String>,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Total attempts per fetch (at least 1)
    pub max_attempts: u32,
    /// Backoff unit for the exponential retry schedule
    pub retry_base_delay: Duration,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a config with production defaults and no API key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            timeout_secs: 30,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the total attempts per fetch.
    pub fn with_max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the backoff unit (tests use a few milliseconds).
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MBTA V3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    max_attempts: u32,
    retry_base_delay: Duration,
}

impl MbtaClient {
    /// Create a new client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| MbtaError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            max_attempts: config.max_attempts.max(1),
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Fetch the full subway route list (light and heavy rail).
    pub async fn subway_routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
        let value = self
            .get_json("/routes", &[("filter[type]", SUBWAY_ROUTE_TYPES)])
            .await?;
        decode_data(value)
    }

    /// Fetch every stop served by a subway route.
    pub async fn subway_stops(&self) -> Result<Vec<StopResource>, MbtaError> {
        let value = self
            .get_json("/stops", &[("filter[route_type]", SUBWAY_ROUTE_TYPES)])
            .await?;
        decode_data(value)
    }

    /// Fetch the subway routes serving a single stop.
    pub async fn routes_serving_stop(
        &self,
        stop_id: &str,
    ) -> Result<Vec<RouteResource>, MbtaError> {
        let value = self
            .get_json(
                "/routes",
                &[
                    ("filter[stop]", stop_id),
                    ("filter[type]", SUBWAY_ROUTE_TYPES),
                ],
            )
            .await?;
        decode_data(value)
    }

    /// HTTP GET with bounded retries, returning the parsed JSON body.
    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, MbtaError> {
        let url = format!("{}{}", self.base_url, path);

        with_retries(self.max_attempts, self.retry_base_delay, || {
            self.try_get_json(&url, query)
        })
        .await
    }

    /// A single GET attempt.
    async fn try_get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value, MbtaError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
        })
    }
}

/// Run an operation with bounded retries and exponential backoff.
///
/// Attempts are numbered from zero; attempt n sleeps `base_delay * 2^n`
/// before the next try. Rate limiting shares the same budget and schedule
/// as other transient failures. Non-transient errors propagate immediately.
async fn with_retries<T, F, Fut>(
    max_attempts: u32,
    base_delay: Duration,
    mut op: F,
) -> Result<T, MbtaError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MbtaError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt + 1 < max_attempts => {
                let delay = base_delay * 2u32.pow(attempt);
                tracing::warn!(attempt, error = %e, "transient fetch failure, retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Extract and decode the `data` array from a JSON:API envelope.
///
/// Called after the retry loop: a response that arrived intact but lacks
/// a usable `data` array is not retried.
fn decode_data<T: DeserializeOwned>(mut value: Value) -> Result<Vec<T>, MbtaError> {
    let Some(data) = value.get_mut("data") else {
        return Err(MbtaError::MissingData);
    };

    serde_json::from_value(data.take()).map_err(|_| MbtaError::MissingData)
}
