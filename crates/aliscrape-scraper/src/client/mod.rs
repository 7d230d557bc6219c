//! HTTP client for the marketplace data API (`RapidAPI` `DataHub`).

mod items;
mod search;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use aliscrape_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::ScraperError;
use crate::rate_limit::{pause_between_requests, retry_with_backoff};

/// Connection and pacing settings for [`DatahubClient`].
#[derive(Clone)]
pub struct DatahubConfig {
    pub api_key: String,
    /// Host sent in `x-rapidapi-host`; also the production base URL host.
    pub api_host: String,
    /// Region code sent with item and search requests.
    pub region: String,
    pub timeout_secs: u64,
    /// Retry attempts after the first failure for transient errors.
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    /// Base pause before every request after the first, randomized ±50 %.
    pub inter_request_delay_ms: u64,
}

impl DatahubConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.rapid_api_key.clone(),
            api_host: config.rapid_api_host.clone(),
            region: config.region.clone(),
            timeout_secs: config.request_timeout_secs,
            max_retries: config.max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

impl std::fmt::Debug for DatahubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatahubConfig")
            .field("api_key", &"[redacted]")
            .field("api_host", &self.api_host)
            .field("region", &self.region)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .finish()
    }
}

/// Client for the item-detail, item-review and item-search endpoints.
///
/// Handles rate limiting (429), not-found (404), other non-2xx responses and
/// payloads flagged `result.status.data == "error"` as typed errors.
/// Transient errors (429, network failures, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts.
pub struct DatahubClient {
    client: Client,
    config: DatahubConfig,
    base_url: Url,
    /// Set once the first request has gone out; later requests pause first.
    started: AtomicBool,
}

impl DatahubClient {
    /// Creates a client pointed at `https://{api_host}/`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if the
    /// host does not form a valid URL.
    pub fn new(config: DatahubConfig) -> Result<Self, ScraperError> {
        let base_url = format!("https://{}/", config.api_host);
        Self::with_base_url(config, &base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScraperError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(config: DatahubConfig, base_url: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aliscrape/0.1")
            .build()?;

        // Exactly one trailing slash so endpoint names join onto the root.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            config,
            base_url,
            started: AtomicBool::new(false),
        })
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join endpoint \"{endpoint}\": {e}"),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET to `endpoint`, pacing and retrying as configured, and
    /// returns the JSON body after checking the API-level error flag.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    /// - [`ScraperError::Deserialize`]: response body is not valid JSON (not retried).
    /// - [`ScraperError::Api`]: the payload is flagged as an error.
    async fn get_json(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ScraperError> {
        let url = self.endpoint_url(endpoint, params)?;

        if self.started.swap(true, Ordering::SeqCst) {
            pause_between_requests(self.config.inter_request_delay_ms).await;
        }

        let body = retry_with_backoff(self.config.max_retries, self.config.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header("x-rapidapi-key", &self.config.api_key)
                    .header("x-rapidapi-host", &self.config.api_host)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited { retry_after_secs });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let text = response.text().await?;
                serde_json::from_str::<Value>(&text).map_err(|e| ScraperError::Deserialize {
                    context: endpoint.to_owned(),
                    source: e,
                })
            }
        })
        .await?;

        check_api_error(endpoint, &body)?;
        Ok(body)
    }
}

/// Fails when the envelope reports `result.status.data == "error"`.
fn check_api_error(endpoint: &str, body: &Value) -> Result<(), ScraperError> {
    if body.pointer("/result/status/data").and_then(Value::as_str) != Some("error") {
        return Ok(());
    }
    let message = body
        .pointer("/result/status/msg")
        .map_or_else(
            || "unknown error".to_owned(),
            |msg| msg.as_str().map_or_else(|| msg.to_string(), str::to_owned),
        );
    Err(ScraperError::Api {
        endpoint: endpoint.to_owned(),
        message,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
