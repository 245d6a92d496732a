//! Shared HTTP client with connection pooling, rate limiting and retries
//!
//! Every provider goes through one [`ApiClient`], so the rate limit applies
//! to the bot as a whole. Timeouts, connection failures and 5xx responses are
//! retried with exponential backoff; 4xx responses are returned immediately.

use governor::{DefaultDirectRateLimiter, Quota};
use omni_common::{OmniError, Result};
use omni_config::HttpConfig;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, instrument, warn};

/// HTTP client shared by all providers
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    max_retries: usize,
}

impl ApiClient {
    /// Create a new client from the `[http]` config section
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| OmniError::network_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| OmniError::config("Rate limit must be greater than 0"))?,
        );

        Ok(Self {
            client,
            rate_limiter: Arc::new(DefaultDirectRateLimiter::direct(quota)),
            max_retries: config.max_retries,
        })
    }

    /// Send the request produced by `build`, retrying transient failures.
    ///
    /// `build` runs once per attempt. Non-success statuses come back as
    /// [`OmniError::Provider`] carrying the status code.
    #[instrument(skip(self, build))]
    pub async fn send<F>(&self, provider: &'static str, build: F) -> Result<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.max_retries);

        let client = &self.client;
        let limiter = &self.rate_limiter;
        let build = &build;

        RetryIf::spawn(
            retry_strategy,
            move || async move {
                limiter.until_ready().await;

                match build(client).send().await {
                    Ok(response) if response.status().is_success() => {
                        debug!("Request successful: {}", response.status());
                        Ok(response)
                    }
                    Ok(response) => {
                        let status = response.status();
                        if status.is_server_error() {
                            warn!("Server error, will retry: {}", status);
                        } else {
                            debug!("Client error: {}", status);
                        }
                        Err(OmniError::provider_with_status(
                            provider,
                            format!("API returned {status}"),
                            status.as_u16(),
                        ))
                    }
                    Err(e) if e.is_timeout() => {
                        warn!("Request timeout, will retry: {}", e);
                        Err(OmniError::network_with_source("Request timeout", e))
                    }
                    Err(e) if e.is_connect() => {
                        warn!("Connection error, will retry: {}", e);
                        Err(OmniError::network_with_source("Connection error", e))
                    }
                    Err(e) => {
                        error!("Request failed: {}", e);
                        Err(OmniError::with_source("Request failed", e))
                    }
                }
            },
            OmniError::is_transient,
        )
        .await
    }

    /// Send a request and return the body as text
    pub async fn request_text<F>(&self, provider: &'static str, build: F) -> Result<String>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let response = self.send(provider, build).await?;
        response
            .text()
            .await
            .map_err(|e| OmniError::network_with_source("Failed to read response body", e))
    }

    /// Send a request and parse the JSON body into `T`
    pub async fn request_json<T, F>(&self, provider: &'static str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let text = self.request_text(provider, build).await?;
        debug!(bytes = text.len(), "Parsing response body");
        Ok(serde_json::from_str(&text)?)
    }
}
