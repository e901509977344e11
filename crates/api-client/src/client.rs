//! Main API client implementation

use crate::config::{API_KEY_VAR, ClientConfig};
use crate::endpoints::FoodsApi;
use crate::error::{ApiError, ApiResult};
use pantry_core::rate_limit::RateLimiter;
use pantry_core::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// api.data.gov key header; keeps the key out of URLs and error text
const X_API_KEY: &str = "X-Api-Key";

/// FoodData Central client with built-in resilience patterns
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Circuit breaker to stop calling an upstream that keeps failing
/// - Rate limiting to stay inside the API quota
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct UsdaClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
    rate_limiter: Arc<RateLimiter>,
}

impl std::fmt::Debug for UsdaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsdaClient")
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.config.has_api_key())
            .field("circuit", &self.circuit_state())
            .finish_non_exhaustive()
    }
}

impl UsdaClient {
    /// Create a new client with configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("pantry-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::from)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig::default()));
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            circuit_breaker,
            rate_limiter,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Shared handle to the circuit breaker, for health reporting
    #[must_use]
    pub fn circuit_breaker(&self) -> Arc<CircuitBreaker> {
        Arc::clone(&self.circuit_breaker)
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    /// Reset rate limits for a specific endpoint
    pub fn reset_rate_limit(&self, endpoint: &str) {
        self.rate_limiter.reset(endpoint);
    }

    /// Access food search endpoints
    #[must_use]
    pub fn foods(&self) -> FoodsApi {
        FoodsApi::new(self.clone())
    }

    /// Perform an authenticated GET request with resilience patterns
    ///
    /// The API key travels in the `X-Api-Key` header, never in the URL.
    #[instrument(skip(self, query), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ApiError::MissingApiKey(API_KEY_VAR))?;

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let params: Vec<(&str, &str)> = query.iter().map(|(k, v)| (*k, v.as_str())).collect();

        self.request_url(&url, api_key, &params).await
    }

    /// Execute a request to an absolute URL with full resilience patterns
    async fn request_url<T: DeserializeOwned>(
        &self,
        url: &str,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());
        let rate_limit_key = extract_rate_limit_key(url);

        // Check circuit breaker
        if !self.circuit_breaker.can_execute() {
            warn!(
                request_id = %request_id,
                url = %url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ApiError::CircuitOpen);
        }

        // Check rate limiter
        if !self.rate_limiter.try_acquire(&rate_limit_key) {
            warn!(
                request_id = %request_id,
                url = %url,
                retry_in_ms = self.rate_limiter.time_until_available(&rate_limit_key).as_millis(),
                "Rate limited"
            );
            return Err(ApiError::RateLimited);
        }

        self.execute_with_retry(&request_id, url, api_key, params).await
    }

    /// Execute request with retry logic
    async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            // Wait before retry (except first attempt)
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request_id = %request_id,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self.execute_single_request(request_id, url, api_key, params).await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request_id = %request_id,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    self.circuit_breaker.record_failure();

                    if e.is_retryable() && attempt + 1 < retry_config.max_attempts {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request_id = %request_id,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<T: DeserializeOwned>(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let response = self
            .inner
            .get(url)
            .query(params)
            .header(X_REQUEST_ID, request_id)
            .header(X_API_KEY, api_key)
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Handle HTTP response and deserialize
async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    } else {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

/// Extract a rate limit key from a URL (the last path segment)
fn extract_rate_limit_key(url: &str) -> String {
    url.split('?')
        .next()
        .and_then(|s| s.split("://").nth(1))
        .and_then(|s| s.split('/').skip(1).filter(|seg| !seg.is_empty()).last())
        .unwrap_or("default")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_rate_limit_key() {
        assert_eq!(
            extract_rate_limit_key("https://api.nal.usda.gov/fdc/v1/foods/search?query=apple"),
            "search"
        );
        assert_eq!(extract_rate_limit_key("http://localhost:8080/health"), "health");
        assert_eq!(extract_rate_limit_key("http://localhost:8080"), "default");
    }

    #[test]
    fn test_client_creation() {
        let client = UsdaClient::with_config(ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let client = UsdaClient::with_config(ClientConfig::default().with_base_url("nope"));
        assert!(matches!(client, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_get_without_key_fails_fast() {
        let client = UsdaClient::with_config(ClientConfig::default()).unwrap();
        let result: ApiResult<serde_json::Value> =
            tokio_test::block_on(client.get("foods/search", &[("query", "apple".to_string())]));

        assert!(matches!(result, Err(ApiError::MissingApiKey(_))));
        assert_eq!(client.circuit_state(), CircuitState::Closed);
    }
}
