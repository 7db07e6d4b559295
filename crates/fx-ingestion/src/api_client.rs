//! HTTP client wrapper for the Foxtrot API.
//!
//! # Design
//!
//! - One `reqwest::Client` per run; it owns the connection pool and is shared
//!   by every concurrent fetch.
//! - Auth and content-type headers are installed as client defaults, so call
//!   sites only pass a URL.
//! - Retries live here, at the transport layer, and only for 500/502/503/504.
//!
//! # Failure Policy
//!
//! [`ApiClient::fetch_json`] never fails: any error is logged with the URL and
//! turned into `None`, so one broken endpoint cannot abort the run.
//! [`ApiClient::get_json`] is the same request with the error kept.

use crate::config::{ApiConfig, RetryPolicy};
use crate::error::IngestionError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use url::Url;

/// Authenticated JSON GET client with transient-error retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Build a client from the API config.
    ///
    /// No connections are opened until the first request.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::Config`] if the token cannot be used as a
    /// header value, or [`IngestionError::Network`] if the TLS backend fails
    /// to initialize.
    pub fn new(config: &ApiConfig) -> Result<Self, IngestionError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| IngestionError::Config("API token is not a valid header value".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_size)
            .build()?;

        Ok(Self {
            http_client,
            retry: config.retry,
        })
    }

    /// GET `url` and decode the body as `T`.
    ///
    /// Retries according to the [`RetryPolicy`]; the last status is returned
    /// as [`IngestionError::Status`] once retries are exhausted.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, IngestionError> {
        let mut retries = 0;

        loop {
            tracing::debug!("GET {}", url);
            let response = self.http_client.get(url.clone()).send().await?;
            let status = response.status();

            if status.is_success() {
                let body = response.bytes().await?;
                return Ok(serde_json::from_slice(&body)?);
            }

            if self.retry.is_retryable(status) && retries < self.retry.max_retries {
                let delay = self.retry.backoff(retries);
                retries += 1;
                tracing::debug!(
                    "{} from {}, retry {}/{} in {:?}",
                    status,
                    url,
                    retries,
                    self.retry.max_retries,
                    delay
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return Err(IngestionError::Status(status.as_u16()));
        }
    }

    /// GET `url` and decode the body, logging and swallowing any failure.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Option<T> {
        match self.get_json(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Error connecting to {}: {}", url, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_token_with_newline() {
        let config = ApiConfig::new("bad\ntoken");
        let result = ApiClient::new(&config);
        assert!(matches!(result, Err(IngestionError::Config(_))));
    }

    #[test]
    fn test_builds_with_defaults() {
        let client = ApiClient::new(&ApiConfig::new("token")).unwrap();
        assert_eq!(client.retry, RetryPolicy::default());
    }

    #[tokio::test]
    async fn test_connection_refused_is_none() {
        // Bind then drop to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = ApiConfig::new("token")
            .with_base_url(&format!("http://127.0.0.1:{}", port))
            .unwrap();
        let client = ApiClient::new(&config).unwrap();

        let url = config.base_url.join("/dcs").unwrap();
        let result: Option<serde_json::Value> = client.fetch_json(&url).await;
        assert!(result.is_none());
    }
}
