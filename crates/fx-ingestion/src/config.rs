//! Configuration for the ingestion layer.
//!
//! # Environment Variables
//!
//! - `FOXTROT_API_TOKEN`: bearer token (required)
//! - `FOXTROT_BASE_URL`: API base URL (default: `https://apiv1.foxtrotsystems.com`)
//! - `FOXTROT_TIMEOUT_SECS`: per-request timeout (default: 15)
//! - `FOXTROT_MAX_RETRIES`: extra attempts on 500/502/503/504 (default: 2)
//! - `FOXTROT_POOL_SIZE`: idle connections kept per host (default: 256)

use crate::error::IngestionError;
use reqwest::StatusCode;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Foxtrot production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://apiv1.foxtrotsystems.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Sized for DCs × routes × waypoints in flight, not for a single level.
pub const DEFAULT_POOL_SIZE: usize = 256;

/// Statuses retried at the transport layer.
const RETRYABLE_STATUSES: [StatusCode; 4] = [
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Retry behavior for transient server errors.
///
/// Only the statuses 500, 502, 503 and 504 are retried. Connection errors,
/// timeouts and 4xx responses fail immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one.
    pub max_retries: u32,

    /// Delay before the first retry; doubled for each one after.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_base: Duration) -> Self {
        Self {
            max_retries,
            backoff_base,
        }
    }

    /// Delay before retry number `retry` (zero-based): base, 2×base, 4×base, ...
    pub fn backoff(&self, retry: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(retry))
    }

    #[inline]
    pub fn is_retryable(&self, status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }
}

/// Connection settings for the Foxtrot API.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,

    /// Static bearer token.
    pub token: String,

    /// Per-request timeout, covering connect and body.
    pub timeout: Duration,

    pub retry: RetryPolicy,

    /// Maximum idle connections kept per host.
    pub pool_size: usize,
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl ApiConfig {
    /// Create a config for the production API with default settings.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Load the config from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::Config`] if the token is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, IngestionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary key lookup.
    ///
    /// Used by [`ApiConfig::from_env`]; tests pass a map instead of touching
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IngestionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("FOXTROT_API_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| IngestionError::Config("FOXTROT_API_TOKEN is not set".into()))?;

        let mut config = Self::new(token.trim());

        if let Some(base_url) = lookup("FOXTROT_BASE_URL").filter(|s| !s.trim().is_empty()) {
            config = config.with_base_url(&base_url)?;
        }

        let timeout_secs: u64 =
            parse_var(&lookup, "FOXTROT_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
        let retry = RetryPolicy {
            max_retries: parse_var(&lookup, "FOXTROT_MAX_RETRIES", config.retry.max_retries)?,
            ..config.retry
        };
        let pool_size: usize = parse_var(&lookup, "FOXTROT_POOL_SIZE", DEFAULT_POOL_SIZE)?;

        Ok(config
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_retry(retry)
            .with_pool_size(pool_size))
    }

    /// Point the client at a different base URL.
    ///
    /// # Errors
    ///
    /// Returns [`IngestionError::Config`] if the URL does not parse or cannot
    /// carry a path (e.g., `mailto:`).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, IngestionError> {
        let url = Url::parse(base_url.trim())?;
        if url.cannot_be_a_base() {
            return Err(IngestionError::Config(format!(
                "base URL cannot carry a path: {}",
                base_url
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank.
///
/// # Errors
///
/// Returns [`IngestionError::Config`] naming the variable if it is set but
/// does not parse.
pub fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, IngestionError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| IngestionError::Config(format!("{}={:?}: {}", key, raw, e))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_retryable_statuses() {
        let policy = RetryPolicy::default();
        for code in [500, 502, 503, 504] {
            assert!(policy.is_retryable(StatusCode::from_u16(code).unwrap()));
        }
        for code in [400, 401, 404, 429, 501] {
            assert!(!policy.is_retryable(StatusCode::from_u16(code).unwrap()));
        }
    }

    #[test]
    fn test_missing_token_is_error() {
        let result = ApiConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(IngestionError::Config(_))));

        let result = ApiConfig::from_lookup(lookup(&[("FOXTROT_API_TOKEN", "  ")]));
        assert!(matches!(result, Err(IngestionError::Config(_))));
    }

    #[test]
    fn test_defaults_from_lookup() {
        let config = ApiConfig::from_lookup(lookup(&[("FOXTROT_API_TOKEN", "secret")])).unwrap();

        assert_eq!(config.token, "secret");
        assert_eq!(config.base_url.as_str(), "https://apiv1.foxtrotsystems.com/");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("FOXTROT_API_TOKEN", "secret"),
            ("FOXTROT_BASE_URL", "http://localhost:8080/api"),
            ("FOXTROT_TIMEOUT_SECS", "3"),
            ("FOXTROT_MAX_RETRIES", "0"),
            ("FOXTROT_POOL_SIZE", "10"),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:8080/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.retry.backoff_base, Duration::from_millis(500));
        assert_eq!(config.pool_size, 10);
    }

    #[test]
    fn test_blank_base_url_uses_default() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("FOXTROT_API_TOKEN", "secret"),
            ("FOXTROT_BASE_URL", "  "),
        ]))
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://apiv1.foxtrotsystems.com/");
    }

    #[test]
    fn test_bad_number_names_variable() {
        let err = ApiConfig::from_lookup(lookup(&[
            ("FOXTROT_API_TOKEN", "secret"),
            ("FOXTROT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("FOXTROT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let result = ApiConfig::new("t").with_base_url("mailto:ops@example.com");
        assert!(matches!(result, Err(IngestionError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ApiConfig::new("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
