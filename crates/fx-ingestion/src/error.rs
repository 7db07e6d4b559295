//! Error types for the ingestion layer.
//!
//! External errors (`reqwest`, `serde_json`, `url`) are converted into owned
//! strings immediately, so the enum has no generic parameters and no boxing.

use thiserror::Error;

/// Errors that can occur while talking to the Foxtrot API.
///
/// Fetch errors never leave the ingestion layer through
/// [`crate::DeliverySource`]; they are logged and turned into "no result".
/// They are returned directly only by [`crate::ApiClient::get_json`] and by
/// constructors.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Transport failure: timeout, connection refused, DNS, broken body.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response (after retries, for retryable statuses).
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not valid JSON for the expected schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration errors (e.g., missing env vars, bad URL).
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for IngestionError {
    #[inline]
    fn from(err: reqwest::Error) -> Self {
        IngestionError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for IngestionError {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        IngestionError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for IngestionError {
    #[inline]
    fn from(err: url::ParseError) -> Self {
        IngestionError::Config(format!("invalid base URL: {}", err))
    }
}
