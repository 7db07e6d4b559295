//! Error types for the collector.

use thiserror::Error;

/// Errors that can occur while setting up a collection run.
///
/// A running collection never fails: fetch errors are absorbed per branch.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Error from the ingestion layer (client or API config).
    #[error("ingestion error: {0}")]
    Ingestion(#[from] fx_ingestion::IngestionError),

    /// Collector settings that cannot produce a run.
    #[error("invalid collector config: {0}")]
    InvalidConfig(String),
}
