//! Error types for CSV export.

use thiserror::Error;

/// Errors that can occur when writing the output file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV encoding failed.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Creating or writing the file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
