//! Error handling for the portsweep scanner
//!
//! Connection-level failures (refused, timed out, unreachable) are not
//! errors: they classify a port as closed and live in the data model.
//! The variants here cover everything that legitimately aborts a run.

use thiserror::Error;

/// Main error type for scanning operations
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to resolve target: {0}")]
    ResolveError(String),

    #[error("Aggregation error: {0}")]
    AggregationError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
