//! Error types for post-run metrics

use thiserror::Error;

/// Errors from summary-statistics computation
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    #[error("empty record set")]
    Empty,

    #[error("histogram error: {0}")]
    Histogram(String),
}
