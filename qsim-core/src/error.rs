//! Error types for the queueing simulator

use thiserror::Error;

/// Top-level error type for simulation operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("gamma sampling rejected {attempts} candidates without accepting one")]
    RetryBudgetExhausted { attempts: u32 },
}

/// Configuration rejection causes.
///
/// A configuration that fails any of these checks is rejected before any
/// sampling happens; values are never clamped into range.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("mean inter-arrival time must be positive, got {0}")]
    NonPositiveInterarrival(f64),

    #[error("mean service time must be positive, got {0}")]
    NonPositiveService(f64),

    #[error("server count must be at least 1")]
    NoServers,

    #[error("gamma shape must be at least 0.1, got {0}")]
    ShapeTooSmall(f64),

    #[error("horizon must be positive, got {0}")]
    NonPositiveHorizon(f64),

    #[error("offered load saturates the system (rho = {rho:.3} >= 1)")]
    Saturated { rho: f64 },
}
