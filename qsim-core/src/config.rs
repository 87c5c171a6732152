//! Simulation configuration and validation
//!
//! A [`SimulationConfig`] describes one queueing scenario: mean inter-arrival
//! time, mean service time, server count, the service-time distribution, and
//! the simulated horizon. All durations are in minutes.
//!
//! Validation is strict: a configuration whose implied utilization reaches 1
//! is rejected outright rather than simulated (a saturated queue has no
//! steady state, so neither the simulation nor the closed-form calculators
//! would produce meaningful output for it).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Smallest accepted Gamma shape parameter.
///
/// The shape < 1 sampling path degrades below this point, so smaller shapes
/// are a rejected configuration, not an approximated one.
pub const MIN_GAMMA_SHAPE: f64 = 0.1;

/// Service-time distribution selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ServiceDistribution {
    /// Exponential service times with rate 1 / mean service time (M/M/c).
    Exponential,
    /// Gamma-distributed service times with the given shape (M/G/c).
    Gamma { shape: f64 },
}

impl ServiceDistribution {
    /// Squared coefficient of variation of the service-time distribution.
    ///
    /// 1 for exponential, 1/shape for Gamma(shape).
    pub fn scv(&self) -> f64 {
        match self {
            ServiceDistribution::Exponential => 1.0,
            ServiceDistribution::Gamma { shape } => 1.0 / shape,
        }
    }
}

/// Parameters for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Mean inter-arrival time in minutes.
    pub mean_interarrival: f64,
    /// Mean service time in minutes.
    pub mean_service: f64,
    /// Number of identical servers.
    pub servers: usize,
    /// Service-time distribution.
    pub service_distribution: ServiceDistribution,
    /// Total simulated time in minutes.
    pub horizon: f64,
}

impl SimulationConfig {
    /// Arrival rate lambda (customers per minute).
    pub fn arrival_rate(&self) -> f64 {
        1.0 / self.mean_interarrival
    }

    /// Per-server service rate mu (customers per minute).
    pub fn service_rate(&self) -> f64 {
        1.0 / self.mean_service
    }

    /// Implied utilization rho = lambda / (c * mu).
    pub fn utilization(&self) -> f64 {
        self.arrival_rate() / (self.servers as f64 * self.service_rate())
    }

    /// Checks every acceptance condition, in declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mean_interarrival > 0.0) {
            return Err(ConfigError::NonPositiveInterarrival(self.mean_interarrival));
        }
        if !(self.mean_service > 0.0) {
            return Err(ConfigError::NonPositiveService(self.mean_service));
        }
        if self.servers < 1 {
            return Err(ConfigError::NoServers);
        }
        if let ServiceDistribution::Gamma { shape } = self.service_distribution {
            if !(shape >= MIN_GAMMA_SHAPE) {
                return Err(ConfigError::ShapeTooSmall(shape));
            }
        }
        if !(self.horizon > 0.0) {
            return Err(ConfigError::NonPositiveHorizon(self.horizon));
        }
        let rho = self.utilization();
        if rho >= 1.0 {
            return Err(ConfigError::Saturated { rho });
        }
        Ok(())
    }
}
