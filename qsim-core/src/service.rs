//! Service-time sampling
//!
//! One independent draw per arrival, length-matched to the arrival trace.
//! Exponential mode inverts the CDF directly; Gamma mode hands the
//! configured mean service time to the Gamma sampler as the *scale*
//! parameter, so the realized mean is shape * mean_service, not
//! mean_service, whenever shape != 1. The theoretical calculators keep
//! their own (face-value) reading of the mean. Every draw is rounded to 2
//! fractional digits.

use crate::config::{ServiceDistribution, SimulationConfig};
use crate::error::SimError;
use crate::variates::{UniformSource, VariateGenerator};

/// Produces the per-customer service durations for one run.
#[derive(Debug, Clone, Copy)]
pub struct ServiceSampler {
    distribution: ServiceDistribution,
    mean: f64,
}

impl ServiceSampler {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            distribution: config.service_distribution,
            mean: config.mean_service,
        }
    }

    /// One service duration, rounded to 2 fractional digits.
    pub fn sample_one<S: UniformSource>(
        &self,
        variates: &mut VariateGenerator<S>,
    ) -> Result<f64, SimError> {
        let raw = match self.distribution {
            ServiceDistribution::Exponential => {
                let u = variates.uniform();
                -(1.0 - u).ln() * self.mean
            }
            ServiceDistribution::Gamma { shape } => variates.gamma(shape, self.mean)?,
        };
        Ok(round_to_hundredths(raw))
    }

    /// `count` independent draws, in arrival order.
    pub fn sample_many<S: UniformSource>(
        &self,
        count: usize,
        variates: &mut VariateGenerator<S>,
    ) -> Result<Vec<f64>, SimError> {
        (0..count).map(|_| self.sample_one(variates)).collect()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
