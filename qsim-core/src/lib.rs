//! Multi-server queueing simulator and analytic engine.
//!
//! This crate simulates M/M/c and M/G/c queues (Poisson arrivals, c
//! identical servers, exponential or Gamma service times) and computes the
//! matching closed-form / approximate steady-state metrics, so a caller can
//! put one simulated run next to what theory predicts for the same
//! parameters.
//!
//! # Architecture Overview
//!
//! The pipeline is a chain of pure stages:
//!
//! - [`variates`]: all randomness, derived from one injectable
//!   [`UniformSource`]. Normal draws use Box-Muller, Gamma draws use
//!   Marsaglia-Tsang acceptance-rejection with a bounded retry budget.
//! - [`arrivals`]: integer inter-arrival gaps from a cumulative Poisson
//!   table, with a tagged continuous-exponential fallback.
//! - [`service`]: one service duration per customer, exponential or Gamma.
//! - [`engine`]: the event-driven queue itself; a pure function from the
//!   two sampled sequences to per-customer timing records and a
//!   queue-length trace.
//! - [`analytic`]: M/M/1, Erlang-C, Pollaczek-Khinchin and Allen-Cunneen
//!   calculators, independent of the simulation.
//!
//! [`run`] wires the stages together for one validated
//! [`SimulationConfig`] and returns a [`RunReport`] owned by the caller.
//! There is no shared state between runs; reproducibility comes from
//! seeding the uniform source.
//!
//! # Basic Usage
//!
//! ```rust
//! use qsim_core::{run, SeededUniform, ServiceDistribution, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     mean_interarrival: 2.0,
//!     mean_service: 1.0,
//!     servers: 2,
//!     service_distribution: ServiceDistribution::Exponential,
//!     horizon: 480.0,
//! };
//!
//! let report = run(config, SeededUniform::seeded(42)).unwrap();
//! assert_eq!(report.simulation.total_customers, report.simulation.customers.len());
//! assert!(report.theory.rho < 1.0);
//! ```

pub mod analytic;
pub mod arrivals;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod service;
pub mod variates;

use serde::Serialize;
use tracing::{info, instrument};

pub use analytic::TheoreticalMetrics;
pub use arrivals::{ArrivalSampler, ArrivalTrace, SamplerMode};
pub use config::{ServiceDistribution, SimulationConfig, MIN_GAMMA_SHAPE};
pub use engine::{simulate, CustomerRecord, SimulationRecord};
pub use error::{ConfigError, SimError};
pub use logging::{init_logging, init_logging_with_level};
pub use service::ServiceSampler;
pub use variates::{SeededUniform, UniformSource, VariateGenerator};

/// Everything one invocation produces: the simulated record set, the
/// steady-state estimates for the same parameters, and how arrivals were
/// actually sampled. Value data; the caller owns it outright.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub config: SimulationConfig,
    pub simulation: SimulationRecord,
    pub theory: TheoreticalMetrics,
    /// `Table` normally; `ExponentialFallback` when the Poisson table could
    /// not be built (see [`arrivals::SamplerMode`]).
    pub sampler_mode: SamplerMode,
}

/// Runs one complete simulation: validate, sample arrivals and service
/// times, drive the queue engine, and compute the theoretical metrics.
///
/// Fails on an invalid configuration or an exhausted Gamma retry budget;
/// a horizon too short to admit customers is a valid (near-empty) result.
#[instrument(skip(source), fields(
    servers = config.servers,
    horizon = config.horizon,
))]
pub fn run<S: UniformSource>(config: SimulationConfig, source: S) -> Result<RunReport, SimError> {
    config.validate()?;

    let mut variates = VariateGenerator::new(source);
    let sampler = ArrivalSampler::new(config.mean_interarrival);
    let trace = sampler.trace(config.horizon, &mut variates);
    let services = ServiceSampler::new(&config).sample_many(trace.len(), &mut variates)?;
    let simulation = engine::simulate(&trace, &services, config.servers);
    let theory = analytic::for_config(&config);

    info!(
        customers = simulation.total_customers,
        total_time = simulation.total_time,
        rho = theory.rho,
        "simulation run complete"
    );

    Ok(RunReport {
        config,
        simulation,
        theory,
        sampler_mode: sampler.mode().clone(),
    })
}
