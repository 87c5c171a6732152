//! Post-run observability for qsim-core simulations
//!
//! This crate turns the raw record set a simulation run produces into the
//! numbers a results view presents: observed means and rates, per-server
//! utilization, high-resolution wait/response distributions, and a
//! side-by-side comparison against the closed-form steady-state metrics
//! computed for the same parameters.
//!
//! ```rust
//! use qsim_core::{run, SeededUniform, ServiceDistribution, SimulationConfig};
//! use qsim_metrics::{MetricsComparison, ObservedMetrics};
//!
//! let config = SimulationConfig {
//!     mean_interarrival: 2.0,
//!     mean_service: 1.0,
//!     servers: 2,
//!     service_distribution: ServiceDistribution::Exponential,
//!     horizon: 480.0,
//! };
//! let report = run(config, SeededUniform::seeded(1)).unwrap();
//! let observed = ObservedMetrics::from_record(&report.simulation, config.servers).unwrap();
//! let comparison = MetricsComparison::of(&observed, &report.theory);
//! assert!(comparison.observed_wq >= 0.0);
//! ```

pub mod error;
pub mod summary;

pub use error::MetricsError;
pub use summary::{DurationDistribution, MetricsComparison, ObservedMetrics};
