//! Reproducibility guardrail tests
//!
//! A run is a pure function of (configuration, uniform source); with a fixed
//! seed the entire report must replay identically. These tests exist to
//! catch any accidental reintroduction of ambient randomness or
//! iteration-order dependence.

use qsim_core::{run, RunReport, SeededUniform, ServiceDistribution, SimulationConfig};

fn config(distribution: ServiceDistribution) -> SimulationConfig {
    SimulationConfig {
        mean_interarrival: 2.0,
        mean_service: 1.2,
        servers: 2,
        service_distribution: distribution,
        horizon: 600.0,
    }
}

fn seeded_run(distribution: ServiceDistribution, seed: u64) -> RunReport {
    run(config(distribution), SeededUniform::seeded(seed)).unwrap()
}

#[test]
fn same_seed_replays_the_exponential_run_exactly() {
    let baseline = seeded_run(ServiceDistribution::Exponential, 42);
    for _ in 0..5 {
        assert_eq!(seeded_run(ServiceDistribution::Exponential, 42), baseline);
    }
}

#[test]
fn same_seed_replays_the_gamma_run_exactly() {
    let distribution = ServiceDistribution::Gamma { shape: 2.0 };
    let baseline = seeded_run(distribution, 7);
    for _ in 0..5 {
        assert_eq!(seeded_run(distribution, 7), baseline);
    }
}

#[test]
fn different_seeds_diverge() {
    let a = seeded_run(ServiceDistribution::Exponential, 1);
    let b = seeded_run(ServiceDistribution::Exponential, 2);
    assert_ne!(a.simulation.customers, b.simulation.customers);
}

#[test]
fn serialized_reports_replay_identically_too() {
    let a = serde_json::to_string(&seeded_run(ServiceDistribution::Exponential, 99)).unwrap();
    let b = serde_json::to_string(&seeded_run(ServiceDistribution::Exponential, 99)).unwrap();
    assert_eq!(a, b);
}
