//! Runs one M/M/2 simulation and prints the observed-vs-theory report.
//!
//! ```bash
//! cargo run -p qsim-metrics --example mmc_report
//! RUST_LOG=qsim_core=debug cargo run -p qsim-metrics --example mmc_report
//! ```

use qsim_core::{init_logging, run, SeededUniform, ServiceDistribution, SimulationConfig};
use qsim_metrics::{DurationDistribution, MetricsComparison, ObservedMetrics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = SimulationConfig {
        mean_interarrival: 2.0,
        mean_service: 1.5,
        servers: 2,
        service_distribution: ServiceDistribution::Exponential,
        horizon: 8.0 * 60.0, // one simulated working day
    };

    let report = run(config, SeededUniform::seeded(42))?;
    let observed = ObservedMetrics::from_record(&report.simulation, config.servers)?;
    let comparison = MetricsComparison::of(&observed, &report.theory);
    let waits = DurationDistribution::of_waits(&report.simulation.customers)?;

    println!(
        "simulated {} customers over {:.1} minutes (rho = {:.3})",
        report.simulation.total_customers, report.simulation.total_time, report.theory.rho
    );
    println!(
        "waits: mean {:.2} min, p95 {:.2} min, max {:.2} min",
        waits.mean, waits.p95, waits.max
    );
    println!("{}", serde_json::to_string_pretty(&comparison)?);

    Ok(())
}
