//! Closed-form and approximate steady-state metrics
//!
//! Four calculators, all pure functions of scalar inputs: exact M/M/1 and
//! Erlang-C M/M/c for exponential service, Pollaczek-Khinchin M/G/1 and the
//! Allen-Cunneen approximation M/G/c for Gamma service. Callers must only
//! pass parameters that passed configuration validation (rho < 1, c >= 1,
//! shape >= 0.1); the formulas below divide by (1 - rho).

use crate::config::{ServiceDistribution, SimulationConfig};
use serde::Serialize;

/// Steady-state estimates for one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TheoreticalMetrics {
    /// Server utilization.
    pub rho: f64,
    /// Expected number waiting in queue.
    pub lq: f64,
    /// Expected waiting time in queue.
    pub wq: f64,
    /// Expected time in system (wait + service).
    pub ws: f64,
    /// Expected number in system.
    pub ls: f64,
    /// Squared coefficient of variation of service times; Gamma case only.
    pub scv: Option<f64>,
}

/// M/M/1.
pub fn mm1(lambda: f64, mu: f64) -> TheoreticalMetrics {
    let rho = lambda / mu;
    let lq = rho * rho / (1.0 - rho);
    let wq = lq / lambda;
    let ws = wq + 1.0 / mu;
    TheoreticalMetrics {
        rho,
        lq,
        wq,
        ws,
        ls: lambda * ws,
        scv: None,
    }
}

/// M/M/c via Erlang-C.
pub fn mmc(lambda: f64, mu: f64, servers: usize) -> TheoreticalMetrics {
    let c = servers as f64;
    let a = lambda / mu; // offered load in erlangs
    let rho = a / c;

    // Running term is a^n / n!; after the loop it holds a^c / c!.
    let mut sum = 0.0;
    let mut term = 1.0;
    for n in 0..servers {
        sum += term;
        term *= a / (n as f64 + 1.0);
    }
    let p0 = 1.0 / (sum + term / (1.0 - rho));

    let lq = p0 * term * rho / ((1.0 - rho) * (1.0 - rho));
    let wq = lq / lambda;
    let ws = wq + 1.0 / mu;
    TheoreticalMetrics {
        rho,
        lq,
        wq,
        ws,
        ls: lambda * ws,
        scv: None,
    }
}

/// M/G/1 via Pollaczek-Khinchin, with Gamma(shape) service times.
pub fn mg1(lambda: f64, mean_service: f64, shape: f64) -> TheoreticalMetrics {
    let rho = lambda * mean_service;
    let scv = 1.0 / shape;
    let wq = rho * mean_service * (1.0 + scv) / (2.0 * (1.0 - rho));
    let ws = wq + mean_service;
    TheoreticalMetrics {
        rho,
        lq: lambda * wq,
        wq,
        ws,
        ls: lambda * ws,
        scv: Some(scv),
    }
}

/// M/G/c via the Allen-Cunneen approximation: the M/M/c waiting time scaled
/// by (1 + Cs^2) / 2.
pub fn mgc(lambda: f64, mu: f64, servers: usize, shape: f64) -> TheoreticalMetrics {
    let exponential = mmc(lambda, mu, servers);
    let scv = 1.0 / shape;
    let wq = exponential.wq * (1.0 + scv) / 2.0;
    let ws = wq + 1.0 / mu;
    TheoreticalMetrics {
        rho: exponential.rho,
        lq: lambda * wq,
        wq,
        ws,
        ls: lambda * ws,
        scv: Some(scv),
    }
}

/// Picks the calculator matching the configuration's distribution and server
/// count. The configured mean service time is taken at face value here, even
/// though the Gamma sampler treats it as the scale parameter.
pub fn for_config(config: &SimulationConfig) -> TheoreticalMetrics {
    let lambda = config.arrival_rate();
    let mu = config.service_rate();
    match (config.service_distribution, config.servers) {
        (ServiceDistribution::Exponential, 1) => mm1(lambda, mu),
        (ServiceDistribution::Exponential, c) => mmc(lambda, mu, c),
        (ServiceDistribution::Gamma { shape }, 1) => mg1(lambda, config.mean_service, shape),
        (ServiceDistribution::Gamma { shape }, c) => mgc(lambda, mu, c, shape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn mm1_half_load_reference_values() {
        // mean interarrival 2, mean service 1: lambda = 0.5, mu = 1.
        let m = mm1(0.5, 1.0);
        assert!(close(m.rho, 0.5));
        assert!(close(m.lq, 0.5));
        assert!(close(m.wq, 1.0));
        assert!(close(m.ws, 2.0));
        assert!(close(m.ls, 1.0));
        assert_eq!(m.scv, None);
    }

    #[test]
    fn erlang_c_two_server_reference_values() {
        // lambda = mu = 1, c = 2: p0 = 1/3, Lq = 1/3.
        let m = mmc(1.0, 1.0, 2);
        assert!(close(m.rho, 0.5));
        assert!(close(m.lq, 1.0 / 3.0));
        assert!(close(m.wq, 1.0 / 3.0));
        assert!(close(m.ws, 1.0 / 3.0 + 1.0));
        assert!(close(m.ls, m.ws));
    }

    #[test]
    fn erlang_c_with_one_server_reduces_to_mm1() {
        let a = mm1(0.7, 1.25);
        let b = mmc(0.7, 1.25, 1);
        assert!(close(a.lq, b.lq));
        assert!(close(a.wq, b.wq));
        assert!(close(a.ws, b.ws));
        assert!(close(a.ls, b.ls));
    }

    #[test]
    fn pollaczek_khinchin_with_shape_one_reduces_to_mm1() {
        // Cs^2 = 1 collapses P-K to the exponential case.
        let lambda = 0.4;
        let mean_service = 1.5;
        let a = mg1(lambda, mean_service, 1.0);
        let b = mm1(lambda, 1.0 / mean_service);
        assert!(close(a.wq, b.wq));
        assert!(close(a.lq, b.lq));
        assert!(close(a.ws, b.ws));
        assert_eq!(a.scv, Some(1.0));
    }

    #[test]
    fn allen_cunneen_with_shape_one_reduces_to_erlang_c() {
        let a = mgc(1.0, 1.0, 2, 1.0);
        let b = mmc(1.0, 1.0, 2);
        assert!(close(a.wq, b.wq));
        assert!(close(a.lq, b.lq));
    }

    #[test]
    fn smoother_service_shortens_the_queue() {
        // Gamma shape 4 (Cs^2 = 0.25) halves and some the P-K wait versus
        // exponential service at the same load.
        let smooth = mg1(0.5, 1.0, 4.0);
        let rough = mg1(0.5, 1.0, 1.0);
        assert!(smooth.wq < rough.wq);
        assert!(close(smooth.wq / rough.wq, (1.0 + 0.25) / 2.0));
    }

    #[test]
    fn dispatch_selects_the_matching_model() {
        use crate::config::SimulationConfig;

        let mut config = SimulationConfig {
            mean_interarrival: 2.0,
            mean_service: 1.0,
            servers: 1,
            service_distribution: ServiceDistribution::Exponential,
            horizon: 100.0,
        };
        assert_eq!(for_config(&config), mm1(0.5, 1.0));

        config.servers = 3;
        assert_eq!(for_config(&config), mmc(0.5, 1.0, 3));

        config.service_distribution = ServiceDistribution::Gamma { shape: 2.0 };
        assert_eq!(for_config(&config), mgc(0.5, 1.0, 3, 2.0));

        config.servers = 1;
        assert_eq!(for_config(&config), mg1(0.5, 1.0, 2.0));
    }
}
