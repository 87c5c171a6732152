//! Observed summary statistics over a completed run
//!
//! Aggregates the per-customer timing records and queue trace produced by
//! `qsim_core` into the averages a results view wants, plus high-resolution
//! wait/response distributions backed by `hdrhistogram`. Histogram values
//! are recorded in centiminutes since the core rounds every duration to two
//! fractional digits.

use crate::error::MetricsError;
use hdrhistogram::Histogram as HdrHistogram;
use qsim_core::{CustomerRecord, SimulationRecord, TheoreticalMetrics};
use serde::Serialize;

/// Means and rates observed in one simulated run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservedMetrics {
    pub mean_wait: f64,
    pub mean_service: f64,
    pub mean_turnaround: f64,
    pub mean_response: f64,
    /// Average of the queue-length-at-arrival trace.
    pub mean_queue_length: f64,
    pub max_queue_length: usize,
    /// Customers completed per simulated minute.
    pub throughput: f64,
    /// Busy fraction per server, 0-indexed by server - 1.
    pub utilization: Vec<f64>,
}

impl ObservedMetrics {
    /// Aggregates one record set. Fails on an empty run; a caller that
    /// wants to present an empty run should branch before aggregating.
    pub fn from_record(
        record: &SimulationRecord,
        servers: usize,
    ) -> Result<Self, MetricsError> {
        if record.customers.is_empty() {
            return Err(MetricsError::Empty);
        }
        let count = record.customers.len() as f64;

        let mut busy = vec![0.0f64; servers];
        let mut wait = 0.0;
        let mut service = 0.0;
        let mut turnaround = 0.0;
        let mut response = 0.0;
        for customer in &record.customers {
            wait += customer.wait_time;
            service += customer.service_time;
            turnaround += customer.turnaround_time;
            response += customer.response_time;
            busy[customer.server - 1] += customer.service_time;
        }

        let total_time = record.total_time;
        let utilization = busy
            .iter()
            .map(|&b| if total_time > 0.0 { b / total_time } else { 0.0 })
            .collect();

        Ok(Self {
            mean_wait: wait / count,
            mean_service: service / count,
            mean_turnaround: turnaround / count,
            mean_response: response / count,
            mean_queue_length: record.queue_lengths.iter().sum::<usize>() as f64
                / record.queue_lengths.len() as f64,
            max_queue_length: record.queue_lengths.iter().copied().max().unwrap_or(0),
            throughput: if total_time > 0.0 {
                count / total_time
            } else {
                0.0
            },
            utilization,
        })
    }
}

/// Percentile summary of one duration field, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationDistribution {
    pub count: u64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub max: f64,
}

impl DurationDistribution {
    fn from_values(values: impl Iterator<Item = f64>) -> Result<Self, MetricsError> {
        let mut histogram = HdrHistogram::<u64>::new(3)
            .map_err(|e| MetricsError::Histogram(e.to_string()))?;
        for value in values {
            let centiminutes = (value * 100.0).round() as u64;
            histogram
                .record(centiminutes)
                .map_err(|e| MetricsError::Histogram(e.to_string()))?;
        }
        if histogram.is_empty() {
            return Err(MetricsError::Empty);
        }
        Ok(Self {
            count: histogram.len(),
            mean: histogram.mean() / 100.0,
            p50: histogram.value_at_quantile(0.5) as f64 / 100.0,
            p95: histogram.value_at_quantile(0.95) as f64 / 100.0,
            p99: histogram.value_at_quantile(0.99) as f64 / 100.0,
            max: histogram.max() as f64 / 100.0,
        })
    }

    /// Distribution of waiting times across the record set.
    pub fn of_waits(customers: &[CustomerRecord]) -> Result<Self, MetricsError> {
        Self::from_values(customers.iter().map(|c| c.wait_time))
    }

    /// Distribution of response times (wait + service).
    pub fn of_responses(customers: &[CustomerRecord]) -> Result<Self, MetricsError> {
        Self::from_values(customers.iter().map(|c| c.response_time))
    }
}

/// Observed single-run values next to the steady-state predictions for the
/// same parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsComparison {
    pub observed_wq: f64,
    pub expected_wq: f64,
    pub observed_ws: f64,
    pub expected_ws: f64,
    pub observed_lq: f64,
    pub expected_lq: f64,
}

impl MetricsComparison {
    pub fn of(observed: &ObservedMetrics, theory: &TheoreticalMetrics) -> Self {
        Self {
            observed_wq: observed.mean_wait,
            expected_wq: theory.wq,
            observed_ws: observed.mean_turnaround,
            expected_ws: theory.ws,
            observed_lq: observed.mean_queue_length,
            expected_lq: theory.lq,
        }
    }

    /// Relative error of observed vs. expected Wq; None when the expected
    /// value is zero.
    pub fn wq_relative_error(&self) -> Option<f64> {
        relative_error(self.observed_wq, self.expected_wq)
    }

    pub fn ws_relative_error(&self) -> Option<f64> {
        relative_error(self.observed_ws, self.expected_ws)
    }

    pub fn lq_relative_error(&self) -> Option<f64> {
        relative_error(self.observed_lq, self.expected_lq)
    }
}

fn relative_error(observed: f64, expected: f64) -> Option<f64> {
    if expected == 0.0 {
        None
    } else {
        Some((observed - expected).abs() / expected)
    }
}
