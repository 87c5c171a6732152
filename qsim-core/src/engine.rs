//! Multi-server queue simulation engine
//!
//! [`simulate`] is a pure function of its inputs: given the inter-arrival
//! gaps, the per-customer service times, and the server count, it produces
//! the full timing record set and a queue-length trace. All randomness lives
//! upstream in the samplers; re-running with the same inputs yields the same
//! record, byte for byte.

use crate::arrivals::ArrivalTrace;
use serde::Serialize;

/// Timing record for one customer, immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    /// Absolute arrival time in minutes.
    pub arrival_time: f64,
    /// Sampled service duration.
    pub service_time: f64,
    /// When service began; >= arrival_time.
    pub start_time: f64,
    /// start_time + service_time.
    pub end_time: f64,
    /// start_time - arrival_time.
    pub wait_time: f64,
    /// end_time - arrival_time.
    pub turnaround_time: f64,
    /// wait_time + service_time.
    pub response_time: f64,
    /// Assigned server, 1-based.
    pub server: usize,
}

/// Everything one simulation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SimulationRecord {
    pub customers: Vec<CustomerRecord>,
    /// Customers waiting (arrived, service not yet started) at the moment of
    /// each arrival, measured before that arrival joins the queue.
    pub queue_lengths: Vec<usize>,
    pub total_customers: usize,
    /// Latest service completion, 0 for an empty run.
    pub total_time: f64,
}

/// Runs the queue: arrivals are dispatched in order to the earliest-free
/// server, ties going to the lowest server index.
///
/// `service_times` must be length-matched to the trace; the orchestrator
/// guarantees this, so a mismatch here is a caller bug.
pub fn simulate(trace: &ArrivalTrace, service_times: &[f64], servers: usize) -> SimulationRecord {
    debug_assert!(servers >= 1);
    debug_assert_eq!(trace.len(), service_times.len());

    let mut next_free = vec![0.0f64; servers];
    let mut customers: Vec<CustomerRecord> = Vec::with_capacity(trace.len());
    let mut queue_lengths = Vec::with_capacity(trace.len());
    // Start times of customers that have arrived but not yet entered
    // service; arrivals are time-ordered, so entries drop out as the clock
    // passes them.
    let mut pending_starts: Vec<f64> = Vec::new();
    let mut arrival = 0.0;
    let mut total_time = 0.0;

    for (&gap, &service) in trace.gaps.iter().zip(service_times) {
        arrival += gap as f64;

        pending_starts.retain(|&start| start > arrival);
        queue_lengths.push(pending_starts.len());

        // Earliest-free server; only a strictly earlier time displaces the
        // current pick, so equal times keep the lowest index.
        let mut chosen = 0;
        for server in 1..servers {
            if next_free[server] < next_free[chosen] {
                chosen = server;
            }
        }

        let start = arrival.max(next_free[chosen]);
        let end = start + service;
        let wait = (start - arrival).max(0.0);
        next_free[chosen] = end;
        if start > arrival {
            pending_starts.push(start);
        }
        if end > total_time {
            total_time = end;
        }

        customers.push(CustomerRecord {
            arrival_time: arrival,
            service_time: service,
            start_time: start,
            end_time: end,
            wait_time: wait,
            turnaround_time: end - arrival,
            response_time: wait + service,
            server: chosen + 1,
        });
    }

    SimulationRecord {
        total_customers: customers.len(),
        customers,
        queue_lengths,
        total_time,
    }
}
