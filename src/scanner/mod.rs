//! Scanner module containing the data model and the scanning engine

pub mod engine;
pub mod probe;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use engine::ScanEngine;
pub use probe::{Probe, TcpProbe};

/// Outcome of probing a single port. Exactly one is produced per scanned
/// port; ownership transfers from the worker to the aggregator at send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortOutcome {
    /// Port number that was probed
    pub port: u16,

    /// Whether a TCP connection was accepted within the timeout
    pub open: bool,
}

/// Contiguous inclusive sub-range of ports assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkAssignment {
    pub from_port: u16,
    pub to_port: u16,
}

impl WorkAssignment {
    pub fn new(from_port: u16, to_port: u16) -> Self {
        Self { from_port, to_port }
    }

    pub fn len(&self) -> usize {
        (self.to_port as usize) - (self.from_port as usize) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.from_port > self.to_port
    }

    pub fn contains(&self, port: u16) -> bool {
        port >= self.from_port && port <= self.to_port
    }
}

/// Complete scan result for one target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Target that was scanned
    pub target: String,

    /// One outcome per port in the requested range
    pub outcomes: Vec<PortOutcome>,

    /// Total scan duration
    pub duration: Duration,
}

impl ScanReport {
    pub fn new(target: String) -> Self {
        Self {
            target,
            outcomes: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Set the scan duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Ports that accepted a connection, ascending
    pub fn open_ports(&self) -> Vec<u16> {
        let mut ports: Vec<u16> = self
            .outcomes
            .iter()
            .filter(|o| o.open)
            .map(|o| o.port)
            .collect();
        ports.sort_unstable();
        ports
    }

    /// Get the total number of ports scanned
    pub fn total_ports(&self) -> usize {
        self.outcomes.len()
    }

    /// Sort outcomes by port number for consistent output
    pub fn sort_outcomes(&mut self) {
        self.outcomes.sort_by_key(|o| o.port);
    }
}

/// Split `[start, end]` into `workers` contiguous non-overlapping
/// assignments that cover the range exactly once. The base size is
/// `floor(total / workers)` and the last assignment absorbs the remainder.
///
/// Callers must cap `workers` at the range size (`ScanConfig::effective_workers`);
/// the cap guarantees every assignment is non-empty.
pub fn partition(start: u16, end: u16, workers: usize) -> Vec<WorkAssignment> {
    debug_assert!(start <= end);
    let total = (end as usize) - (start as usize) + 1;
    let workers = workers.clamp(1, total);
    let base = total / workers;

    let mut assignments = Vec::with_capacity(workers);
    for i in 0..workers {
        let from = (start as usize) + i * base;
        let to = if i == workers - 1 {
            end as usize
        } else {
            from + base - 1
        };
        assignments.push(WorkAssignment::new(from as u16, to as u16));
    }
    assignments
}
