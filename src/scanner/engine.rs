//! Main scanning engine implementation
//!
//! The dispatcher splits the requested range into contiguous assignments,
//! runs one worker task per assignment, and aggregates every outcome from a
//! shared channel before declaring the scan finished.

use crate::config::ScanConfig;
use crate::scanner::probe::{Probe, TcpProbe};
use crate::scanner::{partition, PortOutcome, ScanReport, WorkAssignment};
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Main scanning engine
pub struct ScanEngine {
    config: ScanConfig,
    target_addr: IpAddr,
    probe: Arc<dyn Probe>,
}

impl ScanEngine {
    /// Create a new scan engine with the given configuration
    pub fn new(config: ScanConfig) -> crate::Result<Self> {
        config.validate()?;
        let target_addr = resolve_target(&config.target)?;
        let probe: Arc<dyn Probe> = Arc::new(TcpProbe::new(config.timeout_duration()));

        Ok(Self {
            config,
            target_addr,
            probe,
        })
    }

    /// Create an engine with a caller-supplied probe. Used by tests to
    /// substitute a deterministic transport.
    pub fn with_probe(config: ScanConfig, probe: Arc<dyn Probe>) -> crate::Result<Self> {
        config.validate()?;
        let target_addr = resolve_target(&config.target)?;

        Ok(Self {
            config,
            target_addr,
            probe,
        })
    }

    /// Scan the configured port range and return a complete report.
    ///
    /// Runs to completion once started; never returns partial results.
    pub async fn scan(&self) -> crate::Result<ScanReport> {
        let start_time = Instant::now();

        let workers = self.config.effective_workers();
        let assignments = partition(self.config.start_port, self.config.end_port, workers);

        log::info!(
            "Scanning {} ports {}-{} with {} workers",
            self.config.target,
            self.config.start_port,
            self.config.end_port,
            assignments.len()
        );

        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<PortOutcome>();

        let mut handles = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            log::debug!(
                "Dispatching worker for ports {}-{}",
                assignment.from_port,
                assignment.to_port
            );

            let sink = outcome_tx.clone();
            let probe = Arc::clone(&self.probe);
            let target = self.target_addr;

            handles.push(tokio::spawn(async move {
                run_worker(assignment, target, probe, sink).await;
            }));
        }

        // Each worker owns a sender clone and drops it when it finishes.
        // Dropping ours means recv() yields None only after every worker is
        // done and any still-buffered outcomes have been drained.
        drop(outcome_tx);

        let mut report = ScanReport::new(self.config.target.clone());
        while let Some(outcome) = outcome_rx.recv().await {
            report.outcomes.push(outcome);
        }

        for handle in handles {
            handle.await.map_err(|e| {
                crate::ScanError::AggregationError(format!("Worker task failed: {}", e))
            })?;
        }

        let expected = self.config.port_count();
        if report.total_ports() != expected {
            return Err(crate::ScanError::AggregationError(format!(
                "Collected {} outcomes for {} requested ports",
                report.total_ports(),
                expected
            )));
        }

        report.sort_outcomes();
        report.set_duration(start_time.elapsed());

        log::info!(
            "Scan finished in {:.2}s, {} open ports",
            report.duration.as_secs_f64(),
            report.open_ports().len()
        );

        Ok(report)
    }

    /// Resolved target address used by the workers
    pub fn target_addr(&self) -> IpAddr {
        self.target_addr
    }
}

/// Probe every port in the assignment in ascending order, pushing one
/// outcome per port into the shared sink. Completion is signaled exactly
/// once on every exit path by the sender clone dropping with the task.
async fn run_worker(
    assignment: WorkAssignment,
    target: IpAddr,
    probe: Arc<dyn Probe>,
    sink: mpsc::UnboundedSender<PortOutcome>,
) {
    if assignment.is_empty() {
        return;
    }

    for port in assignment.from_port..=assignment.to_port {
        let open = probe.probe(target, port).await;
        // The receiver outlives all workers in the scan path; a send failure
        // can only mean the aggregator was torn down early, and the port has
        // already been probed, so there is nothing useful left to do.
        let _ = sink.send(PortOutcome { port, open });
    }
}

/// Resolve a hostname or literal address once, at dispatch time. Workers
/// only ever see the resolved address, so DNS cannot fail mid-scan.
fn resolve_target(target: &str) -> crate::Result<IpAddr> {
    if let Ok(addr) = target.parse::<IpAddr>() {
        return Ok(addr);
    }

    (target, 0u16)
        .to_socket_addrs()
        .map_err(|e| crate::ScanError::ResolveError(format!("{}: {}", target, e)))?
        .next()
        .map(|addr| addr.ip())
        .ok_or_else(|| {
            crate::ScanError::ResolveError(format!("{}: no addresses found", target))
        })
}
