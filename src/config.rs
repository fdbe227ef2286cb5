//! Configuration module for the portsweep scanner

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for scanning operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Target host to scan (hostname or literal IP)
    pub target: String,

    /// First port of the requested range (inclusive)
    pub start_port: u16,

    /// Last port of the requested range (inclusive)
    pub end_port: u16,

    /// Size of the concurrent worker pool
    pub workers: usize,

    /// Timeout for each connection attempt in milliseconds
    pub timeout: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            target: "127.0.0.1".to_string(),
            start_port: 1,
            end_port: 1024,
            workers: 250,
            timeout: 300, // Short constant timeout bounds worst-case latency per port
        }
    }
}

impl ScanConfig {
    /// Create a new scan configuration for the given target
    pub fn new(target: String) -> Self {
        Self {
            target,
            ..Default::default()
        }
    }

    /// Set the port range to scan
    pub fn with_port_range(mut self, start: u16, end: u16) -> Self {
        self.start_port = start;
        self.end_port = end;
        self
    }

    /// Set the worker pool size
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the per-connection timeout in milliseconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Total number of ports in the requested range
    pub fn port_count(&self) -> usize {
        (self.end_port as usize) - (self.start_port as usize) + 1
    }

    /// Number of workers actually dispatched: the pool is capped at the
    /// range size so no worker ever receives an empty assignment.
    pub fn effective_workers(&self) -> usize {
        std::cmp::min(self.workers, self.port_count()).max(1)
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.target.is_empty() {
            return Err(crate::ScanError::ConfigError(
                "Target cannot be empty".to_string(),
            ));
        }

        if self.start_port == 0 {
            return Err(crate::ScanError::ConfigError(
                "Start port must be at least 1".to_string(),
            ));
        }

        if self.start_port > self.end_port {
            return Err(crate::ScanError::ConfigError(format!(
                "Start port {} is greater than end port {}",
                self.start_port, self.end_port
            )));
        }

        if self.workers == 0 {
            return Err(crate::ScanError::ConfigError(
                "Worker count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
