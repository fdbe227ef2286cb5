//! Portsweep - a concurrent TCP port-range scanner
//!
//! Partitions a port range across a bounded pool of workers, probes each
//! port with a connect-with-timeout, and writes the outcomes as JSON.

pub mod config;
pub mod error;
pub mod output;
pub mod scanner;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::ScanError;
pub use output::{OutputConfig, OutputManager};
pub use scanner::engine::ScanEngine;
pub use scanner::{PortOutcome, ScanReport, WorkAssignment};

pub type Result<T> = std::result::Result<T, ScanError>;
