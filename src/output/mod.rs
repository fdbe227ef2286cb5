//! Output formatting and management
//!
//! The report is written as a pretty-printed JSON array of
//! `{"port": <u16>, "open": <bool>}` objects, one per scanned port.

use crate::scanner::ScanReport;
use std::fs::File;
use std::io::Write;

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Destination file for the JSON report
    pub file: String,
}

impl OutputConfig {
    pub fn new(file: String) -> Self {
        Self { file }
    }
}

/// Main output manager
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Serialize the report and write it to the configured file.
    ///
    /// A failure here happens after the scan completed; it is surfaced as an
    /// explicit error rather than swallowed.
    pub fn write_results(&self, report: &ScanReport) -> crate::Result<()> {
        let output = to_json_string(report)?;

        let mut file = File::create(&self.config.file).map_err(|e| {
            crate::ScanError::OutputError(format!(
                "Failed to create {}: {}",
                self.config.file, e
            ))
        })?;
        file.write_all(output.as_bytes()).map_err(|e| {
            crate::ScanError::OutputError(format!(
                "Failed to write {}: {}",
                self.config.file, e
            ))
        })?;

        Ok(())
    }
}

/// Format the outcome array as indented JSON
pub fn to_json_string(report: &ScanReport) -> crate::Result<String> {
    serde_json::to_string_pretty(&report.outcomes)
        .map_err(|e| crate::ScanError::OutputError(format!("Failed to encode JSON: {}", e)))
}
