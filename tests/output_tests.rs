//! Integration tests for JSON report output

use portsweep::output::{to_json_string, OutputConfig, OutputManager};
use portsweep::{PortOutcome, ScanError, ScanReport};

fn report_with_range(count: u16, open: &[u16]) -> ScanReport {
    let mut report = ScanReport::new("127.0.0.1".to_string());
    report.outcomes = (1..=count)
        .map(|port| PortOutcome {
            port,
            open: open.contains(&port),
        })
        .collect();
    report
}

#[test]
fn test_report_round_trips_through_file() {
    let report = report_with_range(500, &[22, 80, 443]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    let manager = OutputManager::new(OutputConfig::new(path.to_str().unwrap().to_string()));
    manager.write_results(&report).unwrap();

    let data = std::fs::read_to_string(&path).unwrap();
    let reloaded: Vec<PortOutcome> = serde_json::from_str(&data).unwrap();

    assert_eq!(reloaded.len(), 500);
    assert_eq!(reloaded, report.outcomes);
}

#[test]
fn test_json_shape() {
    let report = report_with_range(3, &[2]);
    let json = to_json_string(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 3);
    for entry in array {
        let object = entry.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("port"));
        assert!(object.contains_key("open"));
    }
    assert_eq!(parsed[1]["port"], 2);
    assert_eq!(parsed[1]["open"], true);
}

#[test]
fn test_unwritable_path_surfaces_error() {
    let report = report_with_range(1, &[]);
    let manager = OutputManager::new(OutputConfig::new(
        "/no/such/directory/results.json".to_string(),
    ));

    let result = manager.write_results(&report);
    assert!(matches!(result, Err(ScanError::OutputError(_))));
}
