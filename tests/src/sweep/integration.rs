#![cfg(test)]
use std::fs;
use std::time::Duration;

use invsweep_common::config::{Config, RetryPolicy};
use invsweep_common::inventory::{FIELD_SCHEMA, SweepResult};
use invsweep_common::network::range;
use invsweep_core::client::{InventoryClient, InventoryProbe};
use invsweep_core::report::ReportWriter;
use invsweep_core::sweep::{SweepCoordinator, SweepProgress};

use crate::stub::{Reply, StubEndpoint};

const WORKSTATION: &str = r#"{
    "ip": "192.0.2.200",
    "manufacturer": "LENOVO",
    "model": "ThinkCentre M70q",
    "serial_number": "PC-1X2Y3Z",
    "total_memory": 16384,
    "hostname": "ws-reception",
    "current_user": "CORP\\\"front desk\"",
    "location": null,
    "drives": ["C:", "D:"],
    "status": "online"
}"#;

fn test_config(endpoint: String) -> Config {
    Config {
        endpoint,
        concurrency: 4,
        retry: RetryPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(20),
        },
        request_timeout: Duration::from_millis(300),
        ..Config::default()
    }
}

/// `.1` answers immediately, `.2` never answers, `.3` fails once then answers.
#[tokio::test]
async fn sweep_three_hosts_with_mixed_outcomes() {
    let stub = StubEndpoint::start(|address, attempt| match (address, attempt) {
        ("10.0.0.1", _) => Reply::Json(WORKSTATION),
        ("10.0.0.2", _) => Reply::Hang,
        ("10.0.0.3", 1) => Reply::Status(503),
        ("10.0.0.3", _) => Reply::Json(r#"{"hostname": "ws-3", "model": "OptiPlex 7090"}"#),
        _ => Reply::Status(404),
    })
    .await;

    let cfg = test_config(stub.endpoint());
    let client = InventoryClient::from_config(&cfg).unwrap();
    let coordinator = SweepCoordinator::new(client, cfg.concurrency);

    let mut progress: Vec<SweepProgress> = Vec::new();
    let result: SweepResult = coordinator
        .sweep(range::expand("10.0.0.1-10.0.0.3"), |p| progress.push(p.clone()))
        .await;

    let records: Vec<&str> = result.records.iter().map(|r| r.address()).collect();
    assert_eq!(records, vec!["10.0.0.1", "10.0.0.3"]);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].address, "10.0.0.2");
    assert!(
        result.failures[0].reason.contains("timed out"),
        "unexpected reason: {}",
        result.failures[0].reason
    );

    assert_eq!(stub.hits("10.0.0.1"), 1);
    assert_eq!(stub.hits("10.0.0.2"), 3);
    assert_eq!(stub.hits("10.0.0.3"), 2);

    let first = &result.records[0];
    assert_eq!(first.address(), "10.0.0.1");
    assert_eq!(first.get("manufacturer"), Some("LENOVO"));
    assert_eq!(first.get("total_memory"), Some("16384"));
    assert_eq!(first.get("location"), Some(""));
    assert_eq!(first.get("processor"), Some(""));
    assert_eq!(first.get("drives"), Some(r#"["C:", "D:"]"#));
    assert_eq!(first.get("current_user"), Some(r#"CORP\"front desk""#));
    assert_eq!(result.records[1].get("model"), Some("OptiPlex 7090"));

    assert_eq!(progress.len(), 3);
    assert_eq!(progress.last().map(|p| (p.completed, p.total)), Some((3, 3)));

    let dir = tempfile::tempdir().unwrap();
    let paths = ReportWriter::new(dir.path(), "test").write(&result).unwrap();

    let csv_text = fs::read_to_string(&paths.csv).unwrap();
    assert_eq!(csv_text.lines().count(), 3);
    assert_eq!(csv_text.lines().next(), Some(FIELD_SCHEMA.join(",").as_str()));

    let errors = fs::read_to_string(paths.errors.expect("error log")).unwrap();
    assert_eq!(errors.lines().count(), 1);
    assert!(errors.starts_with("10.0.0.2: "));

    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows[0].get(0), Some("10.0.0.1"));
    assert_eq!(rows[0].get(10), Some(r#"CORP\"front desk""#));
    assert_eq!(rows[1].get(0), Some("10.0.0.3"));
}

#[tokio::test]
async fn persistent_status_failure_reports_status_code() {
    let stub = StubEndpoint::start(|_, _| Reply::Status(500)).await;
    let cfg = test_config(stub.endpoint());
    let client = InventoryClient::from_config(&cfg).unwrap();

    let failure = client.query("10.1.1.1").await.unwrap_err();
    assert_eq!(failure.reason, "StatusCode 500 Internal Server Error");
    assert_eq!(stub.hits("10.1.1.1"), 3);
}

#[tokio::test]
async fn invalid_json_body_is_retried_then_reported() {
    let stub = StubEndpoint::start(|_, attempt| match attempt {
        1 => Reply::Json("<html>maintenance</html>"),
        _ => Reply::Json(r#"{"hostname": "recovered"}"#),
    })
    .await;
    let cfg = test_config(stub.endpoint());
    let client = InventoryClient::from_config(&cfg).unwrap();

    let record = client.query("10.1.1.2").await.unwrap();
    assert_eq!(record.get("hostname"), Some("recovered"));
    assert_eq!(stub.hits("10.1.1.2"), 2);
}

#[tokio::test]
async fn ip_column_ignores_echoed_address() {
    let stub = StubEndpoint::start(|_, _| Reply::Json(WORKSTATION)).await;
    let cfg = test_config(stub.endpoint());
    let client = InventoryClient::from_config(&cfg).unwrap();

    let record = client.query("10.1.1.3").await.unwrap();
    assert_eq!(record.address(), "10.1.1.3");
    assert_eq!(record.get("ip"), Some("10.1.1.3"));
}

#[tokio::test]
async fn sweep_of_a_larger_range_accounts_for_every_host() {
    let stub = StubEndpoint::start(|address, _| {
        if address.ends_with('7') {
            Reply::Status(404)
        } else {
            Reply::Json(r#"{"status": "online"}"#)
        }
    })
    .await;

    let mut cfg = test_config(stub.endpoint());
    cfg.retry.delay = Duration::from_millis(1);
    cfg.concurrency = 10;
    let coordinator = SweepCoordinator::new(InventoryClient::from_config(&cfg).unwrap(), cfg.concurrency);

    let addresses = range::expand("172.20.0.1-172.20.0.60");
    let result = coordinator.sweep(addresses.clone(), |_| {}).await;

    assert_eq!(result.total(), 60);
    let failing = addresses.iter().filter(|a| a.ends_with('7')).count();
    assert_eq!(result.failures.len(), failing);

    let expected: Vec<&str> = addresses
        .iter()
        .filter(|a| !a.ends_with('7'))
        .map(String::as_str)
        .collect();
    let produced: Vec<&str> = result.records.iter().map(|r| r.address()).collect();
    assert_eq!(produced, expected);
}
