//! End-to-end runs of the checked-in scenario documents through the
//! loader and runner, against a collecting sink instead of the network.

use redsim_core::{DeliveryError, EventSink, SecurityEvent, Severity, patterns};
use redsim_gen::loader::load_scenario;
use redsim_gen::scenario::run_scenario;
use std::path::PathBuf;
use std::sync::Mutex;

struct CollectingSink {
    events: Mutex<Vec<SecurityEvent>>,
}

impl CollectingSink {
    fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl EventSink for CollectingSink {
    async fn deliver(&self, event: &SecurityEvent) -> Result<(), DeliveryError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

fn scenario_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenarios")
}

#[tokio::test]
async fn test_sql_burst_document_end_to_end() {
    let scenario = load_scenario(&scenario_dir(), "sql-burst")
        .unwrap()
        .expect("sql-burst.json ships with the repo");

    let sink = CollectingSink::new();
    let report = run_scenario(&sink, &scenario).await;

    assert_eq!(report.delivered, 3);
    assert_eq!(report.skipped_steps, 0);

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 3);
    for event in events.iter() {
        assert_eq!(event.event_type.as_str(), "sql_injection");
        assert_eq!(event.severity, Severity::High);
        assert_eq!(event.source_identity, report.source_identity);
        let payload = event.metadata["payload"].as_str().unwrap();
        assert!(patterns::SQL_PAYLOADS.contains(&payload));
    }
}

#[tokio::test(start_paused = true)]
async fn test_full_chain_document_delivers_every_step() {
    let scenario = load_scenario(&scenario_dir(), "full-chain")
        .unwrap()
        .expect("full-chain.json ships with the repo");

    let expected: u64 = scenario.steps.iter().map(|s| s.count as u64).sum();

    let sink = CollectingSink::new();
    let report = run_scenario(&sink, &scenario).await;

    assert_eq!(report.delivered, expected);
    assert_eq!(report.skipped_steps, 0);

    // The chain escalates: the last events are the critical exfiltration
    let events = sink.events.lock().unwrap();
    assert_eq!(events.last().unwrap().severity, Severity::Critical);
}

#[tokio::test]
async fn test_unresolvable_name_is_not_found_twice() {
    let dir = scenario_dir();
    assert!(load_scenario(&dir, "doesNotExist").unwrap().is_none());
    assert!(load_scenario(&dir, "doesNotExist").unwrap().is_none());
}
