//! Correlation Probe Harness
//!
//! Hand-authored multi-event narratives that feed the external
//! correlation engine one pattern class at a time. The harness only
//! emits inputs and prints what the engine is expected to raise -
//! verification happens on the engine's side, by an operator watching
//! its incident feed. It drives the same `EventSink` contract as the
//! generators but is pointed at the correlation ingestion surface.

use redsim_core::{Action, EventSink, patterns};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Pause between scenarios in `all` mode
pub const INTER_SCENARIO_PAUSE: Duration = Duration::from_secs(5);

/// The five probe narratives, each exercising one correlation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeScenario {
    /// One critical-severity event - should raise immediately
    CriticalEvent,
    /// Three same-type high-severity events, one identity, short window
    BurstWindow,
    /// Four-stage ordered attack narrative from one identity
    AttackChain,
    /// Five high-severity events from one identity in a longer window
    SeverityBurst,
    /// Twenty low-severity events from twenty distinct identities
    DistributedSpike,
}

impl ProbeScenario {
    pub const ALL: [ProbeScenario; 5] = [
        ProbeScenario::CriticalEvent,
        ProbeScenario::BurstWindow,
        ProbeScenario::AttackChain,
        ProbeScenario::SeverityBurst,
        ProbeScenario::DistributedSpike,
    ];

    /// Resolve a probe by name or 1-based index
    pub fn parse(input: &str) -> Option<ProbeScenario> {
        match input {
            "critical-event" | "1" => Some(ProbeScenario::CriticalEvent),
            "burst-window" | "2" => Some(ProbeScenario::BurstWindow),
            "attack-chain" | "3" => Some(ProbeScenario::AttackChain),
            "severity-burst" | "4" => Some(ProbeScenario::SeverityBurst),
            "distributed-spike" | "5" => Some(ProbeScenario::DistributedSpike),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProbeScenario::CriticalEvent => "critical-event",
            ProbeScenario::BurstWindow => "burst-window",
            ProbeScenario::AttackChain => "attack-chain",
            ProbeScenario::SeverityBurst => "severity-burst",
            ProbeScenario::DistributedSpike => "distributed-spike",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ProbeScenario::CriticalEvent => "single critical event, immediate incident",
            ProbeScenario::BurstWindow => "3x same-type high severity in a short window",
            ProbeScenario::AttackChain => "4-stage ordered attack chain, one identity",
            ProbeScenario::SeverityBurst => "5x high severity from one identity",
            ProbeScenario::DistributedSpike => "20 low events from 20 identities",
        }
    }

    /// Emit this narrative through the sink
    pub async fn run(&self, sink: &dyn EventSink) {
        info!(probe = self.name(), "probe scenario started");
        println!("--- probe: {} ---", self.name());

        match self {
            ProbeScenario::CriticalEvent => {
                let source = patterns::random_external_ip();
                Action::DataExfiltration.fire(sink, &source).await;
                println!(
                    "expect: one CRITICAL incident for data_exfiltration from {}",
                    source
                );
            }
            ProbeScenario::BurstWindow => {
                let source = patterns::random_external_ip();
                for _ in 0..3 {
                    Action::SqlInjection.fire(sink, &source).await;
                    sleep(Duration::from_millis(500)).await;
                }
                println!(
                    "expect: one repeated-attack incident (3x sql_injection within ~2s) from {}",
                    source
                );
            }
            ProbeScenario::AttackChain => {
                let source = patterns::random_external_ip();
                let chain = [
                    Action::PortScan,
                    Action::BruteForce,
                    Action::PrivilegeEscalation,
                    Action::DataExfiltration,
                ];
                for action in chain {
                    action.fire(sink, &source).await;
                    sleep(Duration::from_secs(1)).await;
                }
                println!(
                    "expect: one kill-chain incident (recon -> access -> escalate -> exfil) from {}",
                    source
                );
            }
            ProbeScenario::SeverityBurst => {
                let source = patterns::random_external_ip();
                let pool = [Action::SqlInjection, Action::Xss, Action::BruteForce];
                for i in 0..5 {
                    pool[i % pool.len()].fire(sink, &source).await;
                    sleep(Duration::from_secs(2)).await;
                }
                println!(
                    "expect: one high-severity-burst incident (5 events within ~10s) from {}",
                    source
                );
            }
            ProbeScenario::DistributedSpike => {
                for i in 0..20u32 {
                    // Last octet indexed so the twenty identities are
                    // guaranteed distinct
                    let source = format!(
                        "{}.{}.{}.{}",
                        fastrand::u32(60..200),
                        fastrand::u32(0..255),
                        fastrand::u32(0..255),
                        i + 1
                    );
                    Action::UserLogin.fire(sink, &source).await;
                    sleep(Duration::from_millis(50)).await;
                }
                println!("expect: one anomaly-spike incident (20 logins, 20 sources, ~1s)");
            }
        }

        info!(probe = self.name(), "probe scenario complete");
    }
}

/// Run all five probes in order with a fixed pause between them
pub async fn run_all(sink: &dyn EventSink) {
    for (i, probe) in ProbeScenario::ALL.iter().enumerate() {
        probe.run(sink).await;
        if i + 1 < ProbeScenario::ALL.len() {
            sleep(INTER_SCENARIO_PAUSE).await;
        }
    }
    println!("--- all probe scenarios emitted ---");
}

#[cfg(test)]
mod tests {
    use super::*;
    use redsim_core::{DeliveryError, SecurityEvent, Severity};
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

    #[test]
    fn test_parse_by_name_and_index() {
        for (i, probe) in ProbeScenario::ALL.iter().enumerate() {
            assert_eq!(ProbeScenario::parse(probe.name()), Some(*probe));
            assert_eq!(ProbeScenario::parse(&(i + 1).to_string()), Some(*probe));
        }
        assert_eq!(ProbeScenario::parse("0"), None);
        assert_eq!(ProbeScenario::parse("6"), None);
        assert_eq!(ProbeScenario::parse("unknown"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_window_shape() {
        let sink = CollectingSink::new();
        ProbeScenario::BurstWindow.run(&sink).await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 3);
        let first_source = &events[0].source_identity;
        assert!(events.iter().all(|e| {
            e.severity == Severity::High && &e.source_identity == first_source
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attack_chain_order() {
        let sink = CollectingSink::new();
        ProbeScenario::AttackChain.run(&sink).await;

        let events = sink.events.lock().unwrap();
        let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(
            kinds,
            vec![
                "port_scan",
                "brute_force",
                "privilege_escalation",
                "data_exfiltration"
            ]
        );
        let first_source = &events[0].source_identity;
        assert!(events.iter().all(|e| &e.source_identity == first_source));
    }

    #[tokio::test(start_paused = true)]
    async fn test_distributed_spike_uses_distinct_identities() {
        let sink = CollectingSink::new();
        ProbeScenario::DistributedSpike.run(&sink).await;

        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 20);
        let mut sources: Vec<&str> =
            events.iter().map(|e| e.source_identity.as_str()).collect();
        sources.sort();
        sources.dedup();
        assert_eq!(sources.len(), 20);
        assert!(events.iter().all(|e| e.severity == Severity::Low));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_all_emits_every_narrative() {
        let sink = CollectingSink::new();
        run_all(&sink).await;

        // 1 + 3 + 4 + 5 + 20
        assert_eq!(sink.events.lock().unwrap().len(), 33);
    }
}
