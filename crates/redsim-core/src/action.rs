//! Action Dispatch
//!
//! The closed set of generator actions. Each action builds exactly one
//! `SecurityEvent` with its documented severity and metadata contract,
//! then ships it through an `EventSink`. Dispatch is an exhaustive
//! pattern match; unknown action *names* exist only at the parsing edge
//! (`Action::parse` returning `None`) and are the caller's recoverable
//! branch - scenario steps naming a missing action are skipped, never
//! fatal.

use crate::delivery::EventSink;
use crate::event::{EventType, SecurityEvent, Severity};
use crate::patterns;
use rand::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

/// One named unit of work: build and deliver one event of a fixed kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    UserLogin,
    FileDownload,
    FailedLogin,
    PortScan,
    Xss,
    SqlInjection,
    BruteForce,
    PrivilegeEscalation,
    DataExfiltration,
}

impl Action {
    /// Every action the simulator knows
    pub const ALL: &'static [Action] = &[
        Action::UserLogin,
        Action::FileDownload,
        Action::FailedLogin,
        Action::PortScan,
        Action::Xss,
        Action::SqlInjection,
        Action::BruteForce,
        Action::PrivilegeEscalation,
        Action::DataExfiltration,
    ];

    /// The fixed attack subset the continuous attack loop draws from.
    /// Excludes normal-traffic actions.
    pub const ATTACKS: &'static [Action] = &[
        Action::FailedLogin,
        Action::PortScan,
        Action::Xss,
        Action::SqlInjection,
        Action::BruteForce,
        Action::PrivilegeEscalation,
        Action::DataExfiltration,
    ];

    /// Resolve an action name from a scenario document.
    ///
    /// Accepts both the scenario-file spelling (`"sqlInjection"`) and the
    /// wire event-type spelling (`"sql_injection"`).
    pub fn parse(name: &str) -> Option<Action> {
        match name {
            "userLogin" | "user_login" => Some(Action::UserLogin),
            "fileDownload" | "file_download" => Some(Action::FileDownload),
            "failedLogin" | "failed_login" => Some(Action::FailedLogin),
            "portScan" | "port_scan" => Some(Action::PortScan),
            "xssAttack" | "xss" => Some(Action::Xss),
            "sqlInjection" | "sql_injection" => Some(Action::SqlInjection),
            "bruteForce" | "brute_force" => Some(Action::BruteForce),
            "privilegeEscalation" | "privilege_escalation" => {
                Some(Action::PrivilegeEscalation)
            }
            "dataExfiltration" | "data_exfiltration" => Some(Action::DataExfiltration),
            _ => None,
        }
    }

    /// Canonical scenario-file name of this action
    pub fn name(&self) -> &'static str {
        match self {
            Action::UserLogin => "userLogin",
            Action::FileDownload => "fileDownload",
            Action::FailedLogin => "failedLogin",
            Action::PortScan => "portScan",
            Action::Xss => "xssAttack",
            Action::SqlInjection => "sqlInjection",
            Action::BruteForce => "bruteForce",
            Action::PrivilegeEscalation => "privilegeEscalation",
            Action::DataExfiltration => "dataExfiltration",
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Action::UserLogin => EventType::UserLogin,
            Action::FileDownload => EventType::FileDownload,
            Action::FailedLogin => EventType::FailedLogin,
            Action::PortScan => EventType::PortScan,
            Action::Xss => EventType::Xss,
            Action::SqlInjection => EventType::SqlInjection,
            Action::BruteForce => EventType::BruteForce,
            Action::PrivilegeEscalation => EventType::PrivilegeEscalation,
            Action::DataExfiltration => EventType::DataExfiltration,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Action::UserLogin | Action::FileDownload => Severity::Low,
            Action::FailedLogin | Action::PortScan => Severity::Medium,
            Action::Xss | Action::SqlInjection | Action::BruteForce => Severity::High,
            Action::PrivilegeEscalation | Action::DataExfiltration => Severity::Critical,
        }
    }

    /// Build this action's event against one source identity.
    ///
    /// Pure construction - metadata and target system are fixed by the
    /// action's semantics, payloads are drawn uniformly from the catalog.
    pub fn build_event(&self, source_identity: &str) -> SecurityEvent {
        let mut rng = rand::rng();
        let mut metadata = HashMap::new();

        let target_system = match self {
            Action::UserLogin | Action::FailedLogin | Action::BruteForce => "auth-server",
            Action::FileDownload | Action::DataExfiltration => "file-server",
            Action::PortScan => "perimeter-firewall",
            Action::Xss => "web-portal",
            Action::SqlInjection => "customer-db",
            Action::PrivilegeEscalation => "app-host",
        };

        match self {
            Action::UserLogin => {
                metadata.insert(
                    "username".to_string(),
                    json!(patterns::random_username(&mut rng)),
                );
                metadata.insert(
                    "userAgent".to_string(),
                    json!(patterns::random_user_agent()),
                );
                metadata.insert("success".to_string(), json!(true));
            }
            Action::FileDownload => {
                metadata.insert("filename".to_string(), json!("customer-list.csv"));
                metadata.insert(
                    "sizeBytes".to_string(),
                    json!(rng.random_range(4_096..2_000_000)),
                );
                metadata.insert(
                    "userAgent".to_string(),
                    json!(patterns::random_user_agent()),
                );
            }
            Action::FailedLogin => {
                metadata.insert(
                    "username".to_string(),
                    json!(patterns::random_username(&mut rng)),
                );
                metadata.insert("reason".to_string(), json!("invalid_password"));
            }
            Action::PortScan => {
                metadata.insert(
                    "portsScanned".to_string(),
                    json!(rng.random_range(20..1024)),
                );
                metadata.insert("scanType".to_string(), json!("SYN"));
                metadata.insert(
                    "durationMs".to_string(),
                    json!(rng.random_range(500..30_000)),
                );
            }
            Action::Xss => {
                metadata.insert(
                    "payload".to_string(),
                    json!(*patterns::XSS_PAYLOADS.choose(&mut rng).unwrap()),
                );
                metadata.insert("url".to_string(), json!("/search"));
                metadata.insert("field".to_string(), json!("q"));
            }
            Action::SqlInjection => {
                metadata.insert(
                    "payload".to_string(),
                    json!(*patterns::SQL_PAYLOADS.choose(&mut rng).unwrap()),
                );
                metadata.insert("url".to_string(), json!("/api/v1/products"));
                metadata.insert("method".to_string(), json!("POST"));
                metadata.insert("blocked".to_string(), json!(rng.random_bool(0.6)));
            }
            Action::BruteForce => {
                metadata.insert(
                    "username".to_string(),
                    json!(patterns::random_username(&mut rng)),
                );
                metadata.insert("attempts".to_string(), json!(rng.random_range(10..60)));
            }
            Action::PrivilegeEscalation => {
                metadata.insert(
                    "username".to_string(),
                    json!(patterns::random_username(&mut rng)),
                );
                metadata.insert("targetAccount".to_string(), json!("root"));
                metadata.insert("method".to_string(), json!("sudo_misconfiguration"));
            }
            Action::DataExfiltration => {
                metadata.insert(
                    "bytesTransferred".to_string(),
                    json!(rng.random_range(50_000_000u64..2_000_000_000)),
                );
                metadata.insert(
                    "destinationIp".to_string(),
                    json!(patterns::random_external_ip()),
                );
                metadata.insert("protocol".to_string(), json!("https"));
            }
        }

        SecurityEvent::new(
            self.event_type(),
            source_identity,
            target_system,
            self.severity(),
            metadata,
        )
    }

    /// Build and deliver exactly one event through the sink.
    ///
    /// Delivery failure is logged and swallowed here so callers keep
    /// their timing; the event is dropped, never retried.
    pub async fn fire(&self, sink: &dyn EventSink, source_identity: &str) {
        let event = self.build_event(source_identity);
        if let Err(e) = sink.deliver(&event).await {
            warn!(action = self.name(), error = %e, "event delivery failed, dropping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_subset_excludes_normal_traffic() {
        assert!(!Action::ATTACKS.contains(&Action::UserLogin));
        assert!(!Action::ATTACKS.contains(&Action::FileDownload));
        for attack in Action::ATTACKS {
            assert!(Action::ALL.contains(attack));
        }
    }

    #[test]
    fn test_parse_accepts_both_spellings() {
        assert_eq!(Action::parse("sqlInjection"), Some(Action::SqlInjection));
        assert_eq!(Action::parse("sql_injection"), Some(Action::SqlInjection));
        assert_eq!(Action::parse("xssAttack"), Some(Action::Xss));
        assert_eq!(Action::parse("xss"), Some(Action::Xss));
        assert_eq!(Action::parse("fryTheMainframe"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_parse_round_trips_canonical_names() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.name()), Some(*action));
        }
    }

    #[test]
    fn test_sql_injection_contract() {
        let event = Action::SqlInjection.build_event("203.0.113.50");
        assert_eq!(event.event_type, EventType::SqlInjection);
        assert_eq!(event.severity, Severity::High);
        let payload = event.metadata["payload"].as_str().unwrap();
        assert!(!payload.is_empty());
        assert!(patterns::SQL_PAYLOADS.contains(&payload));
    }

    #[test]
    fn test_data_exfiltration_contract() {
        let event = Action::DataExfiltration.build_event("203.0.113.50");
        assert_eq!(event.severity, Severity::Critical);
        assert!(event.metadata["bytesTransferred"].as_u64().unwrap() >= 50_000_000);
        assert!(event.metadata.contains_key("destinationIp"));
    }

    #[test]
    fn test_every_action_builds_with_its_contract() {
        for action in Action::ALL {
            let event = action.build_event("198.51.100.9");
            assert_eq!(event.event_type, action.event_type());
            assert_eq!(event.severity, action.severity());
            assert_eq!(event.source_identity, "198.51.100.9");
            assert!(!event.metadata.is_empty());
        }
    }
}
