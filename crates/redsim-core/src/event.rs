//! Security Event Model
//!
//! The `SecurityEvent` is the unit produced and transmitted by every
//! generator in this workspace. Events are self-contained and immutable
//! once constructed; a failed delivery drops the event, it is never
//! rebuilt or altered. Wire format is camelCase JSON because the SOC
//! backend consuming the ingestion endpoint expects the dashboard's
//! original field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Closed set of event kinds the simulator can emit
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    UserLogin,
    FailedLogin,
    FileDownload,
    FileUpload,
    ApiRequest,
    SqlInjection,
    Xss,
    PortScan,
    BruteForce,
    PrivilegeEscalation,
    DataExfiltration,
}

impl EventType {
    /// Wire name of the event kind (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::UserLogin => "user_login",
            EventType::FailedLogin => "failed_login",
            EventType::FileDownload => "file_download",
            EventType::FileUpload => "file_upload",
            EventType::ApiRequest => "api_request",
            EventType::SqlInjection => "sql_injection",
            EventType::Xss => "xss",
            EventType::PortScan => "port_scan",
            EventType::BruteForce => "brute_force",
            EventType::PrivilegeEscalation => "privilege_escalation",
            EventType::DataExfiltration => "data_exfiltration",
        }
    }
}

/// Triage priority for the downstream SOC. Ordinal: low < medium < high < critical.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// One simulated security occurrence, destined for the ingestion endpoint
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SecurityEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub source_identity: String,
    pub target_system: String,
    pub severity: Severity,
    /// Event-kind-specific attributes; schema is defined by the action
    /// or business template that produced the event.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SecurityEvent {
    /// Construct a fully populated event with a fresh id and timestamp.
    ///
    /// Pure aside from clock/uuid reads - no I/O, no error conditions.
    /// Metadata validity is the caller's responsibility.
    pub fn new(
        event_type: EventType,
        source_identity: impl Into<String>,
        target_system: impl Into<String>,
        severity: Severity,
        metadata: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            event_type,
            source_identity: source_identity.into(),
            target_system: target_system.into(),
            severity,
            metadata,
        }
    }
}
