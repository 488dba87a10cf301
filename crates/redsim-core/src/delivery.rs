//! HTTP Event Delivery
//!
//! Ships constructed events to the external ingestion endpoint. Delivery
//! is fire-and-forget by design: a network error or non-2xx response is
//! a typed failure the caller logs and drops. No retries, no queueing -
//! scenario timing fidelity outranks delivery guarantees, and a dropped
//! synthetic event costs nothing.

use crate::event::SecurityEvent;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_INGEST_URL: &str = "http://127.0.0.1:3000/api/events";
pub const DEFAULT_PROBE_URL: &str = "http://127.0.0.1:3000/api/correlation/events";

/// Why a single event transmission failed
#[derive(Debug)]
pub enum DeliveryError {
    /// Connection-level failure (refused, timeout, DNS)
    Transport(reqwest::Error),
    /// Endpoint answered with a non-success status
    Status(StatusCode),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryError::Transport(e) => write!(f, "transport error: {}", e),
            DeliveryError::Status(code) => write!(f, "endpoint returned {}", code),
        }
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeliveryError::Transport(e) => Some(e),
            DeliveryError::Status(_) => None,
        }
    }
}

/// Anything that can receive one event at a time.
///
/// The generation code only ever talks to this trait, which keeps the
/// scenario runner, the continuous loops and the probe harness testable
/// without a network.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, event: &SecurityEvent) -> Result<(), DeliveryError>;
}

/// Endpoint configuration for the two ingestion surfaces
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Where generators post regular events
    pub ingest_url: String,
    /// Where the correlation probe harness posts its narratives
    pub probe_url: String,
    pub timeout_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            ingest_url: DEFAULT_INGEST_URL.to_string(),
            probe_url: DEFAULT_PROBE_URL.to_string(),
            timeout_ms: 5000,
        }
    }
}

impl DeliveryConfig {
    /// Defaults with `REDSIM_INGEST_URL` / `REDSIM_PROBE_URL` overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("REDSIM_INGEST_URL") {
            config.ingest_url = url;
        }
        if let Ok(url) = std::env::var("REDSIM_PROBE_URL") {
            config.probe_url = url;
        }
        config
    }
}

/// Fire-and-forget HTTP sink posting one JSON event per call
pub struct DeliveryClient {
    client: reqwest::Client,
    url: String,
}

impl DeliveryClient {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap();

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EventSink for DeliveryClient {
    async fn deliver(&self, event: &SecurityEvent) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(response.status()))
        }
    }
}
