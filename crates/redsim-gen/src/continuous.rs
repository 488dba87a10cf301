//! Continuous Mixed-Traffic Generator
//!
//! Two independent periodic loops running until cancelled:
//! - the **normal loop** emits one business-activity event per tick
//! - the **attack loop** emits one randomly picked attack per tick
//!
//! Each tick uses a freshly chosen synthetic identity, and each counter
//! is incremented by exactly one loop, so the loops share nothing but
//! the run state they both read. Cancellation is checked before a tick
//! is taken: once a stop is acknowledged no partial tick is emitted.

use redsim_core::{Action, EventSink, patterns};
use rand::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periods for the two loops
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    pub normal_period: Duration,
    pub attack_period: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            normal_period: Duration::from_millis(400),
            attack_period: Duration::from_millis(6000),
        }
    }
}

/// Final counters of one continuous run
#[derive(Debug, Clone, Copy)]
pub struct GeneratorReport {
    pub normal_events: u64,
    pub attack_events: u64,
    pub elapsed: Duration,
}

/// Shared run state - the single owned value both loops read.
/// `cancel` doubles as the running flag; each counter has exactly one
/// writer loop.
struct GeneratorRunState {
    config: GeneratorConfig,
    normal_count: AtomicU64,
    attack_count: AtomicU64,
    started_at: Instant,
    cancel: CancellationToken,
}

/// Handle to a running generator; stopping it yields the final report
pub struct GeneratorHandle {
    state: Arc<GeneratorRunState>,
    normal_task: JoinHandle<()>,
    attack_task: JoinHandle<()>,
}

impl GeneratorHandle {
    /// Running counters as of now: (normal, attack)
    pub fn counters(&self) -> (u64, u64) {
        (
            self.state.normal_count.load(Ordering::Relaxed),
            self.state.attack_count.load(Ordering::Relaxed),
        )
    }

    /// Cancel both loops atomically, wait for them to wind down, and
    /// report the final counters.
    pub async fn stop(self) -> GeneratorReport {
        self.state.cancel.cancel();
        let _ = self.normal_task.await;
        let _ = self.attack_task.await;

        let report = GeneratorReport {
            normal_events: self.state.normal_count.load(Ordering::Relaxed),
            attack_events: self.state.attack_count.load(Ordering::Relaxed),
            elapsed: self.state.started_at.elapsed(),
        };
        info!(
            normal = report.normal_events,
            attack = report.attack_events,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "continuous generator stopped"
        );
        report
    }
}

pub struct MixedTrafficGenerator;

impl MixedTrafficGenerator {
    /// Launch the two loops and hand back their lifecycle handle
    pub fn start(sink: Arc<dyn EventSink>, config: GeneratorConfig) -> GeneratorHandle {
        let state = Arc::new(GeneratorRunState {
            config,
            normal_count: AtomicU64::new(0),
            attack_count: AtomicU64::new(0),
            started_at: Instant::now(),
            cancel: CancellationToken::new(),
        });

        info!(
            normal_period_ms = config.normal_period.as_millis() as u64,
            attack_period_ms = config.attack_period.as_millis() as u64,
            "continuous generator started"
        );

        let normal_task = tokio::spawn(normal_loop(sink.clone(), state.clone()));
        let attack_task = tokio::spawn(attack_loop(sink, state.clone()));

        GeneratorHandle {
            state,
            normal_task,
            attack_task,
        }
    }
}

async fn normal_loop(sink: Arc<dyn EventSink>, state: Arc<GeneratorRunState>) {
    let period = state.config.normal_period;
    let mut interval = time::interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            biased;
            _ = state.cancel.cancelled() => break,
            _ = interval.tick() => {
                let template = patterns::pick_business_template();
                let event = template.build(&patterns::random_ip());
                debug!(kind = event.event_type.as_str(), "normal tick");
                if let Err(e) = sink.deliver(&event).await {
                    warn!(error = %e, "normal event delivery failed, dropping");
                }
                state.normal_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

async fn attack_loop(sink: Arc<dyn EventSink>, state: Arc<GeneratorRunState>) {
    let period = state.config.attack_period;
    let mut interval = time::interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            biased;
            _ = state.cancel.cancelled() => break,
            _ = interval.tick() => {
                let action = *Action::ATTACKS.choose(&mut rand::rng()).unwrap();
                debug!(action = action.name(), "attack tick");
                action.fire(sink.as_ref(), &patterns::random_external_ip()).await;
                state.attack_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
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

    fn config(normal_ms: u64, attack_ms: u64) -> GeneratorConfig {
        GeneratorConfig {
            normal_period: Duration::from_millis(normal_ms),
            attack_period: Duration::from_millis(attack_ms),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_counts_track_the_periods() {
        let sink = Arc::new(CollectingSink::new());
        let handle = MixedTrafficGenerator::start(sink.clone(), config(100, 1000));

        time::sleep(Duration::from_millis(1050)).await;
        let report = handle.stop().await;

        // 1050ms at 100ms/1000ms periods: 10 normal, 1 attack (+-1 tick)
        assert!((9..=11).contains(&report.normal_events), "normal = {}", report.normal_events);
        assert!(report.attack_events <= 2, "attack = {}", report.attack_events);
        assert_eq!(
            sink.events.lock().unwrap().len() as u64,
            report.normal_events + report.attack_events
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_counters_are_monotonic_while_running() {
        let sink = Arc::new(CollectingSink::new());
        let handle = MixedTrafficGenerator::start(sink, config(50, 200));

        let mut last_total = 0u64;
        for _ in 0..5 {
            time::sleep(Duration::from_millis(200)).await;
            let (normal, attack) = handle.counters();
            assert!(normal + attack >= last_total);
            last_total = normal + attack;
        }
        assert!(last_total > 0);
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_after_stop() {
        let sink = Arc::new(CollectingSink::new());
        let handle = MixedTrafficGenerator::start(sink.clone(), config(20, 50));

        time::sleep(Duration::from_millis(200)).await;
        let report = handle.stop().await;
        let settled = sink.events.lock().unwrap().len() as u64;
        assert_eq!(settled, report.normal_events + report.attack_events);

        // Nothing trickles in after the stop has been acknowledged
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(sink.events.lock().unwrap().len() as u64, settled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attack_loop_only_emits_attack_events() {
        let sink = Arc::new(CollectingSink::new());
        // Normal period far beyond the window: only the attack loop ticks
        let handle = MixedTrafficGenerator::start(sink.clone(), config(60_000, 100));

        time::sleep(Duration::from_millis(550)).await;
        let report = handle.stop().await;

        assert_eq!(report.normal_events, 0);
        assert!(report.attack_events >= 4);
        let events = sink.events.lock().unwrap();
        assert!(events.iter().all(|e| e.severity >= Severity::Medium));
    }
}
