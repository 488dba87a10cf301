//! Scenario Model & Runner
//!
//! A scenario is a named, ordered attack narrative: each step names an
//! action, a repetition count, and a pause applied after every firing.
//! One freshly chosen attacker identity is used for the whole run, so
//! every event the scenario emits correlates on `sourceIdentity`.

use redsim_core::{Action, EventSink, patterns};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// One step of a scenario document
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioStep {
    pub action: String,
    pub count: u32,
    #[serde(default)]
    pub delay_ms: u64,
}

/// A named, ordered sequence of steps
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<ScenarioStep>,
}

/// Outcome of one scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    /// Events dispatched (sum of `count` over recognized steps)
    pub delivered: u64,
    /// Steps skipped because their action name resolved to nothing
    pub skipped_steps: u64,
    /// The attacker identity shared by every event of the run
    pub source_identity: String,
}

/// Execute every step of the scenario in order against one fresh
/// attacker identity.
///
/// Within a step the action fires `count` times sequentially, pausing
/// `delayMs` after each firing - the trailing pause of the final step
/// included, so completion lands only after the full narrative window.
/// A step naming an unknown action is reported and skipped; the run
/// continues with the next step.
pub async fn run_scenario(sink: &dyn EventSink, scenario: &Scenario) -> ScenarioReport {
    let source_identity = patterns::random_external_ip();
    info!(
        scenario = %scenario.name,
        source = %source_identity,
        steps = scenario.steps.len(),
        "scenario started"
    );

    let mut delivered = 0u64;
    let mut skipped_steps = 0u64;

    for step in &scenario.steps {
        let Some(action) = Action::parse(&step.action) else {
            warn!(action = %step.action, "unknown action in scenario step, skipping");
            skipped_steps += 1;
            continue;
        };

        for _ in 0..step.count {
            action.fire(sink, &source_identity).await;
            delivered += 1;
            if step.delay_ms > 0 {
                sleep(Duration::from_millis(step.delay_ms)).await;
            }
        }
    }

    info!(
        scenario = %scenario.name,
        delivered,
        skipped_steps,
        "scenario complete"
    );

    ScenarioReport {
        delivered,
        skipped_steps,
        source_identity,
    }
}
