//! # redsim-gen - Scenario Orchestration & Traffic Generation
//!
//! Drives the event core from three directions:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        redsim CLI                            │
//! │                                                              │
//! │   ┌───────────────┐  ┌─────────────────┐  ┌──────────────┐   │
//! │   │ Scenario      │  │ Continuous      │  │ Correlation  │   │
//! │   │ Loader+Runner │  │ Mixed Traffic   │  │ Probe        │   │
//! │   │ (timed steps) │  │ (two loops)     │  │ (narratives) │   │
//! │   └───────┬───────┘  └────────┬────────┘  └──────┬───────┘   │
//! │           └───────────────────┼──────────────────┘           │
//! │                               ▼                              │
//! │                    Action / BusinessTemplate                 │
//! │                               ▼                              │
//! │                    EventSink (HTTP POST)                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **scenario**: ordered `{action, count, delayMs}` steps against one
//!   attacker identity, strictly sequential in relative time
//! - **loader**: resolves named scenarios from JSON files; a missing
//!   name is a normal condition, not an error
//! - **continuous**: two independent periodic loops (steady business
//!   traffic + intermittent random attacks) with atomic cancellation
//! - **probe**: hand-authored multi-event narratives that exercise the
//!   external correlation engine

pub mod continuous;
pub mod loader;
pub mod probe;
pub mod scenario;

pub use continuous::{GeneratorConfig, GeneratorHandle, GeneratorReport, MixedTrafficGenerator};
pub use loader::{LoaderError, list_scenarios, load_scenario};
pub use probe::ProbeScenario;
pub use scenario::{Scenario, ScenarioReport, ScenarioStep, run_scenario};
