//! # redsim-core - Synthetic Security Event Core
//!
//! Building blocks for the redsim traffic generator:
//! - Typed `SecurityEvent` records with severity and per-kind metadata
//! - Static pattern catalog (payload pools, business templates, user agents)
//! - Closed `Action` dispatch: one action builds and ships exactly one event
//! - Fire-and-forget HTTP delivery to an external ingestion endpoint
//!
//! ## Key Design Principles
//!
//! 1. **No Consumption Logic** - This crate only produces events. Correlation
//!    and triage happen in the external SOC backend, not here.
//!
//! 2. **Closed Action Set** - Actions are an enum matched exhaustively at
//!    compile time. Unknown action *names* only exist at the parsing edge,
//!    where they are a recoverable `None`.
//!
//! 3. **Delivery Never Blocks Progress** - A failed POST is logged and
//!    dropped. Scenario timing is the contract; delivery is best-effort.

// Event model - single source of truth
pub mod event;

// Static payload / template catalog
pub mod patterns;

// Closed action set and per-action event construction
pub mod action;

// HTTP egress
pub mod delivery;

pub use action::Action;
pub use delivery::{DeliveryClient, DeliveryConfig, DeliveryError, EventSink};
pub use event::{EventType, SecurityEvent, Severity};
pub use patterns::BusinessTemplate;
