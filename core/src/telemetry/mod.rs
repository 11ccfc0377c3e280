//! telemetry/mod.rs
//! Counters, stage timers and an immutable snapshot for one transcoder run.
//!
//! Notes:
//! - Counters are filled in as the pipeline advances and frozen into a
//!   `TelemetrySnapshot` at the end.
//! - Snapshots serialize to JSON for the verbose stderr report.

pub mod counters;
pub mod timers;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use snapshot::*;
