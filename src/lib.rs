//! Time budget (hours) - summary statistics over behavioral observation events
//!
//! Turns a table of coded behavioral events into a per (Subject, Behavior)
//! time budget through a two-stage pipeline: filtering (observations,
//! subjects, behaviors, time interval with boundary clipping) → aggregation
//! (occurrences, durations, inter-event intervals, share of time).
//!
//! ## Entry points
//!
//! - [`aggregate()`]: time budget of a whole table
//! - [`compute`]: filter, then aggregate
//! - [`compute_json`] / [`aggregate_json`]: the same over JSON row records
//!   keyed by the host's column names

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod params;
pub mod pipeline;
pub mod stats;
pub mod types;

pub use aggregate::aggregate;
pub use error::ComputeError;
pub use params::{Parameters, TimeWindow};
pub use pipeline::{aggregate_json, compute, compute_json, TimeBudget};
pub use stats::SECONDS_PER_HOUR;
pub use types::{EventRecord, EventTable, ObservationId, TimeBudgetRow, TimeBudgetTable};

/// Name under which the host lists this analysis
pub const PLUGIN_NAME: &str = "Time budget (hours)";

/// Analysis version
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release date of [`PLUGIN_VERSION`]
pub const PLUGIN_VERSION_DATE: &str = "2024-11-14";
