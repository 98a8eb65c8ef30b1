//! Time budget pipeline
//!
//! Public entry points: filter the event table, then aggregate it. The JSON
//! variants accept and return tables as arrays of row objects keyed by the
//! host's column names.

use crate::aggregate::aggregate;
use crate::error::ComputeError;
use crate::filter;
use crate::params::Parameters;
use crate::types::{EventTable, ObservationId, TimeBudgetTable};
use tracing::debug;

/// Filter `table` by observations and parameters, then aggregate it.
///
/// # Arguments
/// * `table` - Event table
/// * `observations` - Observations to keep; empty keeps all
/// * `parameters` - Subject, behavior and time selection; `None` keeps all
///
/// # Example
/// ```ignore
/// let params = Parameters::new(["Rat 1"], ["grooming"]).with_window(0.0, 600.0);
/// let budget = compute(&table, &[], Some(&params));
/// ```
pub fn compute(
    table: &EventTable,
    observations: &[ObservationId],
    parameters: Option<&Parameters>,
) -> TimeBudgetTable {
    debug!(
        "Computing time budget over {} events ({} observations selected, parameters: {})",
        table.len(),
        observations.len(),
        parameters.is_some()
    );

    // Stage 1: Filter
    let filtered = filter::apply(table, observations, parameters);

    // Stage 2: Aggregate
    aggregate(&filtered)
}

/// Aggregate an event table given as JSON, without filtering
pub fn aggregate_json(table_json: &str) -> Result<String, ComputeError> {
    let table: EventTable = serde_json::from_str(table_json)?;
    serde_json::to_string(&aggregate(&table)).map_err(ComputeError::JsonError)
}

/// Filter and aggregate an event table given as JSON.
///
/// # Arguments
/// * `table_json` - Array of event rows
/// * `observations_json` - Array of observation ids; `[]` keeps all
/// * `parameters_json` - Parameter dictionary; `{}` or `null` means none
///
/// # Returns
/// Array of result rows
pub fn compute_json(
    table_json: &str,
    observations_json: &str,
    parameters_json: &str,
) -> Result<String, ComputeError> {
    let table: EventTable = serde_json::from_str(table_json)?;
    let observations: Vec<ObservationId> = serde_json::from_str(observations_json)?;
    let parameters = Parameters::from_host_json(parameters_json)?;

    let budget = compute(&table, &observations, parameters.as_ref());
    serde_json::to_string(&budget).map_err(ComputeError::JsonError)
}

/// Reusable time budget request.
///
/// Use this when the selection is assembled step by step and applied to
/// several tables.
#[derive(Debug, Clone, Default)]
pub struct TimeBudget {
    observations: Vec<ObservationId>,
    parameters: Option<Parameters>,
}

impl TimeBudget {
    /// Request without any filtering
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only these observations
    pub fn with_observations<I>(mut self, observations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ObservationId>,
    {
        self.observations = observations.into_iter().map(Into::into).collect();
        self
    }

    /// Apply subject, behavior and time selection
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn observations(&self) -> &[ObservationId] {
        &self.observations
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    /// Run the request against `table`
    pub fn run(&self, table: &EventTable) -> TimeBudgetTable {
        compute(table, &self.observations, self.parameters.as_ref())
    }
}
