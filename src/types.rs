//! Event and result table types
//!
//! Both tables serialize as arrays of row objects keyed by the exact column
//! names the host uses, so they can be exchanged with it as JSON records.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of one recorded observation session.
///
/// Hosts use either integers or free text. Integers sort before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservationId {
    Integer(i64),
    Text(String),
}

impl fmt::Display for ObservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationId::Integer(id) => write!(f, "{id}"),
            ObservationId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ObservationId {
    fn from(id: i64) -> Self {
        ObservationId::Integer(id)
    }
}

impl From<&str> for ObservationId {
    fn from(id: &str) -> Self {
        ObservationId::Text(id.to_string())
    }
}

impl From<String> for ObservationId {
    fn from(id: String) -> Self {
        ObservationId::Text(id)
    }
}

/// One coded behavioral event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "Observation id")]
    pub observation_id: ObservationId,
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Behavior")]
    pub behavior: String,
    /// Event start in seconds
    #[serde(rename = "Start (s)")]
    pub start: f64,
    /// Event stop in seconds
    #[serde(rename = "Stop (s)")]
    pub stop: f64,
    /// Duration in seconds; NaN (`null`) for point events
    #[serde(rename = "Duration (s)", deserialize_with = "nan_if_null")]
    pub duration: f64,
}

impl EventRecord {
    /// Create a state event whose duration is `stop - start`
    pub fn new(
        observation_id: impl Into<ObservationId>,
        subject: impl Into<String>,
        behavior: impl Into<String>,
        start: f64,
        stop: f64,
    ) -> Self {
        Self {
            observation_id: observation_id.into(),
            subject: subject.into(),
            behavior: behavior.into(),
            start,
            stop,
            duration: stop - start,
        }
    }

    /// Override the stored duration (e.g. NaN for point events)
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }
}

/// Event table, in host row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTable {
    rows: Vec<EventRecord>,
}

impl EventTable {
    pub fn new(rows: Vec<EventRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[EventRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.rows.iter()
    }
}

impl FromIterator<EventRecord> for EventTable {
    fn from_iter<I: IntoIterator<Item = EventRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EventTable {
    type Item = EventRecord;
    type IntoIter = std::vec::IntoIter<EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Time budget of one (Subject, Behavior) pair
///
/// Durations and intervals are in hours, rounded to 3 decimals. Undefined
/// values are NaN and serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBudgetRow {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Behavior")]
    pub behavior: String,
    #[serde(rename = "Number of occurences")]
    pub occurrences: usize,
    #[serde(rename = "Total duration (h)", deserialize_with = "nan_if_null")]
    pub total_duration_h: f64,
    #[serde(rename = "Duration mean (h)", deserialize_with = "nan_if_null")]
    pub duration_mean_h: f64,
    #[serde(rename = "duration std dev", deserialize_with = "nan_if_null")]
    pub duration_std_dev_h: f64,
    #[serde(rename = "inter-event intervals mean", deserialize_with = "nan_if_null")]
    pub inter_event_mean_h: f64,
    #[serde(rename = "inter-event intervals std dev", deserialize_with = "nan_if_null")]
    pub inter_event_std_dev_h: f64,
    #[serde(rename = "% of total duration", deserialize_with = "nan_if_null")]
    pub percent_of_total: f64,
}

/// Result table, one row per (Subject, Behavior) ordered by subject then behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeBudgetTable {
    rows: Vec<TimeBudgetRow>,
}

impl TimeBudgetTable {
    pub fn new(rows: Vec<TimeBudgetRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TimeBudgetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up the row of one (Subject, Behavior) pair
    pub fn get(&self, subject: &str, behavior: &str) -> Option<&TimeBudgetRow> {
        self.rows
            .iter()
            .find(|row| row.subject == subject && row.behavior == behavior)
    }

    /// Rows belonging to one subject
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a TimeBudgetRow> {
        self.rows.iter().filter(move |row| row.subject == subject)
    }
}

impl IntoIterator for TimeBudgetTable {
    type Item = TimeBudgetRow;
    type IntoIter = std::vec::IntoIter<TimeBudgetRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Accept `null` for a float column and read it as NaN
fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
