//! Filter parameters
//!
//! Mirrors the parameter dictionary the host passes alongside the event
//! table. An empty dictionary means "no subject, behavior or time filtering".

use crate::error::ComputeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Subject, behavior and time-interval selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "selected subjects")]
    pub selected_subjects: BTreeSet<String>,
    #[serde(rename = "selected behaviors")]
    pub selected_behaviors: BTreeSet<String>,
    /// Interval start in seconds; the key is required, its value may be null
    #[serde(rename = "start time", deserialize_with = "Option::deserialize")]
    pub start_time: Option<f64>,
    /// Interval end in seconds; the key is required, its value may be null
    #[serde(rename = "end time", deserialize_with = "Option::deserialize")]
    pub end_time: Option<f64>,
}

impl Parameters {
    /// Select subjects and behaviors without a time interval
    pub fn new<S, B>(subjects: S, behaviors: B) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        Self {
            selected_subjects: subjects.into_iter().map(Into::into).collect(),
            selected_behaviors: behaviors.into_iter().map(Into::into).collect(),
            start_time: None,
            end_time: None,
        }
    }

    /// Restrict to the interval `[start, end]` (seconds)
    pub fn with_window(mut self, start: f64, end: f64) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Time interval, present only when both bounds are set
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
            _ => None,
        }
    }

    /// Parse the host parameter dictionary.
    ///
    /// `null` and `{}` yield `None`. Any other object must carry all four keys.
    pub fn from_host_json(json: &str) -> Result<Option<Self>, ComputeError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.is_null() || value.as_object().is_some_and(|map| map.is_empty()) {
            return Ok(None);
        }
        if !value.is_object() {
            return Err(ComputeError::InvalidParameters(format!(
                "expected an object or null, got {value}"
            )));
        }
        Ok(Some(serde_json::from_value(value)?))
    }
}

/// Closed time interval in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `t` lies inside the window, bounds included
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Whether an event `[start, stop]` is kept by the window.
    ///
    /// Kept when its start or its stop falls inside, or when it spans the
    /// whole window.
    pub fn overlaps(&self, start: f64, stop: f64) -> bool {
        self.contains(start) || self.contains(stop) || (start < self.start && stop > self.end)
    }
}
