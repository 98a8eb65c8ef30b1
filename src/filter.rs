//! Event table filtering
//!
//! Restricts the event table to the selected observations, subjects,
//! behaviors and time interval. Every step returns a new table; records
//! surviving the time interval are rebuilt with clipped boundaries.

use crate::params::{Parameters, TimeWindow};
use crate::types::{EventRecord, EventTable, ObservationId};
use std::collections::HashSet;
use tracing::debug;

/// Run all filtering steps.
///
/// An empty `observations` slice keeps every observation. Without
/// `parameters` no subject, behavior or time filtering happens.
pub fn apply(
    table: &EventTable,
    observations: &[ObservationId],
    parameters: Option<&Parameters>,
) -> EventTable {
    let mut filtered = if observations.is_empty() {
        table.clone()
    } else {
        select_observations(table, observations)
    };

    if let Some(params) = parameters {
        filtered = select_subjects_and_behaviors(&filtered, params);

        if let Some(window) = params.window() {
            filtered = clip_to_window(&filtered, window);
        }
    }

    filtered
}

/// Keep rows whose observation is one of `observations`
pub fn select_observations(table: &EventTable, observations: &[ObservationId]) -> EventTable {
    let wanted: HashSet<&ObservationId> = observations.iter().collect();
    let filtered: EventTable = table
        .iter()
        .filter(|event| wanted.contains(&event.observation_id))
        .cloned()
        .collect();

    debug!(
        "Observation filter kept {} of {} events ({} observations selected)",
        filtered.len(),
        table.len(),
        wanted.len()
    );
    filtered
}

/// Keep rows whose subject and behavior are both selected
pub fn select_subjects_and_behaviors(table: &EventTable, params: &Parameters) -> EventTable {
    let filtered: EventTable = table
        .iter()
        .filter(|event| {
            params.selected_subjects.contains(&event.subject)
                && params.selected_behaviors.contains(&event.behavior)
        })
        .cloned()
        .collect();

    debug!(
        "Subject/behavior filter kept {} of {} events",
        filtered.len(),
        table.len()
    );
    filtered
}

/// Keep rows overlapping `window` and clip them to it.
///
/// Durations of all kept rows are recomputed from the clipped boundaries.
pub fn clip_to_window(table: &EventTable, window: TimeWindow) -> EventTable {
    let filtered: EventTable = table
        .iter()
        .filter(|event| window.overlaps(event.start, event.stop))
        .map(|event| clip_event(event, window))
        .collect();

    debug!(
        "Time window [{}, {}] kept {} of {} events",
        window.start,
        window.end,
        filtered.len(),
        table.len()
    );
    filtered
}

fn clip_event(event: &EventRecord, window: TimeWindow) -> EventRecord {
    let start = if event.start < window.start {
        window.start
    } else {
        event.start
    };
    let stop = if event.stop > window.end {
        window.end
    } else {
        event.stop
    };

    EventRecord {
        observation_id: event.observation_id.clone(),
        subject: event.subject.clone(),
        behavior: event.behavior.clone(),
        start,
        stop,
        duration: stop - start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_test_table() -> EventTable {
        EventTable::new(vec![
            EventRecord::new("obs1", "A", "walk", 0.0, 10.0),
            EventRecord::new("obs1", "A", "rest", 10.0, 30.0),
            EventRecord::new("obs1", "B", "walk", 5.0, 15.0),
            EventRecord::new("obs2", "A", "walk", 2.0, 20.0),
            EventRecord::new("obs2", "B", "groom", 40.0, 50.0),
        ])
    }

    #[test]
    fn test_no_filtering() {
        let table = make_test_table();
        assert_eq!(apply(&table, &[], None), table);
    }

    #[test]
    fn test_select_observations() {
        let table = make_test_table();
        let filtered = apply(&table, &[ObservationId::from("obs2")], None);

        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .all(|e| e.observation_id == ObservationId::from("obs2")));
    }

    #[test]
    fn test_unknown_observation_yields_empty_table() {
        let table = make_test_table();
        let filtered = apply(&table, &[ObservationId::from("obs9")], None);
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_select_subjects_and_behaviors() {
        let table = make_test_table();
        let params = Parameters::new(["A"], ["walk", "groom"]);
        let filtered = apply(&table, &[], Some(&params));

        let kept: Vec<(&str, &str)> = filtered
            .iter()
            .map(|e| (e.subject.as_str(), e.behavior.as_str()))
            .collect();
        assert_eq!(kept, vec![("A", "walk"), ("A", "walk")]);
    }

    #[test]
    fn test_observation_and_parameter_filters_combine() {
        let table = make_test_table();
        let params = Parameters::new(["A", "B"], ["walk"]);
        let filtered = apply(&table, &[ObservationId::from("obs1")], Some(&params));

        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.behavior == "walk"));
    }

    #[test]
    fn test_clip_partial_overlap() {
        let table = EventTable::new(vec![EventRecord::new("obs1", "A", "walk", 5.0, 15.0)]);
        let filtered = clip_to_window(&table, TimeWindow::new(8.0, 12.0));

        assert_eq!(filtered.rows(), &[EventRecord::new("obs1", "A", "walk", 8.0, 12.0)]);
        assert_eq!(filtered.rows()[0].duration, 4.0);
    }

    #[test]
    fn test_clip_event_spanning_window() {
        let table = make_test_table();
        let params = Parameters::new(["A"], ["walk"]).with_window(5.0, 10.0);
        let filtered = apply(&table, &[ObservationId::from("obs2")], Some(&params));

        assert_eq!(filtered.rows(), &[EventRecord::new("obs2", "A", "walk", 5.0, 10.0)]);
    }

    #[test]
    fn test_window_drops_events_outside() {
        let table = make_test_table();
        let filtered = clip_to_window(&table, TimeWindow::new(35.0, 45.0));

        assert_eq!(filtered.rows(), &[EventRecord::new("obs2", "B", "groom", 40.0, 45.0)]);
    }

    #[test]
    fn test_window_recomputes_every_duration() {
        // stored duration disagrees with the boundaries and the event is not clipped
        let stale = EventRecord::new("obs1", "A", "walk", 9.0, 11.0).with_duration(99.0);
        let filtered = clip_to_window(&EventTable::new(vec![stale]), TimeWindow::new(8.0, 12.0));

        assert_eq!(filtered.rows()[0].duration, 2.0);
    }

    #[test]
    fn test_half_open_window_is_ignored() {
        let table = make_test_table();
        let mut params = Parameters::new(["A", "B"], ["walk", "rest", "groom"]);
        params.start_time = Some(100.0);

        assert_eq!(apply(&table, &[], Some(&params)), table);
    }

    #[test]
    fn test_source_table_untouched() {
        let table = make_test_table();
        let before = table.clone();
        let params = Parameters::new(["A", "B"], ["walk"]).with_window(6.0, 8.0);
        let _ = apply(&table, &[], Some(&params));

        assert_eq!(table, before);
    }
}
