//! Time budget aggregation
//!
//! Groups events by (Subject, Behavior) and reduces each group to:
//! - number of occurrences
//! - total, mean and standard deviation of durations (hours)
//! - mean and standard deviation of inter-event intervals (hours)
//! - share of the subject's total duration (%)
//!
//! Inter-event intervals are the gaps between the stop of one occurrence and
//! the start of the next occurrence of the same behavior by the same subject
//! within one observation.

use crate::stats;
use crate::types::{EventRecord, EventTable, TimeBudgetRow, TimeBudgetTable};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, trace};

type GroupKey = (String, String);

/// Per (Subject, Behavior) accumulator
#[derive(Debug, Default)]
struct GroupAccumulator {
    occurrences: usize,
    /// Durations in seconds, NaN for point events
    durations: Vec<f64>,
    /// Defined inter-event intervals in seconds, across observations
    intervals: Vec<f64>,
}

/// Compute the time budget of every (Subject, Behavior) pair in `table`.
///
/// Rows come out ordered by subject, then behavior. An empty table yields an
/// empty result.
pub fn aggregate(table: &EventTable) -> TimeBudgetTable {
    let mut groups: BTreeMap<GroupKey, GroupAccumulator> = BTreeMap::new();

    for event in table {
        let group = groups.entry(group_key(event)).or_default();
        group.occurrences += 1;
        group.durations.push(event.duration);
    }

    for (key, interval) in inter_event_intervals(table) {
        if let Some(group) = groups.get_mut(&key) {
            group.intervals.push(interval);
        }
    }

    let mut subject_totals: BTreeMap<&str, f64> = BTreeMap::new();
    for ((subject, _), group) in &groups {
        *subject_totals.entry(subject.as_str()).or_default() += stats::sum(&group.durations);
    }

    let rows: Vec<TimeBudgetRow> = groups
        .iter()
        .map(|((subject, behavior), group)| {
            let subject_total = subject_totals
                .get(subject.as_str())
                .copied()
                .unwrap_or(f64::NAN);
            let row = reduce_group(subject, behavior, group, subject_total);
            trace!(
                subject = %row.subject,
                behavior = %row.behavior,
                occurrences = row.occurrences,
                total_duration_h = row.total_duration_h,
                "Reduced group"
            );
            row
        })
        .collect();

    debug!(
        "Aggregated {} events into {} subject/behavior rows",
        table.len(),
        rows.len()
    );

    TimeBudgetTable::new(rows)
}

fn group_key(event: &EventRecord) -> GroupKey {
    (event.subject.clone(), event.behavior.clone())
}

/// Reduce one group to its result row
fn reduce_group(
    subject: &str,
    behavior: &str,
    group: &GroupAccumulator,
    subject_total_sec: f64,
) -> TimeBudgetRow {
    let total_sec = stats::sum(&group.durations);

    TimeBudgetRow {
        subject: subject.to_string(),
        behavior: behavior.to_string(),
        occurrences: group.occurrences,
        total_duration_h: stats::round(stats::to_hours(total_sec)),
        duration_mean_h: stats::round(stats::to_hours(stats::mean(&group.durations))),
        duration_std_dev_h: stats::round(stats::to_hours(stats::sample_std_dev(&group.durations))),
        inter_event_mean_h: stats::round(stats::to_hours(stats::mean(&group.intervals))),
        inter_event_std_dev_h: stats::round(stats::to_hours(stats::sample_std_dev(
            &group.intervals,
        ))),
        percent_of_total: stats::round(percent_of(total_sec, subject_total_sec)),
    }
}

/// Share of `part` in `total` as a percentage; NaN when `total` is zero
fn percent_of(part: f64, total: f64) -> f64 {
    100.0 * part / total
}

/// Gaps between consecutive occurrences, keyed by (Subject, Behavior).
///
/// Events are ordered by (Observation id, Subject, Behavior, Start) with a
/// stable sort. Each event paired with the next one of the same observation,
/// subject and behavior yields `next.start - event.stop`. The last event of a
/// run yields nothing.
fn inter_event_intervals(table: &EventTable) -> Vec<(GroupKey, f64)> {
    let mut ordered: Vec<&EventRecord> = table.iter().collect();
    ordered.sort_by(|a, b| compare_for_intervals(a, b));

    ordered
        .windows(2)
        .filter(|pair| same_run(pair[0], pair[1]))
        .map(|pair| (group_key(pair[0]), pair[1].start - pair[0].stop))
        .collect()
}

fn compare_for_intervals(a: &EventRecord, b: &EventRecord) -> Ordering {
    a.observation_id
        .cmp(&b.observation_id)
        .then_with(|| a.subject.cmp(&b.subject))
        .then_with(|| a.behavior.cmp(&b.behavior))
        .then_with(|| a.start.total_cmp(&b.start))
}

fn same_run(a: &EventRecord, b: &EventRecord) -> bool {
    a.observation_id == b.observation_id && a.subject == b.subject && a.behavior == b.behavior
}
