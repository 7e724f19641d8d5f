use super::{
    error::TrioError,
    joint_table::JointTable,
    segment::{Segment, Segments},
    state::{State, StateCall},
};
use itertools::Itertools;
use rayon::prelude::*;
use std::collections::BTreeSet;

/// End assigned to probe events so that they never bound a real segment.
const PROBE_END: u64 = u64::MAX;

/// Sweep event of a single trio. The derived ordering compares
/// `(start, end, state)`, so at a shared start a real segment (finite end)
/// is visited before the probe placed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Event {
    start: u64,
    end: u64,
    state: Option<State>,
}

impl Event {
    fn probe(start: u64) -> Self {
        Event {
            start,
            end: PROBE_END,
            state: None,
        }
    }
}

impl From<&Segment> for Event {
    fn from(segment: &Segment) -> Self {
        Event {
            start: segment.start,
            end: segment.end,
            state: Some(segment.state),
        }
    }
}

/// Sorted union of all segment starts and ends across trios.
pub fn collect_breakpoints(trios: &[(String, Segments)]) -> Vec<u64> {
    let breakpoints: BTreeSet<u64> = trios
        .iter()
        .flat_map(|(_, segments)| segments.iter().flat_map(|s| [s.start, s.end]))
        .collect();
    breakpoints.into_iter().collect()
}

/// Elementary intervals `[b_i, b_i+1)` induced by the breakpoints. The last
/// breakpoint only closes the final interval.
pub fn elementary_intervals(breakpoints: &[u64]) -> Vec<(u64, u64)> {
    breakpoints.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Merges the segment tables of several trios into one joint table.
///
/// Segments of each trio must be sorted by start and must not overlap. Sorting
/// and non-empty spans are checked up front; overlaps are not detected.
pub fn merge_trios(trios: &[(String, Segments)]) -> Result<JointTable, TrioError> {
    for (trio, segments) in trios {
        check_segments(trio, segments)?;
    }

    let names: Vec<String> = trios.iter().map(|(trio, _)| trio.clone()).collect();
    let breakpoints = collect_breakpoints(trios);
    if breakpoints.is_empty() {
        log::warn!(
            "No segments found across {} trio(s), producing an empty table",
            trios.len()
        );
        return Ok(JointTable::empty(names));
    }

    let intervals = elementary_intervals(&breakpoints);
    let starts = &breakpoints[..breakpoints.len() - 1];
    log::debug!(
        "{} breakpoints define {} elementary intervals",
        breakpoints.len(),
        intervals.len()
    );

    let columns: Vec<Vec<StateCall>> = trios
        .par_iter()
        .map(|(_, segments)| resolve_trio(starts, segments))
        .collect();

    Ok(JointTable {
        intervals,
        trios: names,
        columns,
    })
}

/// Resolves one trio's call at every elementary start by sweeping its segments
/// merged with a probe at each start.
fn resolve_trio(starts: &[u64], segments: &[Segment]) -> Vec<StateCall> {
    let probes = starts.iter().map(|&start| Event::probe(start));
    let events = segments.iter().map(Event::from).merge(probes);

    let mut calls = Vec::with_capacity(starts.len());
    let mut last_true: Option<Event> = None;
    let mut prev_start: Option<u64> = None;

    for event in events {
        // Only the first event at a given start contributes
        if prev_start == Some(event.start) {
            continue;
        }
        prev_start = Some(event.start);

        let call = match event.state {
            Some(state) => {
                last_true = Some(event);
                StateCall::Known(state)
            }
            None => match last_true {
                Some(Event {
                    start,
                    end,
                    state: Some(state),
                }) if start <= event.start && event.start < end => StateCall::Known(state),
                _ => StateCall::Undefined,
            },
        };
        calls.push(call);
    }

    debug_assert_eq!(calls.len(), starts.len());
    calls
}

fn check_segments(trio: &str, segments: &[Segment]) -> Result<(), TrioError> {
    for (row, segment) in segments.iter().enumerate() {
        if segment.start >= segment.end {
            return Err(TrioError::malformed(
                trio,
                row,
                format!("empty segment [{}, {})", segment.start, segment.end),
            ));
        }
        if row > 0 && segment.start < segments[row - 1].start {
            return Err(TrioError::malformed(
                trio,
                row,
                format!(
                    "segment start {} precedes previous start {}",
                    segment.start,
                    segments[row - 1].start
                ),
            ));
        }
    }
    Ok(())
}
