use super::{
    error::TrioError,
    segment::{PositionRow, Segment, Segments},
    state::State,
};

/// Collapses per-position state scores of one trio into maximal segments.
///
/// Rows must be sorted by strictly ascending coordinate and must already exclude
/// positions that are undefined in the reference. A segment ends wherever the
/// argmax state changes or the reference coordinate jumps by more than one.
pub fn extract_segments(trio: &str, rows: &[PositionRow]) -> Result<Segments, TrioError> {
    let mut segments = Segments::new();
    let mut current: Option<Segment> = None;
    let mut prev_coordinate: Option<u64> = None;

    for (row_index, row) in rows.iter().enumerate() {
        if let Some(prev) = prev_coordinate {
            if row.coordinate <= prev {
                return Err(TrioError::malformed(
                    trio,
                    row_index,
                    format!(
                        "coordinate {} does not follow previous coordinate {}",
                        row.coordinate, prev
                    ),
                ));
            }
        }
        prev_coordinate = Some(row.coordinate);

        let state = State::argmax(&row.scores)
            .ok_or_else(|| TrioError::malformed(trio, row_index, "NaN state score"))?;

        if let Some(segment) = current.as_mut() {
            if segment.state == state && segment.end == row.coordinate {
                segment.end = row.coordinate + 1;
                continue;
            }
        }
        let next = Segment::new(trio, state, row.coordinate, row.coordinate + 1);
        if let Some(done) = current.replace(next) {
            segments.push(done);
        }
    }

    if let Some(done) = current {
        segments.push(done);
    }

    log::debug!(
        "Trio {}: {} positions collapsed into {} segments",
        trio,
        rows.len(),
        segments.len()
    );
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn row(coordinate: u64, state: usize) -> PositionRow {
        let mut scores = [0.1; 4];
        scores[state] = 0.7;
        PositionRow::new(coordinate, scores)
    }

    fn spans(segments: &[Segment]) -> Vec<(State, u64, u64)> {
        segments.iter().map(|s| (s.state, s.start, s.end)).collect()
    }

    #[test]
    fn empty_input_yields_no_segments() {
        assert_eq!(extract_segments("a_b_c_d", &[]).unwrap(), vec![]);
    }

    #[test]
    fn single_row_segment() {
        let segments = extract_segments("a_b_c_d", &[row(41, 2)]).unwrap();
        assert_eq!(spans(&segments), vec![(State::V2, 41, 42)]);
        assert_eq!(segments[0].trio, "a_b_c_d");
    }

    #[test]
    fn state_changes_split_segments() {
        let rows = vec![row(10, 0), row(11, 0), row(12, 1), row(13, 1), row(14, 0)];
        let segments = extract_segments("t", &rows).unwrap();
        assert_eq!(
            spans(&segments),
            vec![(State::V0, 10, 12), (State::V1, 12, 14), (State::V0, 14, 15)]
        );
    }

    #[test]
    fn coordinate_gap_splits_constant_state() {
        let rows = vec![row(1, 3), row(2, 3), row(5, 3), row(6, 3)];
        let segments = extract_segments("t", &rows).unwrap();
        assert_eq!(spans(&segments), vec![(State::V3, 1, 3), (State::V3, 5, 7)]);
    }

    #[test]
    fn unsorted_coordinates_are_rejected() {
        let rows = vec![row(1, 0), row(3, 0), row(2, 0)];
        assert_eq!(
            extract_segments("t", &rows),
            Err(TrioError::malformed(
                "t",
                2,
                "coordinate 2 does not follow previous coordinate 3"
            ))
        );
    }

    #[test]
    fn duplicate_coordinates_are_rejected() {
        let rows = vec![row(1, 0), row(1, 1)];
        assert!(extract_segments("t", &rows).is_err());
    }

    #[test]
    fn nan_scores_are_rejected() {
        let rows = vec![row(1, 0), PositionRow::new(2, [f64::NAN, 0.0, 0.0, 0.0])];
        assert!(matches!(
            extract_segments("t", &rows),
            Err(TrioError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn segments_cover_input_exactly_and_are_maximal() {
        let coordinates = [3, 4, 5, 6, 9, 10, 11, 20, 21, 22, 23, 24, 30];
        let states = [0, 0, 1, 1, 1, 1, 2, 2, 2, 3, 3, 0, 0];
        let rows: Vec<PositionRow> = coordinates
            .iter()
            .zip(states.iter())
            .map(|(&c, &s)| row(c, s))
            .collect();
        let segments = extract_segments("t", &rows).unwrap();

        let covered: Vec<u64> = segments.iter().flat_map(|s| s.start..s.end).collect();
        assert_eq!(covered, coordinates.to_vec());
        assert_eq!(covered.iter().collect::<BTreeSet<_>>().len(), covered.len());

        for pair in segments.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(!(pair[0].state == pair[1].state && pair[0].end == pair[1].start));
        }
    }
}
