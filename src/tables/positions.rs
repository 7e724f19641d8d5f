use crate::trio::{PositionRow, TrioError, NUM_STATES};
use crate::utils::{Delimiter, TableHeader};
use std::io::BufRead;

/// Reference coordinate marking a position absent from the reference species.
pub const UNDEFINED_COORDINATE: i64 = -1;

pub const STATE_COLUMNS: [&str; NUM_STATES] = ["V0", "V1", "V2", "V3"];

/// Reads a per-position state table for one trio.
///
/// The header must contain `coordinate_column` and `V0..V3`. Rows whose reference
/// coordinate is the undefined sentinel are dropped. Coordinates must ascend
/// strictly and scores must not be NaN. Row indices in errors count data rows
/// from zero, dropped rows included.
pub fn read_positions<R: BufRead>(
    reader: R,
    delimiter: Delimiter,
    trio: &str,
    coordinate_column: &str,
) -> Result<Vec<PositionRow>, TrioError> {
    let mut lines = reader.lines();
    let header_line = match lines.next() {
        Some(line) => line.map_err(|e| TrioError::malformed(trio, 0, e.to_string()))?,
        None => return Err(TrioError::malformed(trio, 0, "missing header line")),
    };
    let header = TableHeader::parse(&header_line, delimiter);

    let mut required = vec![coordinate_column];
    required.extend(STATE_COLUMNS);
    let indices = header
        .require(&required)
        .map_err(|e| TrioError::malformed(trio, 0, e))?;
    let coordinate_index = indices[0];
    let score_indices = &indices[1..];

    let mut rows = Vec::new();
    let mut num_undefined = 0;
    let mut prev_coordinate: Option<u64> = None;
    for (row, line) in lines.enumerate() {
        let line = line.map_err(|e| TrioError::malformed(trio, row, e.to_string()))?;
        if line.is_empty() {
            continue;
        }
        let fields = delimiter.split(&line);
        let field = |index: usize| {
            fields.get(index).copied().ok_or_else(|| {
                TrioError::malformed(
                    trio,
                    row,
                    format!("expected {} fields, found {}", header.columns.len(), fields.len()),
                )
            })
        };

        let raw_coordinate = field(coordinate_index)?;
        let coordinate: i64 = raw_coordinate.trim().parse().map_err(|_| {
            TrioError::malformed(trio, row, format!("invalid coordinate '{}'", raw_coordinate))
        })?;
        if coordinate == UNDEFINED_COORDINATE {
            num_undefined += 1;
            continue;
        }
        let coordinate = u64::try_from(coordinate).map_err(|_| {
            TrioError::malformed(trio, row, format!("negative coordinate {}", coordinate))
        })?;
        if let Some(prev) = prev_coordinate {
            if coordinate <= prev {
                return Err(TrioError::malformed(
                    trio,
                    row,
                    format!(
                        "coordinate {} does not follow previous coordinate {}",
                        coordinate, prev
                    ),
                ));
            }
        }
        prev_coordinate = Some(coordinate);

        let mut scores = [0.0f64; NUM_STATES];
        for (score, &index) in scores.iter_mut().zip(score_indices) {
            let raw_score = field(index)?;
            *score = raw_score.trim().parse().map_err(|_| {
                TrioError::malformed(trio, row, format!("invalid state score '{}'", raw_score))
            })?;
            if score.is_nan() {
                return Err(TrioError::malformed(trio, row, "NaN state score"));
            }
        }
        rows.push(PositionRow::new(coordinate, scores));
    }

    log::debug!(
        "Trio {}: read {} positions, skipped {} undefined in reference",
        trio,
        rows.len(),
        num_undefined
    );
    Ok(rows)
}
