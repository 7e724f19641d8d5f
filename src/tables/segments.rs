use crate::trio::{Segment, State, TrioError};
use crate::utils::{Delimiter, Result, TableHeader};
use std::io::{BufRead, Write};

pub const SEGMENT_COLUMNS: [&str; 5] = ["chrom", "start", "end", "state", "analysis"];

/// Segment together with the chromosome it was called on.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    pub chrom: String,
    pub segment: Segment,
}

/// Reads a segment table. `source` names the table in header errors; row errors
/// name the trio of the offending row when it can be parsed.
pub fn read_segments<R: BufRead>(
    reader: R,
    delimiter: Delimiter,
    source: &str,
) -> std::result::Result<Vec<SegmentRecord>, TrioError> {
    let mut lines = reader.lines();
    let header_line = match lines.next() {
        Some(line) => line.map_err(|e| TrioError::malformed(source, 0, e.to_string()))?,
        None => return Ok(Vec::new()),
    };
    let header = TableHeader::parse(&header_line, delimiter);
    let indices = header
        .require(&SEGMENT_COLUMNS)
        .map_err(|e| TrioError::malformed(source, 0, e))?;

    let mut records = Vec::new();
    for (row, line) in lines.enumerate() {
        let line = line.map_err(|e| TrioError::malformed(source, row, e.to_string()))?;
        if line.is_empty() {
            continue;
        }
        let fields = delimiter.split(&line);
        if fields.len() != header.columns.len() {
            return Err(TrioError::malformed(
                source,
                row,
                format!(
                    "expected {} fields, found {}",
                    header.columns.len(),
                    fields.len()
                ),
            ));
        }
        let (chrom, start, end, state, analysis) = (
            fields[indices[0]],
            fields[indices[1]],
            fields[indices[2]],
            fields[indices[3]],
            fields[indices[4]],
        );

        let parse_coord = |value: &str, name: &str| {
            value.trim().parse::<u64>().map_err(|_| {
                TrioError::malformed(analysis, row, format!("invalid {} '{}'", name, value))
            })
        };
        let start = parse_coord(start, "start")?;
        let end = parse_coord(end, "end")?;
        if start >= end {
            return Err(TrioError::malformed(
                analysis,
                row,
                format!("start {} is not before end {}", start, end),
            ));
        }
        let state = state
            .trim()
            .parse::<State>()
            .map_err(|_| TrioError::InconsistentStateDomain {
                trio: analysis.to_string(),
                row,
                label: state.to_string(),
            })?;

        records.push(SegmentRecord {
            chrom: chrom.to_string(),
            segment: Segment::new(analysis, state, start, end),
        });
    }
    Ok(records)
}

pub fn write_segments<W: Write>(
    writer: &mut W,
    delimiter: Delimiter,
    chrom: &str,
    segments: &[Segment],
) -> Result<()> {
    let write_err = |e: std::io::Error| format!("Failed to write segments: {}", e);
    writeln!(writer, "{}", delimiter.join(SEGMENT_COLUMNS)).map_err(write_err)?;
    for segment in segments {
        let line = delimiter.join([
            chrom.to_string(),
            segment.start.to_string(),
            segment.end.to_string(),
            segment.state.to_string(),
            segment.trio.clone(),
        ]);
        writeln!(writer, "{}", line).map_err(write_err)?;
    }
    Ok(())
}
