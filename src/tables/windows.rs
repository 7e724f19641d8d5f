use crate::trio::{State, NUM_STATES};
use crate::utils::{Delimiter, Result, TableHeader};
use std::io::{BufRead, Write};

pub const WINDOW_COLUMNS: [&str; 8] = ["chrom", "start", "end", "analysis", "V0", "V1", "V2", "V3"];

/// Total length covered by each state inside one genomic window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub analysis: String,
    pub totals: [u64; NUM_STATES],
}

impl WindowRecord {
    pub fn total(&self) -> u64 {
        self.totals.iter().sum()
    }

    /// Fraction of covered bases in the discordant states `V2` and `V3`.
    pub fn prop_ils(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let ils = self.totals[State::V2.index()] + self.totals[State::V3.index()];
        Some(ils as f64 / total as f64)
    }
}

pub fn read_windows<R: BufRead>(reader: R, delimiter: Delimiter) -> Result<Vec<WindowRecord>> {
    let mut lines = reader.lines();
    let header_line = match lines.next() {
        Some(line) => line.map_err(|e| e.to_string())?,
        None => return Ok(Vec::new()),
    };
    let header = TableHeader::parse(&header_line, delimiter);
    let indices = header
        .require(&WINDOW_COLUMNS)
        .map_err(|e| format!("Window table {}", e))?;

    let mut records = Vec::new();
    for (line_number, line) in lines.enumerate() {
        // header is line 1
        let line_number = line_number + 2;
        let line = line.map_err(|e| format!("Error reading line {}: {}", line_number, e))?;
        if line.is_empty() {
            continue;
        }
        let fields = delimiter.split(&line);
        if fields.len() != header.columns.len() {
            return Err(format!(
                "Expected {} fields at line {}, found {}",
                header.columns.len(),
                line_number,
                fields.len()
            ));
        }
        let number = |index: usize| {
            fields[index]
                .trim()
                .parse::<u64>()
                .map_err(|_| format!("Invalid number '{}' at line {}", fields[index], line_number))
        };

        let mut totals = [0; NUM_STATES];
        for (total, &index) in totals.iter_mut().zip(&indices[4..]) {
            *total = number(index)?;
        }
        records.push(WindowRecord {
            chrom: fields[indices[0]].to_string(),
            start: number(indices[1])?,
            end: number(indices[2])?,
            analysis: fields[indices[3]].to_string(),
            totals,
        });
    }
    Ok(records)
}

pub fn write_windows<W: Write>(
    writer: &mut W,
    delimiter: Delimiter,
    records: &[WindowRecord],
) -> Result<()> {
    let write_err = |e: std::io::Error| format!("Failed to write windows: {}", e);
    writeln!(writer, "{}", delimiter.join(WINDOW_COLUMNS)).map_err(write_err)?;
    for record in records {
        let fields = [
            record.chrom.clone(),
            record.start.to_string(),
            record.end.to_string(),
            record.analysis.clone(),
        ]
        .into_iter()
        .chain(record.totals.iter().map(|t| t.to_string()));
        writeln!(writer, "{}", delimiter.join(fields)).map_err(write_err)?;
    }
    Ok(())
}
