use crate::trio::JointTable;
use crate::utils::{Delimiter, Result};
use std::io::Write;

/// Writes per-chromosome joint tables as one table with a leading `chrom`
/// column. All tables must carry the same trios in the same order.
pub fn write_joint_tables<W: Write>(
    writer: &mut W,
    delimiter: Delimiter,
    trios: &[String],
    tables: &[(String, JointTable)],
) -> Result<()> {
    let write_err = |e: std::io::Error| format!("Failed to write joint table: {}", e);

    let header = ["chrom", "start", "end"]
        .into_iter()
        .chain(trios.iter().map(String::as_str));
    writeln!(writer, "{}", delimiter.join(header)).map_err(write_err)?;

    for (chrom, table) in tables {
        if table.trios != trios {
            return Err(format!(
                "Trio columns of chromosome {} do not match the output header",
                chrom
            ));
        }
        for (row, &(start, end)) in table.intervals.iter().enumerate() {
            let calls = table.row(row).ok_or_else(|| {
                format!("Chromosome {} has a trio column shorter than its intervals", chrom)
            })?;
            let fields = [chrom.clone(), start.to_string(), end.to_string()]
                .into_iter()
                .chain(calls.into_iter().map(|call| call.to_string()));
            writeln!(writer, "{}", delimiter.join(fields)).map_err(write_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trio::{State, StateCall};

    #[test]
    fn write_joint_table_with_undefined_cells() {
        let trios = vec!["A".to_string(), "B".to_string()];
        let table = JointTable {
            intervals: vec![(0, 5), (5, 10)],
            trios: trios.clone(),
            columns: vec![
                vec![StateCall::Known(State::V1), StateCall::Known(State::V1)],
                vec![StateCall::Undefined, StateCall::Known(State::V3)],
            ],
        };
        let mut buffer = Vec::new();
        write_joint_tables(&mut buffer, Delimiter::Tab, &trios, &[("chr1".to_string(), table)])
            .unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "chrom\tstart\tend\tA\tB\nchr1\t0\t5\tV1\t.\nchr1\t5\t10\tV1\tV3\n"
        );
    }

    #[test]
    fn mismatched_trios_are_rejected() {
        let table = JointTable::empty(vec!["B".to_string()]);
        let mut buffer = Vec::new();
        assert!(write_joint_tables(
            &mut buffer,
            Delimiter::Tab,
            &["A".to_string()],
            &[("chr1".to_string(), table)]
        )
        .is_err());
    }

    #[test]
    fn short_column_is_an_error() {
        let trios = vec!["A".to_string()];
        let table = JointTable {
            intervals: vec![(0, 5), (5, 10)],
            trios: trios.clone(),
            columns: vec![vec![StateCall::Known(State::V0)]],
        };
        let mut buffer = Vec::new();
        assert_eq!(
            write_joint_tables(&mut buffer, Delimiter::Tab, &trios, &[("chr1".to_string(), table)]),
            Err("Chromosome chr1 has a trio column shorter than its intervals".to_string())
        );
    }
}
