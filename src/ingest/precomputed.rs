//! Pre-computed layout table (`x, y, TITLE, TYPE, Speaker`)
//!
//! Produced by an earlier embedding + projection run. Coordinates are taken
//! as given; only the taxonomy stages run again.

use super::talks::TalkId;
use super::{cell, csv_reader, locate_columns};
use crate::error::{TalkMapError, TalkMapResult};
use crate::projection::Coordinate2D;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Columns the pre-computed table must provide.
pub const PRECOMPUTED_COLUMNS: [&str; 5] = ["x", "y", "TITLE", "TYPE", "Speaker"];

/// One row of a pre-computed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedRow {
    pub id: TalkId,
    pub coordinate: Coordinate2D,
    pub title: String,
    pub raw_type: String,
    pub speaker: String,
}

/// Read a pre-computed layout CSV.
///
/// Text cells default to `""`; a coordinate cell that is not a number fails
/// the whole read.
pub fn read_precomputed<R: Read>(reader: R) -> TalkMapResult<Vec<PrecomputedRow>> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let [x, y, title, raw_type, speaker] =
        locate_columns(&headers, PRECOMPUTED_COLUMNS, "pre-computed")?;

    let mut rows = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record?;
        rows.push(PrecomputedRow {
            id: TalkId::new(index),
            coordinate: Coordinate2D::new(
                parse_coordinate(&record, x, index, "x")?,
                parse_coordinate(&record, y, index, "y")?,
            ),
            title: cell(&record, title).to_string(),
            raw_type: cell(&record, raw_type).to_string(),
            speaker: cell(&record, speaker).to_string(),
        });
    }

    debug!(rows = rows.len(), "read pre-computed layout");
    Ok(rows)
}

/// Read a pre-computed layout CSV from a file.
pub fn read_precomputed_path(path: impl AsRef<Path>) -> TalkMapResult<Vec<PrecomputedRow>> {
    read_precomputed(File::open(path)?)
}

fn parse_coordinate(
    record: &csv::StringRecord,
    index: usize,
    row: usize,
    column: &'static str,
) -> TalkMapResult<f64> {
    let text = cell(record, index).trim();
    text.parse::<f64>().map_err(|e| TalkMapError::MalformedRow {
        row,
        column,
        reason: format!("'{}': {}", text, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_rows_in_order() {
        let data = "\
x,y,TITLE,TYPE,Speaker,TYPE_RAW
1.5,-2.0,Graphs,ms2: graphs,Ada Lovelace,ms2: graphs
-40,12.25,Keynote,Plenary Talk,Kurt Godel,Plenary Talk
";
        let rows = read_precomputed(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].coordinate, Coordinate2D::new(1.5, -2.0));
        assert_eq!(rows[1].id.index(), 1);
        assert_eq!(rows[1].speaker, "Kurt Godel");
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let data = "x,y,TITLE,TYPE,Speaker\n1.0,abc,T,Plenary Talk,S\n";
        let err = read_precomputed(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            TalkMapError::MalformedRow { row: 0, column: "y", .. }
        ));
    }

    #[test]
    fn empty_coordinate_is_rejected() {
        let data = "x,y,TITLE,TYPE,Speaker\n,1.0,T,Plenary Talk,S\n";
        let err = read_precomputed(data.as_bytes()).unwrap_err();
        assert!(matches!(err, TalkMapError::MalformedRow { column: "x", .. }));
    }

    #[test]
    fn missing_speaker_column() {
        let data = "x,y,TITLE,TYPE\n1,2,T,Plenary Talk\n";
        let err = read_precomputed(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            TalkMapError::MissingColumn { column: "Speaker", .. }
        ));
    }
}
