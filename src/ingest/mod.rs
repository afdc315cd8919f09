//! Tabular inputs
//!
//! Three flat CSV tables feed the pipeline: the talk roster, an optional
//! session taxonomy, and the pre-computed layout produced by an earlier run.
//! Each reader locates its required columns by header name up front so a
//! missing column fails the whole read before any row is processed.

mod precomputed;
mod talks;
mod taxonomy;

pub use precomputed::{read_precomputed, read_precomputed_path, PrecomputedRow};
pub use talks::{ingest, read_talks, read_talks_path, RawTalkRow, Talk, TalkId};
pub use taxonomy::{read_taxonomy, read_taxonomy_path, Taxonomy};

use crate::error::{TalkMapError, TalkMapResult};
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;

/// Open a CSV reader that tolerates short rows (absent trailing cells).
fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader)
}

/// Resolve the position of every required column, failing on the first absent one.
fn locate_columns<const N: usize>(
    headers: &StringRecord,
    required: [&'static str; N],
    table: &'static str,
) -> TalkMapResult<[usize; N]> {
    let mut indices = [0usize; N];
    for (slot, column) in indices.iter_mut().zip(required) {
        *slot = headers
            .iter()
            .position(|h| normalize_header(h) == column)
            .ok_or(TalkMapError::MissingColumn { column, table })?;
    }
    Ok(indices)
}

fn normalize_header(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}

/// Cell text at `index`, or `""` when the row is too short.
fn cell(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}
