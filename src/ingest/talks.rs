//! Talk roster ingestion

use super::{cell, csv_reader, locate_columns};
use crate::error::TalkMapResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Columns the talk roster must provide.
pub const TALK_COLUMNS: [&str; 5] = ["TITLE", "ABSTRACT", "TYPE", "FIRST_NAME", "LAST_NAME"];

/// Position of a talk in the input roster.
///
/// Carried through every stage so that a stage which reorders or drops
/// talks is caught instead of silently shifting rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TalkId(usize);

impl TalkId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TalkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "talk#{}", self.0)
    }
}

/// One roster row as read from the source, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTalkRow {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub raw_type: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One conference submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Talk {
    pub id: TalkId,
    pub title: String,
    pub abstract_text: String,
    pub speaker_first: String,
    pub speaker_last: String,
    pub raw_type: String,
    /// `title + " " + abstract`, the embedding input
    pub combined_text: String,
    /// `first + " " + last`
    pub speaker_full_name: String,
}

impl Talk {
    fn from_row(id: TalkId, row: RawTalkRow) -> Self {
        let title = row.title.unwrap_or_default();
        let abstract_text = row.abstract_text.unwrap_or_default();
        let speaker_first = row.first_name.unwrap_or_default();
        let speaker_last = row.last_name.unwrap_or_default();
        let combined_text = format!("{} {}", title, abstract_text);
        let speaker_full_name = format!("{} {}", speaker_first, speaker_last);
        Self {
            id,
            title,
            abstract_text,
            speaker_first,
            speaker_last,
            raw_type: row.raw_type.unwrap_or_default(),
            combined_text,
            speaker_full_name,
        }
    }
}

/// Turn raw rows into talks, preserving row order.
///
/// Absent fields become empty strings; `TalkId` is the row index.
pub fn ingest<I>(rows: I) -> Vec<Talk>
where
    I: IntoIterator<Item = RawTalkRow>,
{
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| Talk::from_row(TalkId::new(i), row))
        .collect()
}

/// Read and ingest a talk roster CSV.
///
/// Fails without partial results when a required column is missing or any
/// record cannot be parsed.
pub fn read_talks<R: Read>(reader: R) -> TalkMapResult<Vec<Talk>> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let [title, abstract_text, raw_type, first, last] =
        locate_columns(&headers, TALK_COLUMNS, "talks")?;

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let text = |i| Some(cell(&record, i).to_string());
        rows.push(RawTalkRow {
            title: text(title),
            abstract_text: text(abstract_text),
            raw_type: text(raw_type),
            first_name: text(first),
            last_name: text(last),
        });
    }

    let talks = ingest(rows);
    debug!(talks = talks.len(), "ingested talk roster");
    Ok(talks)
}

/// Read and ingest a talk roster CSV from a file.
pub fn read_talks_path(path: impl AsRef<Path>) -> TalkMapResult<Vec<Talk>> {
    read_talks(File::open(path)?)
}
