//! Optional session taxonomy table (`MS Topic` column)

use super::{cell, csv_reader, locate_columns};
use crate::error::TalkMapResult;
use crate::taxonomy::{canonicalize_with, sort_categories, CategoryLabel, MalformedLabelPolicy};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Column holding one session label per row.
pub const TOPIC_COLUMN: &str = "MS Topic";

/// The conference's declared sessions, canonicalized and in legend order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Taxonomy {
    /// Canonical labels in table order
    pub labels: Vec<CategoryLabel>,
    /// Unique display labels in rank order
    pub ordered: Vec<String>,
}

impl Taxonomy {
    /// Build from raw labels; blank labels are skipped.
    pub fn from_raw<'a, I>(raw: I, policy: MalformedLabelPolicy) -> TalkMapResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels = raw
            .into_iter()
            .filter(|label| !label.trim().is_empty())
            .map(|label| canonicalize_with(label, policy))
            .collect::<TalkMapResult<Vec<_>>>()?;
        let ordered = sort_categories(labels.iter().map(|l| l.display.as_str()));
        Ok(Self { labels, ordered })
    }

    /// Whether `display` is one of the declared sessions.
    pub fn contains(&self, display: &str) -> bool {
        self.labels.iter().any(|l| l.display == display)
    }

    /// Display labels seen in a dataset that the taxonomy does not declare.
    pub fn undeclared<'a>(&self, displays: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for display in displays {
            if !self.contains(display) && !missing.iter().any(|m| m == display) {
                missing.push(display.to_string());
            }
        }
        missing
    }
}

/// Read a taxonomy CSV.
pub fn read_taxonomy<R: Read>(reader: R, policy: MalformedLabelPolicy) -> TalkMapResult<Taxonomy> {
    let mut csv = csv_reader(reader);
    let headers = csv.headers()?.clone();
    let [topic] = locate_columns(&headers, [TOPIC_COLUMN], "taxonomy")?;

    let mut raw = Vec::new();
    for record in csv.records() {
        raw.push(cell(&record?, topic).to_string());
    }

    let taxonomy = Taxonomy::from_raw(raw.iter().map(String::as_str), policy)?;
    debug!(
        labels = taxonomy.labels.len(),
        sessions = taxonomy.ordered.len(),
        "loaded session taxonomy"
    );
    Ok(taxonomy)
}

/// Read a taxonomy CSV from a file.
pub fn read_taxonomy_path(
    path: impl AsRef<Path>,
    policy: MalformedLabelPolicy,
) -> TalkMapResult<Taxonomy> {
    read_taxonomy(File::open(path)?, policy)
}
