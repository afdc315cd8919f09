//! Presentation-ready plot records
//!
//! The builder is the sink of the pipeline: it zips talks, canonical labels
//! and coordinates by position, then orders the rows by session rank. The
//! sort is stable, so talks of one session keep their roster order and
//! legends and colours come out the same on every run.

use crate::error::{TalkMapError, TalkMapResult};
use crate::ingest::{PrecomputedRow, Talk, TalkId};
use crate::merge::ensure_row_order;
use crate::projection::Coordinate2D;
use crate::taxonomy::{
    canonicalize_with, rank_key, sort_categories, CategoryLabel, MalformedLabelPolicy,
};
use serde::Serialize;
use tracing::debug;

/// One point of the final layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotRecord {
    pub id: TalkId,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "TITLE")]
    pub title: String,
    #[serde(rename = "TYPE_RAW")]
    pub raw_type: String,
    #[serde(rename = "TYPE")]
    pub display_type: String,
    #[serde(rename = "Speaker")]
    pub speaker_full_name: String,
}

/// Ordered plot records plus the legend they are drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDataset {
    /// Records sorted by session rank, roster order within a session
    pub records: Vec<PlotRecord>,
    /// Unique display labels in rank order
    pub categories: Vec<String>,
}

impl PlotDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one session, in plot order.
    pub fn records_in<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a PlotRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.display_type == category)
    }
}

/// Compose talks, their canonical labels and their coordinates into an
/// ordered dataset.
///
/// All three sequences must be the same length and in roster order.
pub fn build(
    talks: Vec<Talk>,
    labels: Vec<CategoryLabel>,
    coordinates: Vec<Coordinate2D>,
) -> TalkMapResult<PlotDataset> {
    TalkMapError::check_aligned("build", talks.len(), labels.len(), "category labels")?;
    TalkMapError::check_aligned("build", talks.len(), coordinates.len(), "coordinates")?;
    ensure_row_order(&talks, "build")?;

    let categories = sort_categories(labels.iter().map(|l| l.display.as_str()));

    let records = talks
        .into_iter()
        .zip(labels)
        .zip(coordinates)
        .map(|((talk, label), point)| PlotRecord {
            id: talk.id,
            x: point.x,
            y: point.y,
            title: talk.title,
            raw_type: talk.raw_type,
            display_type: label.display,
            speaker_full_name: talk.speaker_full_name,
        })
        .collect();

    Ok(finish(records, categories))
}

/// Build a dataset from a pre-computed layout; coordinates are kept as given.
pub fn build_precomputed(
    rows: Vec<PrecomputedRow>,
    policy: MalformedLabelPolicy,
) -> TalkMapResult<PlotDataset> {
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let label = canonicalize_with(&row.raw_type, policy)?;
        records.push(PlotRecord {
            id: row.id,
            x: row.coordinate.x,
            y: row.coordinate.y,
            title: row.title,
            raw_type: row.raw_type,
            display_type: label.display,
            speaker_full_name: row.speaker,
        });
    }

    let categories = sort_categories(records.iter().map(|r| r.display_type.as_str()));
    Ok(finish(records, categories))
}

fn finish(records: Vec<PlotRecord>, categories: Vec<String>) -> PlotDataset {
    let mut keyed: Vec<_> = records
        .into_iter()
        .map(|r| (rank_key(&r.display_type), r))
        .collect();
    // Vec::sort_by_key is stable; equal keys keep roster order.
    keyed.sort_by_key(|(key, _)| *key);
    let records: Vec<PlotRecord> = keyed.into_iter().map(|(_, r)| r).collect();

    debug!(
        records = records.len(),
        categories = categories.len(),
        "built plot dataset"
    );
    PlotDataset {
        records,
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest, RawTalkRow};
    use crate::taxonomy::canonicalize;

    fn roster(types: &[&str]) -> (Vec<Talk>, Vec<CategoryLabel>, Vec<Coordinate2D>) {
        let talks = ingest(types.iter().enumerate().map(|(i, t)| RawTalkRow {
            title: Some(format!("Talk {}", i)),
            raw_type: Some(t.to_string()),
            first_name: Some("Speaker".to_string()),
            last_name: Some(i.to_string()),
            ..Default::default()
        }));
        let labels = talks
            .iter()
            .map(|t| canonicalize(&t.raw_type).unwrap())
            .collect();
        let coords = (0..types.len())
            .map(|i| Coordinate2D::new(i as f64, -(i as f64)))
            .collect();
        (talks, labels, coords)
    }

    fn titles(dataset: &PlotDataset) -> Vec<&str> {
        dataset.records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn records_sort_by_rank() {
        let (t, l, c) = roster(&["Contributed Talk", "MS10: Graphs", "Plenary Talk", "MS2: Logic"]);
        let dataset = build(t, l, c).unwrap();
        let types: Vec<&str> = dataset
            .records
            .iter()
            .map(|r| r.display_type.as_str())
            .collect();
        assert_eq!(
            types,
            vec!["Plenary Talk", "Contributed Talk", "MS2: Logic", "MS10: Graphs"]
        );
        assert_eq!(dataset.categories, types);
    }

    #[test]
    fn coordinates_travel_with_their_talk() {
        let (t, l, c) = roster(&["MS2: B", "Plenary Talk"]);
        let dataset = build(t, l, c).unwrap();
        let plenary = &dataset.records[0];
        assert_eq!(plenary.title, "Talk 1");
        assert_eq!((plenary.x, plenary.y), (1.0, -1.0));
        assert_eq!(plenary.id.index(), 1);
        assert_eq!(plenary.speaker_full_name, "Speaker 1");
    }

    #[test]
    fn same_session_keeps_roster_order() {
        let (t, l, c) = roster(&["MS1: A", "Plenary Talk", "MS1: A", "Plenary Talk", "MS1: A"]);
        let dataset = build(t, l, c).unwrap();
        assert_eq!(
            titles(&dataset),
            vec!["Talk 1", "Talk 3", "Talk 0", "Talk 2", "Talk 4"]
        );
    }

    #[test]
    fn raw_type_is_preserved() {
        let (t, l, c) = roster(&["ms3: numerical methods"]);
        let dataset = build(t, l, c).unwrap();
        assert_eq!(dataset.records[0].raw_type, "ms3: numerical methods");
        assert_eq!(dataset.records[0].display_type, "MS3: Numerical Methods");
    }

    #[test]
    fn legend_has_one_entry_per_session() {
        let (t, l, c) = roster(&["Poster Session", "MS1: A", "poster session", "MS1: A"]);
        let dataset = build(t, l, c).unwrap();
        assert_eq!(dataset.categories, vec!["MS1: A", "Poster Session"]);
        assert_eq!(dataset.records_in("Poster Session").count(), 2);
    }

    // === Scenario: 3 talks, 3 vectors, 2 coordinates ===

    #[test]
    fn short_coordinates_is_alignment_error() {
        let (t, l, mut c) = roster(&["MS1: A", "MS2: B", "MS3: C"]);
        c.pop();
        let err = build(t, l, c).unwrap_err();
        assert!(matches!(
            err,
            TalkMapError::Alignment {
                stage: "build",
                talks: 3,
                other: 2,
                other_kind: "coordinates"
            }
        ));
    }

    #[test]
    fn short_labels_is_alignment_error() {
        let (t, mut l, c) = roster(&["MS1: A", "MS2: B"]);
        l.pop();
        assert!(matches!(
            build(t, l, c).unwrap_err(),
            TalkMapError::Alignment { other_kind: "category labels", .. }
        ));
    }

    #[test]
    fn precomputed_rows_are_canonicalized_and_sorted() {
        let rows = vec![
            PrecomputedRow {
                id: TalkId::new(0),
                coordinate: Coordinate2D::new(3.0, 4.0),
                title: "Graphs".to_string(),
                raw_type: "ms10: graphs".to_string(),
                speaker: "Ada Lovelace".to_string(),
            },
            PrecomputedRow {
                id: TalkId::new(1),
                coordinate: Coordinate2D::new(-1.0, 0.5),
                title: "Keynote".to_string(),
                raw_type: "plenary talk".to_string(),
                speaker: "Kurt Godel".to_string(),
            },
        ];
        let dataset = build_precomputed(rows, MalformedLabelPolicy::Reject).unwrap();
        assert_eq!(titles(&dataset), vec!["Keynote", "Graphs"]);
        assert_eq!(dataset.records[1].display_type, "MS10: Graphs");
        assert_eq!((dataset.records[1].x, dataset.records[1].y), (3.0, 4.0));
        assert_eq!(dataset.categories, vec!["Plenary Talk", "MS10: Graphs"]);
    }

    #[test]
    fn precomputed_malformed_label_fails_the_run() {
        let rows = vec![PrecomputedRow {
            id: TalkId::new(0),
            coordinate: Coordinate2D::new(0.0, 0.0),
            title: String::new(),
            raw_type: "MS9 Broken".to_string(),
            speaker: String::new(),
        }];
        assert!(matches!(
            build_precomputed(rows, MalformedLabelPolicy::Reject).unwrap_err(),
            TalkMapError::MalformedCategoryLabel { .. }
        ));
    }

    #[test]
    fn serializes_with_table_column_names() {
        let (t, l, c) = roster(&["Plenary Talk"]);
        let dataset = build(t, l, c).unwrap();
        let json = serde_json::to_value(&dataset.records[0]).unwrap();
        assert_eq!(json["TYPE"], "Plenary Talk");
        assert_eq!(json["TYPE_RAW"], "Plenary Talk");
        assert_eq!(json["Speaker"], "Speaker 0");
        assert_eq!(json["TITLE"], "Talk 0");
        assert_eq!(json["x"], 0.0);
    }
}
