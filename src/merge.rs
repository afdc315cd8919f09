//! Positional merge of talks with their embedding vectors
//!
//! Vectors carry no key of their own, so the only correct pairing is by
//! position. Any length mismatch, or a talk that is no longer at the
//! position its `TalkId` records, aborts the run.

use crate::embedding::EmbeddingVector;
use crate::error::{TalkMapError, TalkMapResult};
use crate::ingest::Talk;
use tracing::debug;

/// A talk paired with the vector computed from its combined text.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedTalk {
    pub talk: Talk,
    pub vector: EmbeddingVector,
}

/// Zip talks and vectors by position.
pub fn merge(
    talks: Vec<Talk>,
    vectors: Vec<EmbeddingVector>,
) -> TalkMapResult<Vec<EmbeddedTalk>> {
    TalkMapError::check_aligned("merge", talks.len(), vectors.len(), "vectors")?;
    ensure_row_order(&talks, "merge")?;

    let merged: Vec<EmbeddedTalk> = talks
        .into_iter()
        .zip(vectors)
        .map(|(talk, vector)| EmbeddedTalk { talk, vector })
        .collect();
    debug!(pairs = merged.len(), "merged talks with vectors");
    Ok(merged)
}

/// Fail if any talk is not at the position its id records.
pub(crate) fn ensure_row_order(talks: &[Talk], stage: &'static str) -> TalkMapResult<()> {
    match talks
        .iter()
        .enumerate()
        .find(|(position, talk)| talk.id.index() != *position)
    {
        Some((position, talk)) => Err(TalkMapError::RowOrder {
            stage,
            position,
            id: talk.id.index(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{ingest, RawTalkRow};

    fn talks(n: usize) -> Vec<Talk> {
        ingest((0..n).map(|i| RawTalkRow {
            title: Some(format!("Talk {}", i)),
            ..Default::default()
        }))
    }

    fn vectors(n: usize) -> Vec<EmbeddingVector> {
        (0..n)
            .map(|i| EmbeddingVector::from(vec![i as f32]))
            .collect()
    }

    #[test]
    fn merge_is_positional_zip() {
        let merged = merge(talks(3), vectors(3)).unwrap();
        assert_eq!(merged.len(), 3);
        for (i, pair) in merged.iter().enumerate() {
            assert_eq!(pair.talk.title, format!("Talk {}", i));
            assert_eq!(pair.vector.as_slice(), &[i as f32]);
        }
    }

    #[test]
    fn length_mismatch_is_alignment_error() {
        let err = merge(talks(3), vectors(2)).unwrap_err();
        assert!(matches!(
            err,
            TalkMapError::Alignment { stage: "merge", talks: 3, other: 2, .. }
        ));
    }

    #[test]
    fn reordered_talks_are_rejected() {
        let mut input = talks(3);
        input.swap(0, 2);
        let err = merge(input, vectors(3)).unwrap_err();
        assert!(matches!(
            err,
            TalkMapError::RowOrder { stage: "merge", position: 0, id: 2 }
        ));
    }

    #[test]
    fn empty_inputs_merge_to_nothing() {
        assert!(merge(Vec::new(), Vec::new()).unwrap().is_empty());
    }
}
