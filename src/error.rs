//! Error type shared by every pipeline stage

use crate::embedding::EmbeddingError;
use crate::projection::ProjectorError;
use thiserror::Error;

/// Errors that can occur while building a talk layout.
///
/// Every variant is fatal for the run that produced it: the pipeline either
/// yields a complete, ordered dataset or one of these.
#[derive(Debug, Error)]
pub enum TalkMapError {
    #[error("malformed category label '{label}': coded session is missing its ':' separator")]
    MalformedCategoryLabel { label: String },

    #[error("alignment error at {stage}: {talks} talks but {other} {other_kind}")]
    Alignment {
        stage: &'static str,
        talks: usize,
        other: usize,
        other_kind: &'static str,
    },

    #[error("alignment error at {stage}: row {position} carries the id of row {id}")]
    RowOrder {
        stage: &'static str,
        position: usize,
        id: usize,
    },

    #[error(
        "projector configuration error: {parameter}={value} is incompatible with {input_size} talks"
    )]
    ProjectorConfiguration {
        parameter: &'static str,
        value: String,
        input_size: usize,
    },

    #[error("missing column '{column}' in {table} table")]
    MissingColumn {
        column: &'static str,
        table: &'static str,
    },

    #[error("row {row}: invalid value in column '{column}': {reason}")]
    MalformedRow {
        row: usize,
        column: &'static str,
        reason: String,
    },

    #[error("embedding provider failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("projector failed: {0}")]
    Projector(#[from] ProjectorError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for talkmap operations
pub type TalkMapResult<T> = Result<T, TalkMapError>;

impl TalkMapError {
    /// Build an alignment error for a stage comparing talks to another sequence.
    pub fn alignment(
        stage: &'static str,
        talks: usize,
        other: usize,
        other_kind: &'static str,
    ) -> Self {
        Self::Alignment {
            stage,
            talks,
            other,
            other_kind,
        }
    }

    /// Check two sequence lengths agree, returning an alignment error if not.
    pub fn check_aligned(
        stage: &'static str,
        talks: usize,
        other: usize,
        other_kind: &'static str,
    ) -> TalkMapResult<()> {
        if talks == other {
            Ok(())
        } else {
            Err(Self::alignment(stage, talks, other, other_kind))
        }
    }
}
