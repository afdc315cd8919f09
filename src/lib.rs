//! talkmap: semantic layout of conference talks
//!
//! Turns a talk roster (title, abstract, session type, speaker) into a
//! deterministic 2-D layout where proximity encodes semantic similarity,
//! grouped and ordered by the conference's session taxonomy.
//!
//! # Core Concepts
//!
//! - **Canonical labels**: messy `TYPE` cells normalized to one display form
//! - **Rank keys**: plenary, contributed, then numbered `MS<n>` sessions
//! - **Plot records**: talks zipped with labels and coordinates, stably sorted
//!
//! # Example
//!
//! ```
//! use talkmap::{canonicalize, rank_key};
//!
//! let label = canonicalize("ms3: numerical methods").unwrap();
//! assert_eq!(label.display, "MS3: Numerical Methods");
//! assert_eq!(rank_key(&label.display).secondary(), 3);
//! ```

pub mod config;
pub mod embedding;
mod error;
pub mod ingest;
pub mod merge;
pub mod pipeline;
pub mod plot;
pub mod projection;
pub mod taxonomy;

pub use config::{EmbeddingBackend, EmbeddingConfig, PipelineConfig};
pub use embedding::{
    cosine_similarity, nearest, similarity_matrix, Embedder, EmbeddingError, EmbeddingVector,
    HashEmbedder,
};
#[cfg(feature = "embeddings")]
pub use embedding::FastEmbedEmbedder;
pub use error::{TalkMapError, TalkMapResult};
pub use ingest::{
    ingest, read_precomputed, read_precomputed_path, read_taxonomy, read_taxonomy_path,
    read_talks, read_talks_path, PrecomputedRow, RawTalkRow, Talk, TalkId, Taxonomy,
};
pub use merge::{merge, EmbeddedTalk};
pub use pipeline::Pipeline;
pub use plot::{build, build_precomputed, PlotDataset, PlotRecord};
pub use projection::{
    Coordinate2D, LearningRate, ProjectionAdapter, Projector, ProjectorBackend, ProjectorConfig,
    ProjectorError, RandomProjector,
};
#[cfg(feature = "tsne")]
pub use projection::TsneProjector;
pub use taxonomy::{
    canonicalize, canonicalize_with, extract_code, rank_key, sort_categories, CategoryLabel,
    MalformedLabelPolicy, RankKey,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
