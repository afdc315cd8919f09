//! End-to-end layout pipeline
//!
//! ```text
//! rows ─► ingest ─► canonicalize ───────────────────────────┐
//!            └────► embed ─► merge ─► project ─► coordinates ┴─► build ─► PlotDataset
//! ```
//!
//! Providers are constructed once and passed in; a run keeps no state
//! between invocations, so one `Pipeline` can serve independent rosters.

use crate::config::PipelineConfig;
use crate::embedding::{embed_all, Embedder, EmbeddingVector};
use crate::error::TalkMapResult;
use crate::ingest::{ingest, PrecomputedRow, RawTalkRow, Talk};
use crate::merge::merge;
use crate::plot::{build, build_precomputed, PlotDataset};
use crate::projection::{ProjectionAdapter, Projector};
use crate::taxonomy::{canonicalize_with, CategoryLabel};
use tracing::info;

/// A configured pipeline with its embedding and projection providers.
pub struct Pipeline {
    config: PipelineConfig,
    embedder: Box<dyn Embedder>,
    projection: ProjectionAdapter,
}

impl Pipeline {
    /// Create a pipeline from explicit providers.
    pub fn new(
        config: PipelineConfig,
        embedder: Box<dyn Embedder>,
        projector: Box<dyn Projector>,
    ) -> Self {
        let projection = ProjectionAdapter::new(projector, config.projector.clone());
        Self {
            config,
            embedder,
            projection,
        }
    }

    /// Create a pipeline with the configured embedder and projector.
    pub fn from_config(config: PipelineConfig) -> TalkMapResult<Self> {
        let embedder = config.embedding.build_embedder()?;
        let projector = config.projector.build_projector()?;
        Ok(Self::new(config, embedder, projector))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Ingest raw rows and lay them out.
    pub fn run_rows<I>(&self, rows: I) -> TalkMapResult<PlotDataset>
    where
        I: IntoIterator<Item = RawTalkRow>,
    {
        self.run(ingest(rows))
    }

    /// Lay out an ingested roster.
    pub fn run(&self, talks: Vec<Talk>) -> TalkMapResult<PlotDataset> {
        info!(
            talks = talks.len(),
            embedder = self.embedder.name(),
            "starting layout run"
        );

        // Labels first: a malformed taxonomy should fail before any model work.
        let labels = self.canonicalize(&talks)?;
        let vectors = self.embed(&talks)?;

        let (talks, vectors): (Vec<Talk>, Vec<EmbeddingVector>) = merge(talks, vectors)?
            .into_iter()
            .map(|pair| (pair.talk, pair.vector))
            .unzip();

        let coordinates = self.projection.project(&vectors)?;
        let dataset = build(talks, labels, coordinates)?;

        info!(
            records = dataset.len(),
            categories = dataset.categories.len(),
            "layout run complete"
        );
        Ok(dataset)
    }

    /// Re-order a pre-computed layout; embedding and projection are skipped.
    pub fn replot(&self, rows: Vec<PrecomputedRow>) -> TalkMapResult<PlotDataset> {
        info!(rows = rows.len(), "replotting pre-computed layout");
        build_precomputed(rows, self.config.malformed_labels)
    }

    /// Canonical label of every talk, in roster order.
    pub fn canonicalize(&self, talks: &[Talk]) -> TalkMapResult<Vec<CategoryLabel>> {
        talks
            .iter()
            .map(|t| canonicalize_with(&t.raw_type, self.config.malformed_labels))
            .collect()
    }

    /// Embedding of every talk's combined text, in roster order.
    pub fn embed(&self, talks: &[Talk]) -> TalkMapResult<Vec<EmbeddingVector>> {
        let texts: Vec<&str> = talks.iter().map(|t| t.combined_text.as_str()).collect();
        Ok(embed_all(self.embedder.as_ref(), &texts)?)
    }
}
