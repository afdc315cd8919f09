//! Mock embedding and projection providers

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use talkmap::{
    Coordinate2D, Embedder, EmbeddingError, EmbeddingVector, Projector, ProjectorConfig,
    ProjectorError,
};

/// Embedder that returns predetermined vectors keyed by text.
///
/// Unknown texts get a vector derived from their length so every row still
/// has a distinct, deterministic vector.
pub struct LookupEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl LookupEmbedder {
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Self {
        Self { vectors }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }
}

impl Embedder for LookupEmbedder {
    fn name(&self) -> &str {
        "lookup"
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(*t)
                    .cloned()
                    .unwrap_or_else(|| vec![t.len() as f32, 1.0, 0.5])
            })
            .collect())
    }
}

/// Projector that returns a fixed coordinate list regardless of input.
pub struct FixedProjector {
    coordinates: Vec<Coordinate2D>,
}

impl FixedProjector {
    pub fn new(coordinates: Vec<Coordinate2D>) -> Self {
        Self { coordinates }
    }
}

impl Projector for FixedProjector {
    fn name(&self) -> &str {
        "fixed"
    }

    fn project(
        &self,
        _vectors: &[EmbeddingVector],
        _config: &ProjectorConfig,
    ) -> Result<Vec<Coordinate2D>, ProjectorError> {
        Ok(self.coordinates.clone())
    }
}

/// Projector that maps row `i` to `(i, -i)` and records what it was given.
#[derive(Clone, Default)]
pub struct RecordingProjector {
    calls: Arc<Mutex<Vec<(usize, u64)>>>,
}

impl RecordingProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(vector count, seed)` of every call so far.
    pub fn calls(&self) -> Vec<(usize, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Projector for RecordingProjector {
    fn name(&self) -> &str {
        "recording"
    }

    fn project(
        &self,
        vectors: &[EmbeddingVector],
        config: &ProjectorConfig,
    ) -> Result<Vec<Coordinate2D>, ProjectorError> {
        self.calls.lock().unwrap().push((vectors.len(), config.seed));
        Ok((0..vectors.len())
            .map(|i| Coordinate2D::new(i as f64, -(i as f64)))
            .collect())
    }
}
