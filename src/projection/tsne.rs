//! Barnes-Hut t-SNE through `linfa-tsne`
//!
//! The initial embedding is drawn from a `StdRng` seeded with the configured
//! seed, so the same vectors in the same order give the same layout.

use super::{Coordinate2D, Projector, ProjectorConfig, ProjectorError, TARGET_DIMENSIONS};
use crate::embedding::EmbeddingVector;
use linfa::traits::Transformer;
use linfa_tsne::TSneParams;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Barnes-Hut approximation threshold (0 is exact t-SNE).
pub const BARNES_HUT_ANGLE: f64 = 0.5;
/// Gradient descent iterations.
pub const MAX_ITERATIONS: usize = 1000;

/// Largest perplexity the Barnes-Hut neighbour search supports for `n` points.
///
/// The search needs `3 * perplexity <= n - 1`; larger values are lowered to
/// just under that bound.
pub fn effective_perplexity(perplexity: f64, n: usize) -> f64 {
    let ceiling = n.saturating_sub(1) as f64 / 3.0 * (1.0 - 1e-9);
    perplexity.min(ceiling)
}

/// Projector backed by `linfa-tsne`.
#[derive(Debug, Clone)]
pub struct TsneProjector {
    max_iterations: usize,
}

impl TsneProjector {
    pub fn new() -> Self {
        Self::with_iterations(MAX_ITERATIONS)
    }

    pub fn with_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    fn matrix(vectors: &[EmbeddingVector], width: usize) -> Result<Array2<f64>, ProjectorError> {
        let mut flat = Vec::with_capacity(vectors.len() * width);
        for (row, vector) in vectors.iter().enumerate() {
            if vector.len() != width {
                return Err(ProjectorError(format!(
                    "row {} has {} dimensions, expected {}",
                    row,
                    vector.len(),
                    width
                )));
            }
            flat.extend(vector.as_slice().iter().map(|v| f64::from(*v)));
        }
        Array2::from_shape_vec((vectors.len(), width), flat)
            .map_err(|e| ProjectorError(e.to_string()))
    }
}

impl Default for TsneProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl Projector for TsneProjector {
    fn name(&self) -> &str {
        "tsne"
    }

    fn project(
        &self,
        vectors: &[EmbeddingVector],
        config: &ProjectorConfig,
    ) -> Result<Vec<Coordinate2D>, ProjectorError> {
        let Some(first) = vectors.first() else {
            return Ok(Vec::new());
        };
        let width = first.len();
        if width < TARGET_DIMENSIONS {
            return Err(ProjectorError(format!(
                "t-SNE needs at least {} input dimensions, got {}",
                TARGET_DIMENSIONS, width
            )));
        }
        let data = Self::matrix(vectors, width)?;

        let n = vectors.len();
        let perplexity = effective_perplexity(config.perplexity, n);
        if perplexity < config.perplexity {
            warn!(
                configured = config.perplexity,
                used = perplexity,
                talks = n,
                "perplexity lowered to fit the roster"
            );
        }

        let embedding = TSneParams::embedding_size_with_rng(
            TARGET_DIMENSIONS,
            StdRng::seed_from_u64(config.seed),
        )
        .perplexity(perplexity)
        .approx_threshold(BARNES_HUT_ANGLE)
        .max_iter(self.max_iterations)
        .transform(data)
        .map_err(|e| ProjectorError(e.to_string()))?;

        debug!(talks = n, perplexity, "t-SNE converged");
        Ok(embedding
            .outer_iter()
            .map(|point| Coordinate2D::new(point[0], point[1]))
            .collect())
    }
}
