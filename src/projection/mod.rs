//! 2-D projection of talk embeddings
//!
//! The dimensionality-reduction algorithm is an external collaborator behind
//! the `Projector` trait. `ProjectionAdapter` owns the fixed configuration,
//! rejects inputs the configuration cannot handle before the call, and
//! checks the projector returned exactly one coordinate per vector.

mod random;
#[cfg(feature = "tsne")]
mod tsne;

pub use random::RandomProjector;
#[cfg(feature = "tsne")]
pub use tsne::{effective_perplexity, TsneProjector};

use crate::embedding::EmbeddingVector;
use crate::error::{TalkMapError, TalkMapResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Output dimensionality of every projection.
pub const TARGET_DIMENSIONS: usize = 2;
/// Smallest roster the projector is asked to lay out.
pub const MIN_TALKS: usize = 4;
/// Early exaggeration used by the automatic learning-rate policy.
pub const EARLY_EXAGGERATION: f64 = 12.0;
/// Floor of the automatic learning rate.
pub const MIN_AUTO_LEARNING_RATE: f64 = 50.0;

/// A projected point. No bounds are implied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f64,
    pub y: f64,
}

impl Coordinate2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Step-size policy handed to the projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningRate {
    /// `max(n / early_exaggeration / 4, 50)`
    #[default]
    Auto,
    Fixed(f64),
}

impl LearningRate {
    /// Concrete learning rate for `n` input vectors.
    pub fn resolve(&self, n: usize) -> f64 {
        match self {
            LearningRate::Auto => {
                (n as f64 / EARLY_EXAGGERATION / 4.0).max(MIN_AUTO_LEARNING_RATE)
            }
            LearningRate::Fixed(rate) => *rate,
        }
    }
}

/// Which projector `Pipeline::from_config` constructs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectorBackend {
    /// Barnes-Hut t-SNE (needs the `tsne` feature)
    #[default]
    Tsne,
    /// Linear sign projection, no extra dependencies
    Random,
}

/// Fixed projector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    pub backend: ProjectorBackend,
    /// Random seed; same seed and same input order give the same layout
    pub seed: u64,
    /// t-SNE neighbourhood size, tuned for small rosters
    pub perplexity: f64,
    /// Gradient step size, for projectors that expose one
    pub learning_rate: LearningRate,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            backend: ProjectorBackend::Tsne,
            seed: 42,
            perplexity: 5.0,
            learning_rate: LearningRate::Auto,
        }
    }
}

impl ProjectorConfig {
    /// Construct the configured projector.
    pub fn build_projector(&self) -> TalkMapResult<Box<dyn Projector>> {
        match self.backend {
            #[cfg(feature = "tsne")]
            ProjectorBackend::Tsne => Ok(Box::new(TsneProjector::new())),
            #[cfg(not(feature = "tsne"))]
            ProjectorBackend::Tsne => Err(TalkMapError::Config(
                "the tsne projector requires the `tsne` feature".to_string(),
            )),
            ProjectorBackend::Random => Ok(Box::new(RandomProjector::new())),
        }
    }
}

/// Failure reported by a projector implementation.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProjectorError(pub String);

/// Dimensionality reduction from embedding vectors to 2-D coordinates.
///
/// Implementations must be pure functions of `(vectors, config)`: the same
/// vectors in the same order with the same seed give the same coordinates,
/// one per vector, in input order.
pub trait Projector: Send + Sync {
    /// Name recorded in logs
    fn name(&self) -> &str;

    fn project(
        &self,
        vectors: &[EmbeddingVector],
        config: &ProjectorConfig,
    ) -> Result<Vec<Coordinate2D>, ProjectorError>;
}

/// Validated, fixed-configuration access to a `Projector`.
pub struct ProjectionAdapter {
    projector: Box<dyn Projector>,
    config: ProjectorConfig,
}

impl ProjectionAdapter {
    pub fn new(projector: Box<dyn Projector>, config: ProjectorConfig) -> Self {
        Self { projector, config }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project every vector to a coordinate, preserving input order.
    pub fn project(&self, vectors: &[EmbeddingVector]) -> TalkMapResult<Vec<Coordinate2D>> {
        self.validate(vectors)?;

        let n = vectors.len();
        info!(
            projector = self.projector.name(),
            talks = n,
            seed = self.config.seed,
            perplexity = self.config.perplexity,
            learning_rate = self.config.learning_rate.resolve(n),
            "projecting embeddings"
        );

        let coordinates = self.projector.project(vectors, &self.config)?;
        TalkMapError::check_aligned("projection", n, coordinates.len(), "coordinates")?;
        debug!(coordinates = coordinates.len(), "projection complete");
        Ok(coordinates)
    }

    /// Check the input is something the configured projector can lay out.
    pub fn validate(&self, vectors: &[EmbeddingVector]) -> TalkMapResult<()> {
        let n = vectors.len();
        let config_error = |parameter: &'static str, value: String| {
            TalkMapError::ProjectorConfiguration {
                parameter,
                value,
                input_size: n,
            }
        };

        if n < MIN_TALKS {
            return Err(config_error("min_talks", MIN_TALKS.to_string()));
        }

        let perplexity = self.config.perplexity;
        if !perplexity.is_finite() || perplexity <= 0.0 || perplexity >= n as f64 {
            return Err(config_error("perplexity", perplexity.to_string()));
        }

        if let LearningRate::Fixed(rate) = self.config.learning_rate {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(config_error("learning_rate", rate.to_string()));
            }
        }

        let width = vectors[0].len();
        if width == 0 {
            return Err(config_error("vector_length", "0".to_string()));
        }
        if let Some((index, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != width) {
            return Err(config_error(
                "vector_length",
                format!("{} at row {} (expected {})", v.len(), index, width),
            ));
        }

        Ok(())
    }
}
