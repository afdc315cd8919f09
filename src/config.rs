//! Pipeline configuration
//!
//! Loaded from YAML; every key is optional and falls back to the defaults
//! below.
//!
//! ```yaml
//! projector:
//!   backend: tsne             # or: random (tsne needs the `tsne` feature)
//!   seed: 42
//!   perplexity: 5.0
//!   learning_rate: auto       # or: !fixed 200.0
//! malformed_labels: reject    # or: plain_label
//! embedding:
//!   backend: hash             # or: fastembed (needs the `embeddings` feature)
//!   dimensions: 256
//!   seed: 0
//!   model: ~                  # fastembed model code; nomic-embed-text-v1.5 when unset
//! ```

use crate::embedding::{Embedder, HashEmbedder};
use crate::error::{TalkMapError, TalkMapResult};
use crate::projection::ProjectorConfig;
use crate::taxonomy::MalformedLabelPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which embedding backend to construct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    #[default]
    Hash,
    Fastembed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Vector width of the hash backend
    pub dimensions: usize,
    /// Hash seed of the hash backend
    pub seed: u64,
    /// Model code of the fastembed backend
    pub model: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            backend: EmbeddingBackend::Hash,
            dimensions: 256,
            seed: 0,
            model: None,
        }
    }
}

impl EmbeddingConfig {
    /// Construct the configured embedder.
    pub fn build_embedder(&self) -> TalkMapResult<Box<dyn Embedder>> {
        match self.backend {
            EmbeddingBackend::Hash => {
                if self.dimensions == 0 {
                    return Err(TalkMapError::Config(
                        "embedding.dimensions must be positive".to_string(),
                    ));
                }
                Ok(Box::new(HashEmbedder::new(self.dimensions, self.seed)))
            }
            #[cfg(feature = "embeddings")]
            EmbeddingBackend::Fastembed => {
                use crate::embedding::FastEmbedEmbedder;
                let embedder = match &self.model {
                    Some(code) => FastEmbedEmbedder::from_model_code(code)?,
                    None => FastEmbedEmbedder::default_model()?,
                };
                Ok(Box::new(embedder))
            }
            #[cfg(not(feature = "embeddings"))]
            EmbeddingBackend::Fastembed => Err(TalkMapError::Config(
                "the fastembed backend requires the `embeddings` feature".to_string(),
            )),
        }
    }
}

/// Everything a pipeline run is configured with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub projector: ProjectorConfig,
    pub malformed_labels: MalformedLabelPolicy,
    pub embedding: EmbeddingConfig,
}

impl PipelineConfig {
    /// Parse a YAML document.
    pub fn from_yaml_str(yaml: &str) -> TalkMapResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| TalkMapError::Config(e.to_string()))
    }

    /// Load a YAML file.
    pub fn load(path: impl AsRef<Path>) -> TalkMapResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
