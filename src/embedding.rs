//! Text embedding backends and cosine similarity
//!
//! The pipeline only needs one vector per talk's combined text. Backends sit
//! behind the `Embedder` trait so production code can use fastembed-rs while
//! tests and offline runs use the deterministic `HashEmbedder`.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Error type for embedding operations.
#[derive(Debug)]
pub enum EmbeddingError {
    /// The embedding model returned no results
    EmptyResult,
    /// The model returned a different number of vectors than texts
    CountMismatch { texts: usize, vectors: usize },
    /// Model loading or inference failed
    ModelError(String),
}

impl fmt::Display for EmbeddingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbeddingError::EmptyResult => write!(f, "embedding returned no results"),
            EmbeddingError::CountMismatch { texts, vectors } => write!(
                f,
                "embedding returned {} vectors for {} texts",
                vectors, texts
            ),
            EmbeddingError::ModelError(msg) => write!(f, "embedding model error: {}", msg),
        }
    }
}

impl std::error::Error for EmbeddingError {}

/// Fixed-length vector for one talk's combined text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Trait for embedding text into vectors.
///
/// Implementations handle model loading and inference.
/// fastembed-rs for production, hashing or mocks for tests.
pub trait Embedder: Send + Sync {
    /// Name recorded in logs, e.g. `"hash-256"`.
    fn name(&self) -> &str;

    /// Embed a batch of texts, returning one vector per text.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Embed texts and check the backend returned one vector per text.
pub fn embed_all(
    embedder: &dyn Embedder,
    texts: &[&str],
) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }
    let raw = embedder.embed_batch(texts)?;
    if raw.is_empty() {
        return Err(EmbeddingError::EmptyResult);
    }
    if raw.len() != texts.len() {
        return Err(EmbeddingError::CountMismatch {
            texts: texts.len(),
            vectors: raw.len(),
        });
    }
    Ok(raw.into_iter().map(EmbeddingVector::from).collect())
}

// ---------------------------------------------------------------------------
// HashEmbedder — deterministic bag-of-words feature hashing
// ---------------------------------------------------------------------------

/// Deterministic embedder that hashes lower-cased word tokens into signed
/// buckets and L2-normalizes the result.
///
/// Texts sharing vocabulary land close together under cosine similarity,
/// which is enough to lay out a roster without a model download. Buckets
/// come from SHA-256 of the seed and token, so vectors are the same on every
/// platform and toolchain.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimensions: usize,
    seed: u64,
    name: String,
}

impl HashEmbedder {
    pub fn new(dimensions: usize, seed: u64) -> Self {
        let dimensions = dimensions.max(1);
        Self {
            dimensions,
            seed,
            name: format!("hash-{}", dimensions),
        }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = stable_hash_str(self.seed, &token.to_lowercase());
            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }
        let norm: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

impl Embedder for HashEmbedder {
    fn name(&self) -> &str {
        &self.name
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}

/// First 8 bytes (little-endian) of `SHA-256(seed_le || value)`.
fn stable_hash_str(seed: u64, value: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(prefix)
}

// ---------------------------------------------------------------------------
// FastEmbedEmbedder — production embedder behind `embeddings` feature
// ---------------------------------------------------------------------------

#[cfg(feature = "embeddings")]
mod fastembed_impl {
    use super::{Embedder, EmbeddingError};
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use std::sync::Mutex;

    /// Production embedder backed by fastembed (ONNX Runtime).
    ///
    /// Wraps `fastembed::TextEmbedding` in a `Mutex` because its `embed`
    /// method requires `&mut self`, while the `Embedder` trait uses `&self`.
    pub struct FastEmbedEmbedder {
        model: Mutex<TextEmbedding>,
        name: String,
    }

    impl FastEmbedEmbedder {
        /// Create a new FastEmbedEmbedder with a specific model.
        pub fn new(model: EmbeddingModel) -> Result<Self, EmbeddingError> {
            let name = format!("fastembed:{:?}", model);
            let options = InitOptions::new(model).with_show_download_progress(false);
            let embedding = TextEmbedding::try_new(options)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            Ok(Self {
                model: Mutex::new(embedding),
                name,
            })
        }

        /// Create a new FastEmbedEmbedder with the default model (nomic-embed-text-v1.5).
        pub fn default_model() -> Result<Self, EmbeddingError> {
            Self::new(EmbeddingModel::NomicEmbedTextV15)
        }

        /// Create an embedder from a model code such as
        /// `"sentence-transformers/all-MiniLM-L6-v2"`.
        pub fn from_model_code(code: &str) -> Result<Self, EmbeddingError> {
            let model = TextEmbedding::list_supported_models()
                .into_iter()
                .find(|info| info.model_code.eq_ignore_ascii_case(code))
                .map(|info| info.model)
                .ok_or_else(|| {
                    EmbeddingError::ModelError(format!("unsupported fastembed model: {}", code))
                })?;
            Self::new(model)
        }
    }

    impl Embedder for FastEmbedEmbedder {
        fn name(&self) -> &str {
            &self.name
        }

        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let mut model = self
                .model
                .lock()
                .map_err(|_| EmbeddingError::ModelError("model lock poisoned".to_string()))?;
            let embeddings = model
                .embed(texts.to_vec(), None)
                .map_err(|e| EmbeddingError::ModelError(e.to_string()))?;
            if embeddings.is_empty() {
                return Err(EmbeddingError::EmptyResult);
            }
            Ok(embeddings)
        }
    }
}

#[cfg(feature = "embeddings")]
pub use fastembed_impl::FastEmbedEmbedder;

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

/// Cosine similarity between two vectors. Zero vectors score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Pairwise cosine similarity of every vector against every other.
pub fn similarity_matrix(vectors: &[EmbeddingVector]) -> Vec<Vec<f32>> {
    vectors
        .iter()
        .map(|a| {
            vectors
                .iter()
                .map(|b| cosine_similarity(a.as_slice(), b.as_slice()))
                .collect()
        })
        .collect()
}

/// The `k` rows most similar to `index`, highest first, ties by row index.
///
/// `index` itself is excluded. Out-of-range indices yield nothing.
pub fn nearest(matrix: &[Vec<f32>], index: usize, k: usize) -> Vec<(usize, f32)> {
    let Some(row) = matrix.get(index) else {
        return Vec::new();
    };
    let mut scored: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(k);
    scored
}
