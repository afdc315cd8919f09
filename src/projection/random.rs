//! Seeded sign random projection
//!
//! A Johnson-Lindenstrauss style linear map: every input dimension gets a
//! column of `±1/√k` entries drawn from a `StdRng` seeded with the
//! configured seed. Pairwise distances are approximately preserved and the
//! output depends only on the vectors, their order and the seed.

use super::{Coordinate2D, Projector, ProjectorConfig, ProjectorError, TARGET_DIMENSIONS};
use crate::embedding::EmbeddingVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Projector backed by a seeded random sign matrix.
#[derive(Debug, Clone, Default)]
pub struct RandomProjector;

impl RandomProjector {
    pub fn new() -> Self {
        Self
    }

    fn basis(width: usize, seed: u64) -> Vec<[f64; TARGET_DIMENSIONS]> {
        let mut rng = StdRng::seed_from_u64(seed);
        let scale = 1.0 / (TARGET_DIMENSIONS as f64).sqrt();
        (0..width)
            .map(|_| {
                let mut column = [0.0; TARGET_DIMENSIONS];
                for entry in column.iter_mut() {
                    *entry = if rng.gen_bool(0.5) { scale } else { -scale };
                }
                column
            })
            .collect()
    }
}

impl Projector for RandomProjector {
    fn name(&self) -> &str {
        "random-sign"
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
        let basis = Self::basis(width, config.seed);

        vectors
            .iter()
            .enumerate()
            .map(|(row, vector)| {
                if vector.len() != width {
                    return Err(ProjectorError(format!(
                        "row {} has {} dimensions, expected {}",
                        row,
                        vector.len(),
                        width
                    )));
                }
                let mut point = [0.0f64; TARGET_DIMENSIONS];
                for (value, column) in vector.as_slice().iter().zip(&basis) {
                    for (acc, weight) in point.iter_mut().zip(column) {
                        *acc += f64::from(*value) * weight;
                    }
                }
                Ok(Coordinate2D::new(point[0], point[1]))
            })
            .collect()
    }
}
