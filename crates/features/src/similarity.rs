//! Pairwise similarity matrix.
//!
//! Scaling limit: the matrix is dense, O(N²) in both memory and build time.
//! At 10⁴ movies that is already 400 MB of `f32`; catalogs beyond roughly
//! that size need an approximate nearest-neighbor index instead.

use crate::sparse::SparseVector;
use rayon::prelude::*;

/// Dense, symmetric `N×N` matrix of linear-kernel similarities.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute the dot product of every pair of vectors.
    ///
    /// Rows are computed in parallel; each entry is a deterministic merge,
    /// so the result does not depend on scheduling. Inputs are unit vectors,
    /// so entries are capped at 1.0 to absorb rounding.
    pub fn linear_kernel(vectors: &[SparseVector]) -> Self {
        let size = vectors.len();
        let rows: Vec<Vec<f32>> = vectors
            .par_iter()
            .map(|a| vectors.iter().map(|b| a.dot(b).min(1.0)).collect())
            .collect();

        Self {
            size,
            values: rows.concat(),
        }
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.size && col < self.size {
            Some(self.values[row * self.size + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f32]> {
        if row < self.size {
            Some(&self.values[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }
}
