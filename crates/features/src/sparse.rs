//! Sparse feature vectors.

/// A sparse vector of `(term index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from unsorted entries; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight at a term index, 0.0 when absent
    pub fn get(&self, index: u32) -> f32 {
        self.entries
            .binary_search_by_key(&index, |&(idx, _)| idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product with another sparse vector (merge over sorted indices).
    ///
    /// Products are summed in `f64` in increasing index order, so `a.dot(b)`
    /// and `b.dot(a)` are bit-for-bit equal.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f64;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(a_w) * f64::from(b_w);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum as f32
    }

    /// Dot product with a dense vector; indices past its end count as zero
    pub fn dot_dense(&self, dense: &[f32]) -> f32 {
        self.entries
            .iter()
            .filter_map(|&(idx, w)| dense.get(idx as usize).map(|d| w * d))
            .sum()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// `dense += scale * self`
    pub fn add_scaled_to(&self, dense: &mut [f32], scale: f32) {
        for &(idx, w) in &self.entries {
            if let Some(slot) = dense.get_mut(idx as usize) {
                *slot += scale * w;
            }
        }
    }
}

/// Euclidean norm of a dense vector
pub fn dense_norm(dense: &[f32]) -> f32 {
    dense.iter().map(|v| v * v).sum::<f32>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_drops_zeros() {
        let v = SparseVector::from_entries(vec![(5, 1.0), (1, 2.0), (3, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (5, 1.0)]);
        assert_eq!(v.get(3), 0.0);
        assert_eq!(v.get(5), 1.0);
    }

    #[test]
    fn test_dot() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 2.0), (4, 3.0)]);
        let b = SparseVector::from_entries(vec![(2, 4.0), (3, 1.0), (4, 0.5)]);
        assert_eq!(a.dot(&b), 9.5);
        assert_eq!(a.dot(&b), b.dot(&a));
        assert_eq!(a.dot(&SparseVector::default()), 0.0);
    }

    #[test]
    fn test_dense_ops() {
        let a = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]);
        assert_eq!(a.norm(), 5.0);

        let mut dense = vec![0.0; 3];
        a.add_scaled_to(&mut dense, 2.0);
        assert_eq!(dense, vec![6.0, 8.0, 0.0]);
        assert_eq!(a.dot_dense(&dense), 50.0);
        assert_eq!(dense_norm(&dense), 10.0);
    }
}
