//! The Feature Model: one TF-IDF vector per catalog movie plus the cached
//! pairwise similarity matrix.
//!
//! Built once from a catalog and read-only afterwards. Everything is indexed
//! by catalog position, not by movie id.

use crate::similarity::SimilarityMatrix;
use crate::sparse::{dense_norm, SparseVector};
use crate::vectorizer::{TfidfVectorizer, DEFAULT_MAX_FEATURES};
use catalog::Catalog;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Knobs for building a `FeatureModel`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConfig {
    /// Vocabulary cap; `None` keeps every term
    pub max_features: Option<usize>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
        }
    }
}

impl FeatureConfig {
    /// A cap of zero means "no cap"
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = (max_features > 0).then_some(max_features);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FeatureModel {
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
    similarity: SimilarityMatrix,
}

impl FeatureModel {
    /// Vectorize every movie's feature text and compute all pairwise
    /// similarities.
    #[instrument(skip(catalog), fields(movies = catalog.len()))]
    pub fn build(catalog: &Catalog, config: &FeatureConfig) -> Self {
        let start = Instant::now();

        let documents: Vec<&str> = catalog
            .movies()
            .iter()
            .map(|m| m.feature_text.as_str())
            .collect();

        let mut vectorizer = TfidfVectorizer::new().with_max_features(config.max_features);
        let vectors = vectorizer.fit_transform(&documents);
        debug!(
            "Vectorized {} movies over {} terms",
            vectors.len(),
            vectorizer.vocabulary_size()
        );

        let similarity = SimilarityMatrix::linear_kernel(&vectors);

        info!(
            "Feature model built: {} movies, {} terms in {:?}",
            vectors.len(),
            vectorizer.vocabulary_size(),
            start.elapsed()
        );

        Self {
            vectorizer,
            vectors,
            similarity,
        }
    }

    /// Number of movies the model covers
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vectorizer.term_index(term)
    }

    /// Feature vector of the movie at a catalog position
    pub fn vector(&self, position: usize) -> Option<&SparseVector> {
        self.vectors.get(position)
    }

    /// Similarities between one movie and every movie, in catalog order
    pub fn similarity_row(&self, position: usize) -> Option<&[f32]> {
        self.similarity.row(position)
    }

    pub fn similarity(&self, a: usize, b: usize) -> Option<f32> {
        self.similarity.get(a, b)
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Cosine similarity between a movie's vector and a dense vector in the
    /// same term space. Zero when either side has zero norm.
    pub fn cosine_to_dense(&self, position: usize, dense: &[f32]) -> f32 {
        let Some(vector) = self.vectors.get(position) else {
            return 0.0;
        };
        let norms = vector.norm() * dense_norm(dense);
        if norms == 0.0 {
            return 0.0;
        }
        vector.dot_dense(dense) / norms
    }
}
