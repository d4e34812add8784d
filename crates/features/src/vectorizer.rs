//! TF-IDF vectorizer.
//!
//! ```text
//! tfidf(t, d) = count(t, d) × idf(t)
//! idf(t)      = ln((1 + N) / (1 + df(t))) + 1
//! ```
//! Each document vector is then L2-normalized, so a dot product between two
//! vectors is their cosine similarity.

use crate::sparse::SparseVector;
use crate::stopwords::is_stop_word;
use rayon::prelude::*;
use std::collections::HashMap;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Split text into lower-cased word tokens.
///
/// A token is a run of two or more alphanumeric/underscore characters;
/// stop words are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| !is_stop_word(token))
        .map(String::from)
        .collect()
}

/// Learns a vocabulary and IDF weights from a corpus and turns documents
/// into normalized sparse TF-IDF vectors.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// `None` keeps every term
    max_features: Option<usize>,
    /// term -> column index (columns are in alphabetical term order)
    vocabulary: HashMap<String, u32>,
    /// IDF per column
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            max_features: Some(DEFAULT_MAX_FEATURES),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Cap the vocabulary to the `max_features` most frequent terms
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Learn the vocabulary and return one vector per document, in order.
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        self.fit_tokens(&tokenized);
        tokenized.iter().map(|tokens| self.vectorize(tokens)).collect()
    }

    /// Vectorize a new document against the learned vocabulary
    pub fn transform(&self, document: &str) -> SparseVector {
        self.vectorize(&tokenize(document))
    }

    fn fit_tokens(&mut self, tokenized: &[Vec<String>]) {
        let mut term_freq: HashMap<&str, usize> = HashMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();

        for tokens in tokenized {
            let mut seen: Vec<&str> = Vec::with_capacity(tokens.len());
            for token in tokens {
                *term_freq.entry(token.as_str()).or_insert(0) += 1;
                seen.push(token.as_str());
            }
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        // Most frequent terms first; ties broken alphabetically so the cap
        // is deterministic
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        if let Some(max) = self.max_features {
            ranked.truncate(max);
        }

        let mut terms: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort_unstable();

        let n_docs = tokenized.len() as f64;
        self.idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx as u32))
            .collect();
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<u32, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut weighted: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx as usize]))
            .collect();
        weighted.sort_unstable_by_key(|&(idx, _)| idx);

        let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            return SparseVector::default();
        }
        SparseVector::from_entries(
            weighted
                .into_iter()
                .map(|(idx, w)| (idx, (w / norm) as f32))
                .collect(),
        )
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column index of a term, if it made it into the vocabulary
    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// IDF of a vocabulary term
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx as usize])
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Action,Sci-Fi The dream-heist of Christopher Nolan x 42");
        assert_eq!(
            tokens,
            vec!["action", "sci", "fi", "dream", "heist", "christopher", "nolan", "42"]
        );
    }

    #[test]
    fn test_vocabulary_is_alphabetical() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["zebra apple", "mango"]);

        assert_eq!(vectorizer.vocabulary_size(), 3);
        assert_eq!(vectorizer.term_index("apple"), Some(0));
        assert_eq!(vectorizer.term_index("mango"), Some(1));
        assert_eq!(vectorizer.term_index("zebra"), Some(2));
    }

    #[test]
    fn test_smoothed_idf() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["action", "action", "drama"]);

        let action = vectorizer.idf("action").unwrap();
        let drama = vectorizer.idf("drama").unwrap();
        assert!((action - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((drama - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let mut vectorizer = TfidfVectorizer::new().with_max_features(Some(2));
        vectorizer.fit_transform(&["crime crime heist", "crime drama heist", "space"]);

        assert_eq!(vectorizer.vocabulary_size(), 2);
        assert!(vectorizer.term_index("crime").is_some());
        assert!(vectorizer.term_index("heist").is_some());
        assert!(vectorizer.term_index("space").is_none());
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&["war drama drama", "war comedy", ""]);

        assert!((vectors[0].norm() - 1.0).abs() < 1e-6);
        assert!((vectors[1].norm() - 1.0).abs() < 1e-6);
        assert!(vectors[2].is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let mut vectorizer = TfidfVectorizer::new();
        let docs: Vec<&str> = Vec::new();
        let vectors = vectorizer.fit_transform(&docs);

        assert!(vectors.is_empty());
        assert_eq!(vectorizer.vocabulary_size(), 0);
    }

    #[test]
    fn test_transform_unknown_terms() {
        let mut vectorizer = TfidfVectorizer::new();
        vectorizer.fit_transform(&["western"]);
        assert!(vectorizer.transform("musical").is_empty());
        assert_eq!(vectorizer.transform("Western").nnz(), 1);
    }
}
