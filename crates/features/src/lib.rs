//! # Features Crate
//!
//! Turns catalog movies into TF-IDF vectors and caches their pairwise
//! similarities.
//!
//! ## Main Components
//!
//! - **stopwords**: built-in English stop word list
//! - **vectorizer**: tokenizer and `TfidfVectorizer` (smoothed IDF, L2 norm)
//! - **sparse**: `SparseVector` and the dot products used for scoring
//! - **similarity**: dense linear-kernel `SimilarityMatrix`
//! - **model**: `FeatureModel`, the per-catalog bundle of all of the above
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use features::{FeatureConfig, FeatureModel};
//!
//! let catalog = Catalog::load_from_file(Path::new("data/movies_data.csv"))?;
//! let model = FeatureModel::build(&catalog, &FeatureConfig::default());
//!
//! let position = catalog.position(42).unwrap();
//! let row = model.similarity_row(position).unwrap();
//! ```
//!
//! ## Performance
//!
//! The similarity matrix is O(N²) in memory and build time. Rows are
//! computed in parallel with rayon.

pub mod stopwords;
pub mod sparse;
pub mod vectorizer;
pub mod similarity;
pub mod model;

pub use model::{FeatureConfig, FeatureModel};
pub use similarity::SimilarityMatrix;
pub use sparse::SparseVector;
pub use vectorizer::{tokenize, TfidfVectorizer, DEFAULT_MAX_FEATURES};
