//! # Recommender Crate
//!
//! Case-based reasoning over a user's binary movie ratings: a movie is
//! recommended when most of its nearest already-rated movies were liked.
//!
//! ## Components
//!
//! - **normalization**: catalog-wide runtime and year ranges
//! - **similarity**: weighted dissimilarity over seven movie features
//! - **neighbors**: k-nearest-neighbor retrieval with stable tie-breaking
//! - **classifier**: majority vote over the neighbors' labels
//! - **cross_validation**: fold-based accuracy of the whole scheme
//! - **recommend**: predictions for single titles
//!
//! ## Data flow
//! CrossValidator -> NeighborFinder -> SimilarityScorer (with
//! NormalizationRanges) -> Classifier -> accuracy aggregation
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use recommender::{CrossValidator, EvaluationConfig};
//!
//! let dataset = Dataset::load_from_files(catalog_path, ratings_path)?;
//! let config = EvaluationConfig::default().with_seed(42);
//!
//! let report = CrossValidator::new(&dataset.catalog, &dataset.ratings, config).evaluate()?;
//! println!("Average success: {:.2}%", report.overall_accuracy);
//! ```

pub mod classifier;
pub mod config;
pub mod cross_validation;
pub mod error;
pub mod neighbors;
pub mod normalization;
pub mod recommend;
pub mod similarity;
pub mod traits;

// Re-export main types
pub use classifier::MajorityVote;
pub use config::{DEFAULT_NUM_FOLDS, DEFAULT_NUM_NEIGHBORS, EvaluationConfig};
pub use cross_validation::{CrossValidator, EvaluationReport, FoldReport, Prediction, partition};
pub use error::{EvaluationError, Result};
pub use neighbors::{Neighbor, NeighborFinder, RatedNeighbor};
pub use normalization::NormalizationRanges;
pub use recommend::{Recommendation, Recommender};
pub use similarity::{DEFAULT_WEIGHTS, Feature, FeatureWeights, ScoreBreakdown, SimilarityScorer};
pub use traits::Classifier;
