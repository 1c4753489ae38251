//! Error types for the recommender crate.
//!
//! Every variant is a configuration or data error: the computation itself
//! is pure, so nothing here is retried.

use crate::similarity::Feature;
use thiserror::Error;

/// Errors that can occur while scoring, classifying or cross-validating
#[derive(Error, Debug)]
pub enum EvaluationError {
    /// Normalization ranges need at least one movie
    #[error("Catalog is empty")]
    EmptyCatalog,

    /// A title was referenced that the catalog doesn't know
    #[error("Title {title:?} has no catalog entry")]
    MissingTitle { title: String },

    /// A neighbor was found that the user never rated
    #[error("Title {title:?} has no rating")]
    MissingRating { title: String },

    /// The release date has no leading year
    #[error("Invalid release date {release_date:?} for {title:?}")]
    InvalidReleaseDate { title: String, release_date: String },

    /// Folds must leave a non-empty candidate pool and may not be empty themselves
    #[error("Invalid number of folds {num_folds}: expected between 2 and {rated} (the number of rated titles)")]
    InvalidFoldCount { num_folds: usize, rated: usize },

    #[error("Number of neighbors must be at least 1")]
    InvalidNeighborCount,

    #[error("Invalid weight {value} for feature {feature}: weights must be finite and non-negative")]
    InvalidWeight { feature: Feature, value: f64 },

    /// Nothing rated is left to compare against
    #[error("No rated titles other than {title:?} to compare against")]
    EmptyCandidatePool { title: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, EvaluationError>;
