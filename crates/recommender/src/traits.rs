//! Core traits for the recommender.
//!
//! This module defines the Classifier trait that turns the ratings of a
//! movie's nearest neighbors into a recommend / don't-recommend decision.

use data_loader::Label;

/// Decides whether to recommend a movie from its neighbors' labels.
///
/// ## Design Note
/// - `Send + Sync` lets one classifier be shared by the parallel
///   per-movie work inside a fold
/// - Labels arrive nearest first
pub trait Classifier: Send + Sync {
    /// Returns the name of this classifier (for logging/debugging)
    fn name(&self) -> &str;

    /// Returns true to recommend the movie
    fn classify(&self, neighbor_labels: &[Label]) -> bool;
}
