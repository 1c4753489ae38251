//! Predict whether the user would like a single movie.
//!
//! The movie is compared against everything the user has rated (except
//! itself); its nearest rated neighbors then vote.

use crate::classifier::MajorityVote;
use crate::error::{EvaluationError, Result};
use crate::neighbors::{Neighbor, NeighborFinder, RatedNeighbor};
use crate::normalization::NormalizationRanges;
use crate::similarity::{FeatureWeights, ScoreBreakdown, SimilarityScorer};
use crate::traits::Classifier;
use data_loader::{Catalog, Label, RatingsMap};
use serde::Serialize;
use tracing::{debug, instrument};

/// Outcome of a single prediction
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub recommended: bool,
    /// The user's own rating of the title, if there is one
    pub rated: Option<Label>,
    pub liked_neighbors: usize,
    /// Nearest first
    pub neighbors: Vec<RatedNeighbor>,
}

/// Predicts the user's opinion of any catalog title.
pub struct Recommender<'a> {
    catalog: &'a Catalog,
    ratings: &'a RatingsMap,
    weights: FeatureWeights,
    num_neighbors: usize,
    ranges: NormalizationRanges,
    classifier: Box<dyn Classifier>,
}

impl<'a> Recommender<'a> {
    /// Create a new Recommender
    ///
    /// # Arguments
    /// * `catalog` - Metadata for every movie that may be scored
    /// * `ratings` - The user's ratings; every title must be in the catalog
    /// * `weights` - Feature importance
    /// * `num_neighbors` - How many rated neighbors vote (typically 5)
    pub fn new(
        catalog: &'a Catalog,
        ratings: &'a RatingsMap,
        weights: FeatureWeights,
        num_neighbors: usize,
    ) -> Result<Self> {
        if num_neighbors == 0 {
            return Err(EvaluationError::InvalidNeighborCount);
        }
        weights.validate()?;
        check_rated_titles(catalog, ratings)?;
        let ranges = NormalizationRanges::compute(catalog)?;

        Ok(Self {
            catalog,
            ratings,
            weights,
            num_neighbors,
            ranges,
            classifier: Box::new(MajorityVote),
        })
    }

    /// Replace the default majority vote (builder pattern)
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    fn finder(&self) -> NeighborFinder<'_> {
        NeighborFinder::new(SimilarityScorer::new(self.catalog, &self.weights, self.ranges))
    }

    /// Classify `title` using every other rated title as a candidate
    #[instrument(skip(self))]
    pub fn predict(&self, title: &str) -> Result<Recommendation> {
        let candidates = self.candidates_for(title)?;
        let (neighbors, recommended) = vote(
            &self.finder(),
            self.ratings,
            self.classifier.as_ref(),
            title,
            &candidates,
            self.num_neighbors,
        )?;

        let liked_neighbors = neighbors.iter().filter(|n| n.label.is_liked()).count();
        debug!(
            "{}: {} of {} neighbors liked, recommended={}",
            self.classifier.name(),
            liked_neighbors,
            neighbors.len(),
            recommended
        );

        Ok(Recommendation {
            title: title.to_string(),
            recommended,
            rated: self.ratings.get(title),
            liked_neighbors,
            neighbors,
        })
    }

    /// The `limit` rated titles closest to `title`, nearest first
    pub fn nearest(&self, title: &str, limit: usize) -> Result<Vec<RatedNeighbor>> {
        let candidates = self.candidates_for(title)?;
        let neighbors = self.finder().find_k_nearest(title, &candidates, limit)?;
        rate_neighbors(self.ratings, neighbors)
    }

    /// Per-feature partial scores of `movie_a` against `movie_b`
    pub fn explain(&self, movie_a: &str, movie_b: &str) -> Result<ScoreBreakdown> {
        self.finder().scorer().breakdown(movie_a, movie_b)
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    fn candidates_for(&self, title: &str) -> Result<Vec<&'a str>> {
        if !self.catalog.contains(title) {
            return Err(EvaluationError::MissingTitle {
                title: title.to_string(),
            });
        }

        let candidates: Vec<&'a str> = self
            .ratings
            .iter()
            .map(|(rated, _)| rated)
            .filter(|&rated| rated != title)
            .collect();

        if candidates.is_empty() {
            return Err(EvaluationError::EmptyCandidatePool {
                title: title.to_string(),
            });
        }
        Ok(candidates)
    }
}

/// Find the nearest candidates and let their labels vote
pub(crate) fn vote<T: AsRef<str>>(
    finder: &NeighborFinder<'_>,
    ratings: &RatingsMap,
    classifier: &dyn Classifier,
    title: &str,
    candidates: &[T],
    k: usize,
) -> Result<(Vec<RatedNeighbor>, bool)> {
    let neighbors = rate_neighbors(ratings, finder.find_k_nearest(title, candidates, k)?)?;
    let labels: Vec<Label> = neighbors.iter().map(|n| n.label).collect();
    let recommended = classifier.classify(&labels);
    Ok((neighbors, recommended))
}

fn rate_neighbors(
    ratings: &RatingsMap,
    neighbors: Vec<Neighbor>,
) -> Result<Vec<RatedNeighbor>> {
    neighbors
        .into_iter()
        .map(|neighbor| {
            let label = ratings
                .get(&neighbor.title)
                .ok_or_else(|| EvaluationError::MissingRating {
                    title: neighbor.title.clone(),
                })?;
            Ok(RatedNeighbor {
                title: neighbor.title,
                score: neighbor.score,
                label,
            })
        })
        .collect()
}

/// Every rated title must have catalog metadata
pub(crate) fn check_rated_titles(catalog: &Catalog, ratings: &RatingsMap) -> Result<()> {
    match ratings.iter().find(|(title, _)| !catalog.contains(title)) {
        Some((title, _)) => Err(EvaluationError::MissingTitle {
            title: title.to_string(),
        }),
        None => Ok(()),
    }
}
