//! Fold-based self-evaluation.
//!
//! ## Algorithm
//! 1. Take the rated titles in rating order, shuffled if configured
//! 2. Split them into `num_folds` contiguous, near-equal parts
//! 3. For each part, classify every title in it using the rated titles
//!    outside the part as candidates
//! 4. A prediction succeeds when "recommend" matches "liked"
//! 5. Fold accuracy = successes / fold size * 100; the overall accuracy is
//!    the plain mean of the fold accuracies, not weighted by fold size

use crate::classifier::MajorityVote;
use crate::config::EvaluationConfig;
use crate::error::{EvaluationError, Result};
use crate::neighbors::{NeighborFinder, RatedNeighbor};
use crate::normalization::NormalizationRanges;
use crate::recommend::{check_rated_titles, vote};
use crate::similarity::SimilarityScorer;
use crate::traits::Classifier;
use data_loader::{Catalog, Label, RatingsMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Split `items` into `parts` contiguous chunks whose sizes differ by at most one.
///
/// The first `items.len() % parts` chunks get the extra element. With more
/// parts than items the trailing chunks are empty.
pub fn partition<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }

    let base = items.len() / parts;
    let extra = items.len() % parts;

    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let size = base + usize::from(i < extra);
        chunks.push(&items[start..start + size]);
        start += size;
    }
    chunks
}

/// Outcome for one held-out title
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub title: String,
    pub label: Label,
    pub recommended: bool,
    pub success: bool,
    pub neighbors: Vec<RatedNeighbor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoldReport {
    /// 0-based position of the fold
    pub index: usize,
    pub size: usize,
    pub successes: usize,
    /// Percentage in [0, 100]
    pub accuracy: f64,
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub folds: Vec<FoldReport>,
    /// Unweighted mean of the fold accuracies, in [0, 100]
    pub overall_accuracy: f64,
}

impl EvaluationReport {
    pub fn fold_accuracies(&self) -> Vec<f64> {
        self.folds.iter().map(|fold| fold.accuracy).collect()
    }

    /// Successes across all folds (for a size-weighted view)
    pub fn total_successes(&self) -> usize {
        self.folds.iter().map(|fold| fold.successes).sum()
    }
}

/// Runs the k-fold evaluation over one user's ratings.
pub struct CrossValidator<'a> {
    catalog: &'a Catalog,
    ratings: &'a RatingsMap,
    config: EvaluationConfig,
    classifier: Box<dyn Classifier>,
}

impl<'a> CrossValidator<'a> {
    pub fn new(catalog: &'a Catalog, ratings: &'a RatingsMap, config: EvaluationConfig) -> Self {
        Self {
            catalog,
            ratings,
            config,
            classifier: Box::new(MajorityVote),
        }
    }

    /// Replace the default majority vote (builder pattern)
    pub fn with_classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Run the evaluation.
    ///
    /// Fails before any scoring if the configuration doesn't fit the data:
    /// bad fold or neighbor counts, invalid weights, an empty catalog, a
    /// rated title without metadata, or an unparseable release date.
    #[instrument(skip(self), fields(
        rated = self.ratings.len(),
        num_folds = self.config.num_folds,
        k = self.config.num_neighbors
    ))]
    pub fn evaluate(&self) -> Result<EvaluationReport> {
        let start = Instant::now();

        self.config.validate(self.ratings.len())?;
        check_rated_titles(self.catalog, self.ratings)?;

        let ranges = NormalizationRanges::compute(self.catalog)?;
        debug!(
            "Normalization ranges: runtime={}, year={}",
            ranges.runtime, ranges.year
        );
        let finder = NeighborFinder::new(SimilarityScorer::new(
            self.catalog,
            &self.config.weights,
            ranges,
        ));

        let titles = self.ordered_titles();
        let parts = partition(&titles, self.config.num_folds);
        self.report(format_args!("Number of parts: {}", parts.len()));

        let mut folds = Vec::with_capacity(parts.len());
        for (index, part) in parts.iter().enumerate() {
            let fold = self.evaluate_fold(index, part, &titles, &finder)?;
            self.report(format_args!(
                "Success part {}: {:.2}%.",
                index + 1,
                fold.accuracy
            ));
            folds.push(fold);
        }

        let overall_accuracy = mean_accuracy(&folds);
        self.report(format_args!(
            "Average success in all parts: {}%.",
            overall_accuracy
        ));
        debug!("Evaluation finished in {:.2?}", start.elapsed());

        Ok(EvaluationReport {
            folds,
            overall_accuracy,
        })
    }

    /// Rated titles in rating order, shuffled if configured
    fn ordered_titles(&self) -> Vec<String> {
        let mut titles = self.ratings.titles();
        if self.config.shuffle {
            match self.config.seed {
                Some(seed) => titles.shuffle(&mut StdRng::seed_from_u64(seed)),
                None => titles.shuffle(&mut rand::rng()),
            }
        }
        titles
    }

    /// Classify every title in `part` against the rated titles outside it
    fn evaluate_fold(
        &self,
        index: usize,
        part: &[String],
        titles: &[String],
        finder: &NeighborFinder<'_>,
    ) -> Result<FoldReport> {
        let held_out: HashSet<&str> = part.iter().map(String::as_str).collect();
        let base: Vec<&str> = titles
            .iter()
            .map(String::as_str)
            .filter(|title| !held_out.contains(title))
            .collect();

        // Each prediction is independent; collect keeps fold order
        let predictions = part
            .par_iter()
            .map(|title| self.predict(title, &base, finder))
            .collect::<Result<Vec<Prediction>>>()?;

        let successes = predictions.iter().filter(|p| p.success).count();
        let accuracy = if predictions.is_empty() {
            0.0
        } else {
            successes as f64 / predictions.len() as f64 * 100.0
        };

        Ok(FoldReport {
            index,
            size: predictions.len(),
            successes,
            accuracy,
            predictions,
        })
    }

    fn predict(&self, title: &str, base: &[&str], finder: &NeighborFinder<'_>) -> Result<Prediction> {
        let label = self
            .ratings
            .get(title)
            .ok_or_else(|| EvaluationError::MissingRating {
                title: title.to_string(),
            })?;

        let (neighbors, recommended) = vote(
            finder,
            self.ratings,
            self.classifier.as_ref(),
            title,
            base,
            self.config.num_neighbors,
        )?;

        Ok(Prediction {
            title: title.to_string(),
            label,
            recommended,
            success: recommended == label.is_liked(),
            neighbors,
        })
    }

    fn report(&self, message: std::fmt::Arguments<'_>) {
        if self.config.verbose {
            info!("{}", message);
        } else {
            debug!("{}", message);
        }
    }
}

/// Plain mean over non-empty folds
fn mean_accuracy(folds: &[FoldReport]) -> f64 {
    let counted: Vec<f64> = folds
        .iter()
        .filter(|fold| fold.size > 0)
        .map(|fold| fold.accuracy)
        .collect();

    if counted.is_empty() {
        0.0
    } else {
        counted.iter().sum::<f64>() / counted.len() as f64
    }
}
