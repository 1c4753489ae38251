//! Settings for one cross-validation run.

use crate::error::{EvaluationError, Result};
use crate::similarity::{DEFAULT_WEIGHTS, FeatureWeights};
use serde::{Deserialize, Serialize};

/// Number of parts the rated set is split into
pub const DEFAULT_NUM_FOLDS: usize = 10;

/// Neighbors consulted per prediction
pub const DEFAULT_NUM_NEIGHBORS: usize = 5;

/// Everything a caller can tune about an evaluation run.
///
/// Missing fields in a serialized config take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub num_folds: usize,
    pub num_neighbors: usize,
    /// Shuffle the rated titles before splitting them into folds
    pub shuffle: bool,
    /// Seed for the shuffle; `None` draws from the thread RNG
    pub seed: Option<u64>,
    pub weights: FeatureWeights,
    /// Log per-fold results at info level instead of debug
    pub verbose: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            num_folds: DEFAULT_NUM_FOLDS,
            num_neighbors: DEFAULT_NUM_NEIGHBORS,
            shuffle: true,
            seed: None,
            weights: DEFAULT_WEIGHTS,
            verbose: true,
        }
    }
}

impl EvaluationConfig {
    /// Configure the number of folds (default: 10)
    pub fn with_num_folds(mut self, num_folds: usize) -> Self {
        self.num_folds = num_folds;
        self
    }

    /// Configure the number of neighbors (default: 5)
    pub fn with_num_neighbors(mut self, num_neighbors: usize) -> Self {
        self.num_neighbors = num_neighbors;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Make the shuffle reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_weights(mut self, weights: FeatureWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check the settings against the number of rated titles
    ///
    /// Every fold needs at least one title and must leave at least one
    /// title outside it to compare against.
    pub fn validate(&self, rated: usize) -> Result<()> {
        if self.num_folds < 2 || self.num_folds > rated {
            return Err(EvaluationError::InvalidFoldCount {
                num_folds: self.num_folds,
                rated,
            });
        }
        if self.num_neighbors == 0 {
            return Err(EvaluationError::InvalidNeighborCount);
        }
        self.weights.validate()
    }
}
