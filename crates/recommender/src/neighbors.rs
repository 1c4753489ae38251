//! k-nearest-neighbor retrieval over a candidate pool.

use crate::error::{EvaluationError, Result};
use crate::similarity::SimilarityScorer;
use data_loader::Label;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::trace;

/// A candidate and its dissimilarity to the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub title: String,
    pub score: f64,
}

/// A neighbor together with the user's rating of it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedNeighbor {
    pub title: String,
    pub score: f64,
    pub label: Label,
}

/// Ranks candidates by dissimilarity to a target movie.
#[derive(Debug, Clone, Copy)]
pub struct NeighborFinder<'a> {
    scorer: SimilarityScorer<'a>,
}

impl<'a> NeighborFinder<'a> {
    pub fn new(scorer: SimilarityScorer<'a>) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SimilarityScorer<'a> {
        &self.scorer
    }

    /// Return the `k` candidates with the lowest score against `target`.
    ///
    /// ## Algorithm
    /// 1. Score `target` against every candidate
    /// 2. Stable sort ascending, so equal scores keep candidate order
    /// 3. Keep the first `min(k, candidates.len())`
    ///
    /// The candidates are not deduplicated and `target` is not excluded;
    /// callers pass the pool they mean.
    pub fn find_k_nearest<T: AsRef<str>>(
        &self,
        target: &str,
        candidates: &[T],
        k: usize,
    ) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(EvaluationError::InvalidNeighborCount);
        }

        let mut scored = candidates
            .iter()
            .enumerate()
            .map(|(pos, candidate)| Ok((pos, self.scorer.score(target, candidate.as_ref())?)))
            .collect::<Result<Vec<(usize, f64)>>>()?;

        // `sort_by` is stable
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

        let neighbors: Vec<Neighbor> = scored
            .into_iter()
            .take(k)
            .map(|(pos, score)| Neighbor {
                title: candidates[pos].as_ref().to_string(),
                score,
            })
            .collect();

        trace!(
            "{} nearest of {} candidates for {:?}",
            neighbors.len(),
            candidates.len(),
            target
        );
        Ok(neighbors)
    }
}
