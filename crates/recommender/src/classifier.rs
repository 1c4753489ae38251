//! Majority vote over the nearest neighbors.

use crate::traits::Classifier;
use data_loader::Label;

/// Recommends when at least half of the neighbors, rounded up, are liked.
///
/// ## Threshold
/// `liked >= ceil(n / 2)`: 3 of 5 is enough, and so is exactly 2 of 4.
/// With no neighbors the threshold is 0 and the vote recommends.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;

impl MajorityVote {
    /// Liked neighbors needed out of `neighbor_count`
    pub fn threshold(neighbor_count: usize) -> usize {
        neighbor_count.div_ceil(2)
    }
}

impl Classifier for MajorityVote {
    fn name(&self) -> &str {
        "MajorityVote"
    }

    fn classify(&self, neighbor_labels: &[Label]) -> bool {
        let liked = neighbor_labels.iter().filter(|label| label.is_liked()).count();
        liked >= Self::threshold(neighbor_labels.len())
    }
}
