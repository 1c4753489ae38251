//! Weighted dissimilarity between two movies.
//!
//! Each of the seven features yields a partial score in [0, 1]; the total
//! is the weighted sum of the partials. Lower means more similar.
//!
//! ## Per-feature rules
//! - runtime, release year: `|a - b| / range` (0 when the range is 0)
//! - language: 0 if the codes match, else 1
//! - genre, actors, directors, keywords: the fraction of A's items that B
//!   doesn't share, or 0 when A has none. Only A's size is used, so
//!   `score(A, B)` and `score(B, A)` can differ.

use crate::error::{EvaluationError, Result};
use crate::normalization::{NormalizationRanges, release_year};
use data_loader::{Catalog, MovieRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The movie features that take part in the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Runtime,
    Language,
    ReleaseYear,
    Genre,
    Actors,
    Directors,
    Keywords,
}

impl Feature {
    /// All features, in the order their contributions are summed
    pub const ALL: [Feature; 7] = [
        Feature::Runtime,
        Feature::Language,
        Feature::ReleaseYear,
        Feature::Genre,
        Feature::Actors,
        Feature::Directors,
        Feature::Keywords,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Runtime => "runtime",
            Feature::Language => "language",
            Feature::ReleaseYear => "release_year",
            Feature::Genre => "genre",
            Feature::Actors => "actors",
            Feature::Directors => "directors",
            Feature::Keywords => "keywords",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Weights
// =============================================================================

/// Importance of each feature.
///
/// Weights are not normalized, so the scale of a total score depends on
/// the weights in use. Missing keys in a serialized table fall back to
/// [`DEFAULT_WEIGHTS`]; unknown keys are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureWeights {
    pub runtime: f64,
    pub language: f64,
    pub release_year: f64,
    pub genre: f64,
    pub actors: f64,
    pub directors: f64,
    pub keywords: f64,
}

pub const DEFAULT_WEIGHTS: FeatureWeights = FeatureWeights {
    runtime: 2.0,
    language: 3.0,
    release_year: 6.0,
    genre: 1.0,
    actors: 5.0,
    directors: 6.0,
    keywords: 3.0,
};

impl Default for FeatureWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl FeatureWeights {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Runtime => self.runtime,
            Feature::Language => self.language,
            Feature::ReleaseYear => self.release_year,
            Feature::Genre => self.genre,
            Feature::Actors => self.actors,
            Feature::Directors => self.directors,
            Feature::Keywords => self.keywords,
        }
    }

    /// Replace one weight (builder pattern)
    pub fn with_weight(mut self, feature: Feature, weight: f64) -> Self {
        let slot = match feature {
            Feature::Runtime => &mut self.runtime,
            Feature::Language => &mut self.language,
            Feature::ReleaseYear => &mut self.release_year,
            Feature::Genre => &mut self.genre,
            Feature::Actors => &mut self.actors,
            Feature::Directors => &mut self.directors,
            Feature::Keywords => &mut self.keywords,
        };
        *slot = weight;
        self
    }

    /// Every weight must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for feature in Feature::ALL {
            let value = self.get(feature);
            if !value.is_finite() || value < 0.0 {
                return Err(EvaluationError::InvalidWeight { feature, value });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Partial scores
// =============================================================================

/// Unweighted partial scores of one movie against another
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub runtime: f64,
    pub language: f64,
    pub release_year: f64,
    pub genre: f64,
    pub actors: f64,
    pub directors: f64,
    pub keywords: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Runtime => self.runtime,
            Feature::Language => self.language,
            Feature::ReleaseYear => self.release_year,
            Feature::Genre => self.genre,
            Feature::Actors => self.actors,
            Feature::Directors => self.directors,
            Feature::Keywords => self.keywords,
        }
    }

    /// Sum of partial * weight over all features, in [`Feature::ALL`] order
    pub fn weighted_total(&self, weights: &FeatureWeights) -> f64 {
        Feature::ALL
            .iter()
            .fold(0.0, |total, &feature| {
                total + self.get(feature) * weights.get(feature)
            })
    }
}

// =============================================================================
// Scorer
// =============================================================================

/// Scores pairs of catalog titles.
///
/// Borrows the catalog and the weights; the ranges are computed once per
/// run and copied in. Cheap to copy and safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer<'a> {
    catalog: &'a Catalog,
    weights: &'a FeatureWeights,
    ranges: NormalizationRanges,
}

impl<'a> SimilarityScorer<'a> {
    pub fn new(
        catalog: &'a Catalog,
        weights: &'a FeatureWeights,
        ranges: NormalizationRanges,
    ) -> Self {
        Self {
            catalog,
            weights,
            ranges,
        }
    }

    /// Build a scorer, computing the normalization ranges from the catalog
    pub fn from_catalog(catalog: &'a Catalog, weights: &'a FeatureWeights) -> Result<Self> {
        weights.validate()?;
        let ranges = NormalizationRanges::compute(catalog)?;
        Ok(Self::new(catalog, weights, ranges))
    }

    pub fn ranges(&self) -> NormalizationRanges {
        self.ranges
    }

    pub fn weights(&self) -> &FeatureWeights {
        self.weights
    }

    /// Dissimilarity of `movie_a` against `movie_b` (0 means identical)
    pub fn score(&self, movie_a: &str, movie_b: &str) -> Result<f64> {
        Ok(self.breakdown(movie_a, movie_b)?.weighted_total(self.weights))
    }

    /// Per-feature partial scores of `movie_a` against `movie_b`
    pub fn breakdown(&self, movie_a: &str, movie_b: &str) -> Result<ScoreBreakdown> {
        let a = self.movie(movie_a)?;
        let b = self.movie(movie_b)?;

        let year_a = release_year(movie_a, a)?;
        let year_b = release_year(movie_b, b)?;

        Ok(ScoreBreakdown {
            runtime: scaled_difference(
                f64::from(a.runtime),
                f64::from(b.runtime),
                f64::from(self.ranges.runtime),
            ),
            language: if a.original_language == b.original_language {
                0.0
            } else {
                1.0
            },
            release_year: scaled_difference(
                f64::from(year_a),
                f64::from(year_b),
                f64::from(self.ranges.year),
            ),
            genre: unshared_fraction(&a.genres, &b.genres),
            actors: unshared_fraction(&a.actors, &b.actors),
            directors: unshared_fraction(&a.directors, &b.directors),
            keywords: unshared_fraction(&a.keywords, &b.keywords),
        })
    }

    fn movie(&self, title: &str) -> Result<&'a MovieRecord> {
        self.catalog
            .get_movie(title)
            .ok_or_else(|| EvaluationError::MissingTitle {
                title: title.to_string(),
            })
    }
}

/// `|a - b| / range`, or 0 when the range is 0
fn scaled_difference(a: f64, b: f64, range: f64) -> f64 {
    if range == 0.0 {
        0.0
    } else {
        (a - b).abs() / range
    }
}

/// Fraction of `a`'s items missing from `b`; 0 when `a` is empty
fn unshared_fraction(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    (a.len() - shared) as f64 / a.len() as f64
}
