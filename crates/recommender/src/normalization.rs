//! Global ranges used to scale numeric feature differences into [0, 1].

use crate::error::{EvaluationError, Result};
use data_loader::{Catalog, MovieRecord};
use serde::Serialize;
use tracing::warn;

/// max - min of the numeric features across the whole catalog.
///
/// A zero range means every movie shares the value; the matching feature
/// then contributes nothing to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NormalizationRanges {
    pub runtime: u32,
    pub year: i32,
}

impl NormalizationRanges {
    /// Scan the catalog once per feature
    pub fn compute(catalog: &Catalog) -> Result<Self> {
        let ranges = Self {
            runtime: runtime_range(catalog)?,
            year: year_range(catalog)?,
        };

        if ranges.runtime == 0 {
            warn!("All runtimes are identical, runtime will not affect similarity");
        }
        if ranges.year == 0 {
            warn!("All release years are identical, release year will not affect similarity");
        }

        Ok(ranges)
    }
}

/// Difference between the longest and the shortest runtime
pub fn runtime_range(catalog: &Catalog) -> Result<u32> {
    let (min, max) = catalog
        .iter()
        .map(|(_, movie)| movie.runtime)
        .fold(None, |acc, runtime| match acc {
            None => Some((runtime, runtime)),
            Some((min, max)) => Some((min.min(runtime), max.max(runtime))),
        })
        .ok_or(EvaluationError::EmptyCatalog)?;

    Ok(max - min)
}

/// Difference between the latest and the earliest release year
pub fn year_range(catalog: &Catalog) -> Result<i32> {
    if catalog.is_empty() {
        return Err(EvaluationError::EmptyCatalog);
    }

    let mut min = i32::MAX;
    let mut max = i32::MIN;
    for (title, movie) in catalog.iter() {
        let year = release_year(title, movie)?;
        min = min.min(year);
        max = max.max(year);
    }

    Ok(max - min)
}

/// Release year of a movie, or an error naming the offending title
pub(crate) fn release_year(title: &str, movie: &MovieRecord) -> Result<i32> {
    movie
        .release_year()
        .ok_or_else(|| EvaluationError::InvalidReleaseDate {
            title: title.to_string(),
            release_date: movie.release_date.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(runtime: u32, release_date: &str) -> MovieRecord {
        MovieRecord {
            runtime,
            original_language: "en".to_string(),
            release_date: release_date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_ranges() {
        let mut catalog = Catalog::new();
        catalog.insert_movie("Short", movie(80, "1985-06-01"));
        catalog.insert_movie("Medium", movie(120, "2010-01-01"));
        catalog.insert_movie("Long", movie(200, "1999-12-31"));

        let ranges = NormalizationRanges::compute(&catalog).unwrap();
        assert_eq!(ranges.runtime, 120);
        assert_eq!(ranges.year, 25);
    }

    #[test]
    fn test_single_movie_has_zero_ranges() {
        let mut catalog = Catalog::new();
        catalog.insert_movie("Only", movie(95, "2001-01-01"));

        let ranges = NormalizationRanges::compute(&catalog).unwrap();
        assert_eq!(ranges, NormalizationRanges { runtime: 0, year: 0 });
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(matches!(
            runtime_range(&catalog),
            Err(EvaluationError::EmptyCatalog)
        ));
        assert!(matches!(
            year_range(&catalog),
            Err(EvaluationError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_invalid_release_date() {
        let mut catalog = Catalog::new();
        catalog.insert_movie("Undated", movie(95, "TBA"));

        let err = year_range(&catalog).unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::InvalidReleaseDate { ref title, .. } if title == "Undated"
        ));
    }
}
