//! Dataset loading and validation.
//!
//! This module builds a [`Dataset`] from the two input files:
//! - Parse the catalog and the ratings (in parallel)
//! - Validate that every rated title has catalog metadata
//!
//! Rust concepts you'll learn:
//! - Using Rayon's `join` for fork/join parallelism
//! - Propagating errors out of parallel closures with `?`

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl Dataset {
    /// Load the catalog and the ratings from disk
    ///
    /// Steps:
    /// 1. Parse both files IN PARALLEL using Rayon
    /// 2. Build the Dataset
    /// 3. Validate data integrity
    pub fn load_from_files(catalog_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            "Loading catalog from {:?} and ratings from {:?}",
            catalog_path, ratings_path
        );

        // Rayon's `join` runs two closures in parallel
        let (catalog, ratings) = rayon::join(
            || parser::parse_catalog(catalog_path),
            || parser::parse_ratings(ratings_path),
        );

        // Handle errors from parallel parsing
        let dataset = Dataset::new(catalog?, ratings?);

        let (movies, rated, liked) = dataset.counts();
        info!(
            "Loaded {} movies, {} ratings ({} liked)",
            movies, rated, liked
        );

        dataset.validate()?;

        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - The catalog is not empty
    /// - Every rated title exists in the catalog
    ///
    /// Returns Ok(()) if valid, Err on the first issue found
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(DataLoadError::ValidationError(
                "catalog contains no movies".to_string(),
            ));
        }

        for (title, _) in self.ratings.iter() {
            if !self.catalog.contains(title) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    title: title.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(runtime: u32) -> MovieRecord {
        MovieRecord {
            runtime,
            original_language: "en".to_string(),
            release_date: "2000-01-01".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_ok() {
        let mut dataset = Dataset::default();
        dataset.catalog.insert_movie("Heat", movie(170));
        dataset.ratings.insert("Heat", Label::Liked);

        assert!(dataset.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_title() {
        let mut dataset = Dataset::default();
        dataset.catalog.insert_movie("Heat", movie(170));
        dataset.ratings.insert("Ronin", Label::Disliked);

        let err = dataset.validate().unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingReference { ref title, .. } if title == "Ronin"
        ));
    }

    #[test]
    fn test_validate_empty_catalog() {
        let dataset = Dataset::default();
        assert!(matches!(
            dataset.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_files() {
        let err = Dataset::load_from_files(
            Path::new("does/not/exist.json"),
            Path::new("does/not/exist.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual data files
        // Place them in ../../data/
        let catalog_path = Path::new("../../data/movie_features.json");
        let ratings_path = Path::new("../../data/ratings.csv");

        if catalog_path.exists() && ratings_path.exists() {
            let dataset = Dataset::load_from_files(catalog_path, ratings_path).unwrap();
            let (movies, rated, _) = dataset.counts();

            assert!(movies > 0);
            assert!(rated <= movies);
        }
    }
}
