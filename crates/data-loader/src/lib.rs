//! # Data Loader Crate
//!
//! This crate handles loading the movie catalog and a user's binary ratings.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, Catalog, Label, RatingsMap, Dataset)
//! - **parser**: Parse the catalog JSON and the ratings CSV into Rust structs
//! - **dataset**: Load both files and validate referential integrity
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(
//!     Path::new("data/movie_features.json"),
//!     Path::new("data/ratings.csv"),
//! )?;
//!
//! let heat = dataset.catalog.get_movie("Heat").unwrap();
//! println!("Heat runs {} minutes", heat.runtime);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod dataset;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Catalog, Dataset, Label, MovieRecord, RatingsMap};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::default();
        let (movies, rated, liked) = dataset.counts();

        assert_eq!(movies, 0);
        assert_eq!(rated, 0);
        assert_eq!(liked, 0);
    }

    #[test]
    fn test_insert_movie() {
        let mut catalog = Catalog::new();

        let movie = MovieRecord {
            runtime: 81,
            original_language: "en".to_string(),
            release_date: "1995-10-30".to_string(),
            genres: ["Animation", "Comedy", "Family"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            ..Default::default()
        };

        catalog.insert_movie("Toy Story", movie);

        let retrieved = catalog.get_movie("Toy Story").unwrap();
        assert_eq!(retrieved.runtime, 81);
        assert_eq!(retrieved.release_year(), Some(1995));
        assert_eq!(retrieved.genres.len(), 3);
    }

    #[test]
    fn test_release_year_unparseable() {
        let movie = MovieRecord {
            release_date: "soon".to_string(),
            ..Default::default()
        };
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn test_ratings_keep_insertion_order() {
        let mut ratings = RatingsMap::new();
        ratings.insert("C", Label::Disliked);
        ratings.insert("A", Label::Liked);
        ratings.insert("B", Label::Liked);

        // Re-rating keeps the original position
        ratings.insert("C", Label::Liked);

        assert_eq!(ratings.titles(), vec!["C", "A", "B"]);
        assert_eq!(ratings.get("C"), Some(Label::Liked));
        assert_eq!(ratings.liked_count(), 3);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();
        let ratings = RatingsMap::new();

        assert!(catalog.get_movie("Missing").is_none());
        assert!(ratings.get("Missing").is_none());
        assert!(ratings.titles().is_empty());
    }
}
