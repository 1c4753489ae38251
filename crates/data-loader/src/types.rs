//! Core domain types for the movie catalog and a user's ratings.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Serde derives for loading JSON straight into typed structs
//! - Enums for fixed sets of values (a rating is either liked or disliked)
//! - HashMap and HashSet for efficient lookups
//! - Keeping insertion order alongside a hash index

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// =============================================================================
// Movie-related Types
// =============================================================================

/// Structured metadata for one movie.
///
/// Records are keyed by title in the [`Catalog`] and never change after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Runtime in minutes
    pub runtime: u32,
    /// Short language code, e.g. "en"
    pub original_language: String,
    /// Release date with a year prefix, e.g. "1999-03-31"
    pub release_date: String,
    #[serde(default)]
    pub genres: HashSet<String>,
    #[serde(default)]
    pub actors: HashSet<String>,
    #[serde(default)]
    pub directors: HashSet<String>,
    #[serde(default)]
    pub keywords: HashSet<String>,
}

impl MovieRecord {
    /// Year extracted from the release date
    ///
    /// Example: "1999-03-31" -> Some(1999)
    ///          "unknown"    -> None
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .split('-')
            .next()
            .and_then(|year| year.trim().parse().ok())
    }
}

/// All movies known to the system, keyed by title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    movies: HashMap<String, MovieRecord>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
        }
    }

    /// Get a movie by title
    pub fn get_movie(&self, title: &str) -> Option<&MovieRecord> {
        self.movies.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.movies.contains_key(title)
    }

    /// Insert a movie, replacing any previous record with the same title
    pub fn insert_movie(&mut self, title: impl Into<String>, movie: MovieRecord) {
        self.movies.insert(title.into(), movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Iterate over all titles (arbitrary order)
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.keys().map(String::as_str)
    }

    /// Iterate over all (title, record) pairs (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MovieRecord)> {
        self.movies.iter().map(|(title, movie)| (title.as_str(), movie))
    }
}

impl FromIterator<(String, MovieRecord)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, MovieRecord)>>(iter: I) -> Self {
        Self {
            movies: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Rating Types
// =============================================================================

/// Binary rating given by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Liked,
    Disliked,
}

impl Label {
    pub fn is_liked(self) -> bool {
        matches!(self, Label::Liked)
    }
}

/// The user's ratings, title -> label, in insertion order.
///
/// Iteration order matters: cross-validation splits the titles in the
/// order they were rated unless asked to shuffle.
#[derive(Debug, Clone, Default)]
pub struct RatingsMap {
    entries: Vec<(String, Label)>,
    /// Position of each title in `entries`
    positions: HashMap<String, usize>,
}

impl RatingsMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Insert a rating
    ///
    /// Re-rating a title replaces its label but keeps its original position.
    pub fn insert(&mut self, title: impl Into<String>, label: Label) {
        let title = title.into();
        match self.positions.get(&title) {
            Some(&pos) => self.entries[pos].1 = label,
            None => {
                self.positions.insert(title.clone(), self.entries.len());
                self.entries.push((title, label));
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<Label> {
        self.positions.get(title).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    /// Rated titles in insertion order
    pub fn titles(&self) -> Vec<String> {
        self.entries.iter().map(|(title, _)| title.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> {
        self.entries.iter().map(|(title, label)| (title.as_str(), *label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of titles rated as liked
    pub fn liked_count(&self) -> usize {
        self.entries.iter().filter(|(_, label)| label.is_liked()).count()
    }
}

impl FromIterator<(String, Label)> for RatingsMap {
    fn from_iter<I: IntoIterator<Item = (String, Label)>>(iter: I) -> Self {
        let mut ratings = RatingsMap::new();
        for (title, label) in iter {
            ratings.insert(title, label);
        }
        ratings
    }
}

// =============================================================================
// Dataset - catalog plus ratings
// =============================================================================

/// Everything one evaluation run needs: the catalog and the user's ratings.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub catalog: Catalog,
    pub ratings: RatingsMap,
}

impl Dataset {
    pub fn new(catalog: Catalog, ratings: RatingsMap) -> Self {
        Self { catalog, ratings }
    }

    /// Get counts for debugging/validation: (movies, rated, liked)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.catalog.len(),
            self.ratings.len(),
            self.ratings.liked_count(),
        )
    }
}
