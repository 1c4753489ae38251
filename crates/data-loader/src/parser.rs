//! Parsers for the catalog and ratings files.
//!
//! This module handles the two input formats:
//! - movie_features.json: `{ "<title>": { "runtime": 136, "original_language": "en", ... } }`
//! - ratings.csv: `Date,Name,Year,Letterboxd URI,Rating` with one row per rated movie
//!
//! Rust concepts you'll learn here:
//! - Generic readers (`impl Read`) so parsing is testable without files
//! - Error handling with `?` and `map_err`
//! - serde for JSON, the csv crate for quoted fields

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Column holding the movie title in ratings.csv
const TITLE_COLUMN: usize = 1;
/// Column holding the rating value in ratings.csv
const RATING_COLUMN: usize = 4;

const RATINGS_FILE: &str = "ratings.csv";

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse the catalog JSON file
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let file = open_file(path)?;
    parse_catalog_from_reader(BufReader::new(file))
}

/// Parse a catalog from any reader
///
/// The document is a single object keyed by title; every value is a
/// [`MovieRecord`]. Unknown fields are ignored.
pub fn parse_catalog_from_reader(reader: impl Read) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_reader(reader)?;
    Ok(catalog)
}

/// Parse the ratings CSV file
pub fn parse_ratings(path: &Path) -> Result<RatingsMap> {
    let file = open_file(path)?;
    parse_ratings_from_reader(file)
}

/// Parse ratings from any reader
///
/// The first row is a header. Titles containing commas arrive quoted and
/// are unquoted by the CSV reader before being used as keys.
pub fn parse_ratings_from_reader(reader: impl Read) -> Result<RatingsMap> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut ratings = RatingsMap::new();

    for (idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Header is line 1
        let line_no = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 2);

        if record.iter().all(|field| field.is_empty()) {
            continue; // Skip empty rows
        }

        let title = record.get(TITLE_COLUMN).ok_or_else(|| DataLoadError::ParseError {
            file: RATINGS_FILE.to_string(),
            line: line_no,
            reason: "Missing title".to_string(),
        })?;

        let rating_value = record
            .get(RATING_COLUMN)
            .ok_or_else(|| DataLoadError::ParseError {
                file: RATINGS_FILE.to_string(),
                line: line_no,
                reason: "Missing rating".to_string(),
            })?;

        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: RATINGS_FILE.to_string(),
                line: line_no,
                reason: "Empty title".to_string(),
            });
        }

        ratings.insert(title, parse_label(rating_value)?);
    }

    Ok(ratings)
}

/// Parse a rating value into a Label
///
/// Example: "5" -> Ok(Label::Liked)
///          "1" -> Ok(Label::Disliked)
pub fn parse_label(s: &str) -> Result<Label> {
    match s.trim() {
        "5" => Ok(Label::Liked),
        "1" => Ok(Label::Disliked),
        _ => Err(DataLoadError::InvalidValue {
            field: "rating".to_string(),
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "Heat": {
            "runtime": 170,
            "original_language": "en",
            "release_date": "1995-12-15",
            "genres": ["Action", "Crime", "Drama"],
            "actors": ["Al Pacino", "Robert De Niro"],
            "directors": ["Michael Mann"],
            "keywords": ["heist"],
            "popularity": 41.2
        },
        "Amelie": {
            "runtime": 122,
            "original_language": "fr",
            "release_date": "2001-04-25",
            "genres": ["Comedy", "Romance"],
            "actors": ["Audrey Tautou"],
            "directors": ["Jean-Pierre Jeunet"]
        }
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog_from_reader(CATALOG_JSON.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let heat = catalog.get_movie("Heat").unwrap();
        assert_eq!(heat.runtime, 170);
        assert_eq!(heat.release_year(), Some(1995));
        assert!(heat.genres.contains("Crime"));

        // Missing arrays default to empty sets
        let amelie = catalog.get_movie("Amelie").unwrap();
        assert!(amelie.keywords.is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_malformed_json() {
        let err = parse_catalog_from_reader(r#"{"Heat": {"runtime": "long"}}"#.as_bytes());
        assert!(matches!(err, Err(DataLoadError::JsonError(_))));
    }

    #[test]
    fn test_parse_ratings_unquotes_titles() {
        let csv = "Date,Name,Year,Letterboxd URI,Rating\n\
                   2022-01-03,Heat,1995,https://boxd.it/a,5\n\
                   2022-01-04,\"Crouching Tiger, Hidden Dragon\",2000,https://boxd.it/b,1\n\
                   \n\
                   2022-01-05,Amelie,2001,https://boxd.it/c,5\n";

        let ratings = parse_ratings_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings.get("Heat"), Some(Label::Liked));
        assert_eq!(
            ratings.get("Crouching Tiger, Hidden Dragon"),
            Some(Label::Disliked)
        );
        assert_eq!(
            ratings.titles(),
            vec!["Heat", "Crouching Tiger, Hidden Dragon", "Amelie"]
        );
    }

    #[test]
    fn test_parse_ratings_missing_column() {
        let csv = "Date,Name,Year,Letterboxd URI,Rating\n2022-01-03,Heat,1995\n";
        let err = parse_ratings_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(parse_label("5").unwrap(), Label::Liked);
        assert_eq!(parse_label(" 1 ").unwrap(), Label::Disliked);
        assert!(matches!(
            parse_label("3"),
            Err(DataLoadError::InvalidValue { .. })
        ));
    }
}
