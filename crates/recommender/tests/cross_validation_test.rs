//! Integration tests for cross-validation.
//!
//! These tests run the whole chain (normalization, scoring, neighbor
//! search, voting, fold aggregation) on small catalogs whose accuracy can
//! be worked out by hand.

use data_loader::{Catalog, Label, MovieRecord, RatingsMap};
use recommender::{CrossValidator, EvaluationConfig, EvaluationError};
use std::collections::HashSet;

/// Movies identical in everything but their director.
///
/// Runtime and year ranges are 0, genres match, actors and keywords are
/// empty, so the score between two movies is 6 (the director weight) when
/// their directors differ and 0 when they match.
fn create_test_setup(movies: &[(&str, &str, Label)]) -> (Catalog, RatingsMap) {
    let mut catalog = Catalog::new();
    let mut ratings = RatingsMap::new();

    for &(title, director, label) in movies {
        catalog.insert_movie(
            title,
            MovieRecord {
                runtime: 110,
                original_language: "en".to_string(),
                release_date: "2004-05-14".to_string(),
                genres: HashSet::from(["Drama".to_string()]),
                directors: HashSet::from([director.to_string()]),
                ..Default::default()
            },
        );
        ratings.insert(title, label);
    }

    (catalog, ratings)
}

fn deterministic_config(num_folds: usize, num_neighbors: usize) -> EvaluationConfig {
    EvaluationConfig::default()
        .with_num_folds(num_folds)
        .with_num_neighbors(num_neighbors)
        .with_shuffle(false)
        .with_verbose(false)
}

#[test]
fn test_distinct_directors_all_fail() {
    use Label::{Disliked, Liked};
    let (catalog, ratings) = create_test_setup(&[
        ("A", "Director A", Liked),
        ("B", "Director B", Liked),
        ("C", "Director C", Disliked),
        ("D", "Director D", Disliked),
    ]);

    let report = CrossValidator::new(&catalog, &ratings, deterministic_config(2, 1))
        .evaluate()
        .unwrap();

    // Folds [A, B] and [C, D]
    let first = &report.folds[0];
    let titles: Vec<&str> = first.predictions.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);

    // C and D both score 6 against A; C comes first in the pool and is disliked
    for prediction in &first.predictions {
        assert_eq!(prediction.neighbors.len(), 1);
        assert_eq!(prediction.neighbors[0].title, "C");
        assert_eq!(prediction.neighbors[0].score, 6.0);
        assert!(!prediction.recommended);
        assert!(!prediction.success);
    }

    // C and D find A, which is liked
    let second = &report.folds[1];
    for prediction in &second.predictions {
        assert_eq!(prediction.neighbors[0].title, "A");
        assert!(prediction.recommended);
        assert!(!prediction.success);
    }

    assert_eq!(report.fold_accuracies(), vec![0.0, 0.0]);
    assert_eq!(report.overall_accuracy, 0.0);
}

#[test]
fn test_shared_directors_all_succeed() {
    use Label::{Disliked, Liked};
    let (catalog, ratings) = create_test_setup(&[
        ("A", "Director X", Liked),
        ("B", "Director Y", Disliked),
        ("C", "Director X", Liked),
        ("D", "Director Y", Disliked),
    ]);

    let report = CrossValidator::new(&catalog, &ratings, deterministic_config(2, 1))
        .evaluate()
        .unwrap();

    assert_eq!(report.fold_accuracies(), vec![100.0, 100.0]);
    assert_eq!(report.overall_accuracy, 100.0);
    assert_eq!(report.total_successes(), 4);
}

#[test]
fn test_overall_accuracy_is_unweighted_mean() {
    use Label::{Disliked, Liked};
    let (catalog, ratings) = create_test_setup(&[
        ("A", "Director X", Liked),
        ("B", "Director X", Liked),
        ("C", "Director Y", Disliked),
        ("D", "Director X", Liked),
        ("E", "Director Y", Liked),
    ]);

    let report = CrossValidator::new(&catalog, &ratings, deterministic_config(2, 1))
        .evaluate()
        .unwrap();

    // Fold [A, B, C] against {D, E}: A and B find D (liked, right),
    // C finds E (liked, wrong)
    // Fold [D, E] against {A, B, C}: D finds A (liked, right),
    // E finds C (disliked, wrong)
    let sizes: Vec<usize> = report.folds.iter().map(|f| f.size).collect();
    assert_eq!(sizes, vec![3, 2]);

    let first = 2.0 / 3.0 * 100.0;
    let second = 50.0;
    assert_eq!(report.fold_accuracies(), vec![first, second]);

    // 58.33..., not the 60% a size-weighted mean would give
    assert!((report.overall_accuracy - (first + second) / 2.0).abs() < 1e-9);
    assert!((report.overall_accuracy - 60.0).abs() > 1.0);
}

#[test]
fn test_majority_vote_with_even_neighbor_count() {
    use Label::{Disliked, Liked};
    // X's four neighbors (everything outside its fold) are two liked and
    // two disliked: exactly half is enough to recommend
    let (catalog, ratings) = create_test_setup(&[
        ("X", "Director X", Liked),
        ("Filler", "Director X", Disliked),
        ("L1", "Director X", Liked),
        ("L2", "Director X", Liked),
        ("D1", "Director X", Disliked),
        ("D2", "Director X", Disliked),
    ]);

    let report = CrossValidator::new(&catalog, &ratings, deterministic_config(3, 4))
        .evaluate()
        .unwrap();

    let x = &report.folds[0].predictions[0];
    assert_eq!(x.title, "X");
    assert_eq!(x.neighbors.len(), 4);
    assert_eq!(x.neighbors.iter().filter(|n| n.label == Liked).count(), 2);
    assert!(x.recommended);
    assert!(x.success);
}

#[test]
fn test_configuration_errors() {
    use Label::{Disliked, Liked};
    let (catalog, ratings) = create_test_setup(&[
        ("A", "Director X", Liked),
        ("B", "Director Y", Disliked),
    ]);

    let single_fold = CrossValidator::new(&catalog, &ratings, deterministic_config(1, 1)).evaluate();
    assert!(matches!(
        single_fold,
        Err(EvaluationError::InvalidFoldCount { .. })
    ));

    let no_neighbors = CrossValidator::new(&catalog, &ratings, deterministic_config(2, 0)).evaluate();
    assert!(matches!(
        no_neighbors,
        Err(EvaluationError::InvalidNeighborCount)
    ));

    let empty = Catalog::new();
    let empty_ratings = RatingsMap::new();
    let nothing_rated =
        CrossValidator::new(&empty, &empty_ratings, deterministic_config(2, 1)).evaluate();
    assert!(matches!(
        nothing_rated,
        Err(EvaluationError::InvalidFoldCount { rated: 0, .. })
    ));
}
