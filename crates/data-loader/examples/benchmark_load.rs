use data_loader::Dataset;
use std::path::Path;
use std::time::Instant;

fn main() {
    let catalog_path = Path::new("data/movie_features.json");
    let ratings_path = Path::new("data/ratings.csv");

    println!("Loading catalog and ratings...\n");

    let start = Instant::now();
    let dataset = Dataset::load_from_files(catalog_path, ratings_path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, rated, liked) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Rated: {}", rated);
    println!("Liked: {}", liked);
    println!("\nPerformance: {:.0} movies/second",
             movies as f64 / elapsed.as_secs_f64());
}
