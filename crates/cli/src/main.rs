use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::Dataset;
use recommender::{
    CrossValidator, EvaluationConfig, EvaluationReport, Feature, FeatureWeights, RatedNeighbor,
    Recommender, DEFAULT_NUM_NEIGHBORS,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// CBR Recs - case-based movie recommender
#[derive(Parser)]
#[command(name = "cbr-recs")]
#[command(about = "Predict liked movies from their most similar rated movies", long_about = None)]
struct Cli {
    /// Path to the movie catalog (JSON keyed by title)
    #[arg(long, default_value = "movie_features.json")]
    catalog: PathBuf,

    /// Path to the ratings export (CSV)
    #[arg(long, default_value = "ratings.csv")]
    ratings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct WeightArgs {
    /// JSON file with feature weights; missing features keep their defaults
    #[arg(long)]
    weights: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-validate the recommender on the rated movies
    Evaluate {
        /// JSON file with a full evaluation config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of parts the rated movies are split into
        #[arg(long)]
        folds: Option<usize>,

        /// Number of neighbors that vote
        #[arg(long)]
        neighbors: Option<usize>,

        /// Keep rating order instead of shuffling before splitting
        #[arg(long)]
        no_shuffle: bool,

        /// Seed for a reproducible shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Only print the final summary
        #[arg(long)]
        quiet: bool,

        #[command(flatten)]
        weights: WeightArgs,
    },

    /// Predict whether a movie would be liked
    Predict {
        /// Movie title, exactly as in the catalog
        #[arg(long)]
        title: String,

        /// Number of neighbors that vote
        #[arg(long, default_value_t = DEFAULT_NUM_NEIGHBORS)]
        neighbors: usize,

        /// Show the per-feature score against each neighbor
        #[arg(long)]
        explain: bool,

        #[command(flatten)]
        weights: WeightArgs,
    },

    /// List the rated movies most similar to a title
    Similar {
        /// Movie title, exactly as in the catalog
        #[arg(long)]
        title: String,

        /// Number of movies to list
        #[arg(long, default_value = "10")]
        limit: usize,

        #[command(flatten)]
        weights: WeightArgs,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Dataset::load_from_files(&cli.catalog, &cli.ratings)
        .context("Failed to load catalog and ratings")?;
    let (movies, rated, liked) = dataset.counts();
    println!(
        "{} Loaded {} movies and {} ratings ({} liked) in {:?}",
        "✓".green(),
        movies,
        rated,
        liked,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Evaluate {
            config,
            folds,
            neighbors,
            no_shuffle,
            seed,
            quiet,
            weights,
        } => {
            let mut config = match config {
                Some(path) => read_json::<EvaluationConfig>(&path)?,
                None => EvaluationConfig::default(),
            };
            if let Some(folds) = folds {
                config = config.with_num_folds(folds);
            }
            if let Some(neighbors) = neighbors {
                config = config.with_num_neighbors(neighbors);
            }
            if no_shuffle {
                config = config.with_shuffle(false);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if quiet {
                config = config.with_verbose(false);
            }
            if let Some(path) = weights.weights {
                config = config.with_weights(read_json::<FeatureWeights>(&path)?);
            }
            handle_evaluate(&dataset, config)?
        }
        Commands::Predict {
            title,
            neighbors,
            explain,
            weights,
        } => handle_predict(&dataset, &title, neighbors, explain, load_weights(&weights)?)?,
        Commands::Similar {
            title,
            limit,
            weights,
        } => handle_similar(&dataset, &title, limit, load_weights(&weights)?)?,
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_weights(args: &WeightArgs) -> Result<FeatureWeights> {
    match &args.weights {
        Some(path) => read_json(path),
        None => Ok(FeatureWeights::default()),
    }
}

/// Handle the 'evaluate' command
fn handle_evaluate(dataset: &Dataset, config: EvaluationConfig) -> Result<()> {
    info!(
        "Evaluating with {} folds, {} neighbors, shuffle={}",
        config.num_folds, config.num_neighbors, config.shuffle
    );

    let start = Instant::now();
    let report = CrossValidator::new(&dataset.catalog, &dataset.ratings, config)
        .evaluate()
        .context("Cross-validation failed")?;

    print_report(&report);
    println!("Finished in {:?}", start.elapsed());
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(
    dataset: &Dataset,
    title: &str,
    neighbors: usize,
    explain: bool,
    weights: FeatureWeights,
) -> Result<()> {
    let recommender = Recommender::new(&dataset.catalog, &dataset.ratings, weights, neighbors)?;
    let recommendation = recommender.predict(title)?;

    let verdict = if recommendation.recommended {
        "Recommended".green().bold()
    } else {
        "Not recommended".red().bold()
    };
    println!("{}: {}", title.bold().blue(), verdict);
    println!(
        "{}{} of {} nearest rated movies were liked",
        "• ".cyan(),
        recommendation.liked_neighbors,
        recommendation.neighbors.len()
    );
    if let Some(label) = recommendation.rated {
        println!("{}You rated it: {:?}", "• ".cyan(), label);
    }

    print_neighbors(&recommendation.neighbors);

    if explain {
        println!("{}", "Score breakdown (unweighted):".bold());
        for neighbor in &recommendation.neighbors {
            let breakdown = recommender.explain(title, &neighbor.title)?;
            let parts = Feature::ALL
                .iter()
                .map(|&feature| format!("{}={:.2}", feature, breakdown.get(feature)))
                .collect::<Vec<_>>()
                .join(", ");
            println!("  - {}: {}", neighbor.title, parts);
        }
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    dataset: &Dataset,
    title: &str,
    limit: usize,
    weights: FeatureWeights,
) -> Result<()> {
    let recommender = Recommender::new(&dataset.catalog, &dataset.ratings, weights, limit)?;
    let nearest = recommender.nearest(title, limit)?;

    println!("{}", format!("Rated movies most similar to '{}':", title).bold().blue());
    print_neighbors(&nearest);
    Ok(())
}

fn print_neighbors(neighbors: &[RatedNeighbor]) {
    for (rank, neighbor) in neighbors.iter().enumerate() {
        let label = if neighbor.label.is_liked() {
            "liked".green()
        } else {
            "disliked".red()
        };
        println!(
            "{}. {} - score {:.3} ({})",
            (rank + 1).to_string().green(),
            neighbor.title,
            neighbor.score,
            label
        );
    }
}

fn print_report(report: &EvaluationReport) {
    println!("{}", "Cross-validation results:".bold().blue());
    for fold in &report.folds {
        println!(
            "{}Part {}: {:.2}% ({}/{})",
            "• ".green(),
            fold.index + 1,
            fold.accuracy,
            fold.successes,
            fold.size
        );
    }
    println!(
        "{} {:.2}%",
        "Average success in all parts:".bold(),
        report.overall_accuracy
    );
}
