use anyhow::{anyhow, Context, Result};
use catalog::MovieId;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use engine::{
    BrowseFilters, EngineConfig, MovieRecommendation, NavigationEvent, Page,
    RecommendationEngine, Session, Shelf, UserRatings, View,
};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content, profile and hybrid movie recommendations", long_about = None)]
struct Cli {
    /// Path to the movie dataset CSV
    #[arg(short, long, default_value = "data/movies_data.csv")]
    data_file: PathBuf,

    /// Vocabulary cap for the content model (0 = no cap)
    #[arg(long, global = true)]
    max_features: Option<usize>,

    /// Hybrid weight of the content score
    #[arg(long, global = true)]
    content_weight: Option<f32>,

    /// Hybrid weight of the profile score
    #[arg(long, global = true)]
    profile_weight: Option<f32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Movies similar to a given movie
    Similar {
        #[arg(long)]
        movie_id: MovieId,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Movies matching your ratings
    Recommend {
        /// A rating as <movie_id>=<rating>, repeatable
        #[arg(long = "rate", value_parser = parse_rating)]
        ratings: Vec<(MovieId, f32)>,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Blend of "similar to" and "matches your ratings"
    Hybrid {
        #[arg(long)]
        movie_id: MovieId,

        #[arg(long = "rate", value_parser = parse_rating)]
        ratings: Vec<(MovieId, f32)>,

        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Highest rated movies
    TopRated {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Recent, well rated movies
    Trending {
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Search titles, genres, directors, cast and keywords
    Search {
        query: String,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Browse a shelf with sidebar filters
    Browse {
        #[arg(long, value_enum, default_value_t = ShelfArg::All)]
        shelf: ShelfArg,

        #[arg(long)]
        genre: Option<String>,

        #[arg(long)]
        min_year: Option<u16>,

        #[arg(long)]
        max_year: Option<u16>,

        #[arg(long)]
        min_rating: Option<f32>,

        #[arg(long)]
        max_rating: Option<f32>,

        #[arg(long = "rate", value_parser = parse_rating)]
        ratings: Vec<(MovieId, f32)>,

        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show one movie and "more like this"
    Movie {
        movie_id: MovieId,

        #[arg(long = "rate", value_parser = parse_rating)]
        ratings: Vec<(MovieId, f32)>,
    },

    /// List genres with movie counts
    Genres,

    /// Run concurrent queries against one engine
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "200")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ShelfArg {
    All,
    Recommended,
    TopRated,
    Trending,
}

impl From<ShelfArg> for Shelf {
    fn from(shelf: ShelfArg) -> Self {
        match shelf {
            ShelfArg::All => Shelf::All,
            ShelfArg::Recommended => Shelf::Recommended,
            ShelfArg::TopRated => Shelf::TopRated,
            ShelfArg::Trending => Shelf::Trending,
        }
    }
}

fn parse_rating(s: &str) -> std::result::Result<(MovieId, f32), String> {
    let (id, rating) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <movie_id>=<rating>, got '{s}'"))?;
    let id = id
        .trim()
        .parse::<MovieId>()
        .map_err(|e| format!("invalid movie id '{id}': {e}"))?;
    let rating = rating
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid rating '{rating}': {e}"))?;
    Ok((id, rating))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env()?;
    if let Some(max_features) = cli.max_features {
        config.max_features = max_features;
    }
    if let Some(weight) = cli.content_weight {
        config.content_weight = weight;
    }
    if let Some(weight) = cli.profile_weight {
        config.profile_weight = weight;
    }

    info!("Loading movies from {}", cli.data_file.display());
    let start = Instant::now();
    let engine = RecommendationEngine::from_csv(&cli.data_file, config)
        .context("Failed to build recommendation engine")?;
    if !cli.json {
        println!(
            "{} Loaded {} movies in {:?}",
            "✓".green(),
            engine.catalog().len(),
            start.elapsed()
        );
    }

    let json = cli.json;
    match cli.command {
        Commands::Similar { movie_id, limit } => {
            let movie = engine
                .get_movie(movie_id)
                .ok_or_else(|| anyhow!("Movie {} not found", movie_id))?;
            let title = format!("Movies like {}", movie.title);
            output(&title, &engine.similar_to(movie_id, limit), json)?;
        }
        Commands::Recommend { ratings, limit } => {
            let session = session_with(&engine, &ratings)?;
            let recs = engine.recommend_for_profile(session.ratings(), limit);
            output("Recommended for you", &recs, json)?;
        }
        Commands::Hybrid {
            movie_id,
            ratings,
            limit,
        } => {
            let session = session_with(&engine, &ratings)?;
            let recs = engine.hybrid(movie_id, session.ratings(), limit);
            output("Hybrid recommendations", &recs, json)?;
        }
        Commands::TopRated { limit } => output("Top rated", &engine.top_rated(limit), json)?,
        Commands::Trending { limit } => output("Trending now", &engine.trending(limit), json)?,
        Commands::Search { query, limit } => {
            let mut session = Session::new("cli");
            session.navigate(NavigationEvent::Search(query.clone()), &engine);
            handle_page(session.current_page(&engine), limit, json)?;
        }
        Commands::Browse {
            shelf,
            genre,
            min_year,
            max_year,
            min_rating,
            max_rating,
            ratings,
            limit,
        } => {
            let mut session = session_with(&engine, &ratings)?;
            session.set_filters(browse_filters(
                &engine, genre, min_year, max_year, min_rating, max_rating,
            ));
            session.navigate(NavigationEvent::ShowShelf(shelf.into()), &engine);
            handle_page(session.current_page(&engine), limit, json)?;
        }
        Commands::Movie { movie_id, ratings } => {
            let mut session = session_with(&engine, &ratings)?;
            session.navigate(NavigationEvent::SelectMovie(movie_id), &engine);
            if !matches!(session.view(), View::Detail { .. }) {
                return Err(anyhow!("Movie {} not found", movie_id));
            }
            handle_page(session.current_page(&engine), usize::MAX, json)?;
        }
        Commands::Genres => handle_genres(&engine, json)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

/// A session seeded with validated command-line ratings
fn session_with(engine: &RecommendationEngine, ratings: &[(MovieId, f32)]) -> Result<Session> {
    let mut session = Session::new("cli");
    for &(movie_id, rating) in ratings {
        session
            .rate(movie_id, rating, engine)
            .with_context(|| format!("Rejected rating {movie_id}={rating}"))?;
    }
    Ok(session)
}

/// Missing bounds default to the catalog's own bounds
fn browse_filters(
    engine: &RecommendationEngine,
    genre: Option<String>,
    min_year: Option<u16>,
    max_year: Option<u16>,
    min_rating: Option<f32>,
    max_rating: Option<f32>,
) -> BrowseFilters {
    let mut filters = BrowseFilters::default();
    if let Some(genre) = genre {
        filters = filters.with_genre(genre);
    }
    if min_year.is_some() || max_year.is_some() {
        let (first, last) = engine.catalog().year_bounds().unwrap_or((0, u16::MAX));
        filters = filters.with_years(min_year.unwrap_or(first), max_year.unwrap_or(last));
    }
    if min_rating.is_some() || max_rating.is_some() {
        filters = filters.with_ratings(min_rating.unwrap_or(0.0), max_rating.unwrap_or(10.0));
    }
    filters
}

fn handle_page(page: Page, limit: usize, json: bool) -> Result<()> {
    match page {
        Page::Shelf {
            shelf,
            mut movies,
            notice,
        } => {
            if let Some(notice) = notice.filter(|_| !json) {
                println!("{}", notice.yellow());
            }
            movies.truncate(limit);
            output(&format!("{:?}", shelf), &movies, json)
        }
        Page::SearchResults { query, mut movies } => {
            if !json {
                println!("Found {} results", movies.len());
            }
            movies.truncate(limit);
            output(&format!("Search results for '{}'", query), &movies, json)
        }
        Page::Detail {
            movie,
            user_rating,
            more_like_this,
        } => {
            if json {
                let page = Page::Detail {
                    movie,
                    user_rating,
                    more_like_this,
                };
                println!("{}", serde_json::to_string_pretty(&page)?);
                return Ok(());
            }
            println!("{}", format!("{} ({})", movie.title, movie.year).bold().blue());
            println!("{}Rating: {:.1}/10", "• ".green(), movie.rating);
            println!("{}Genre: {}", "• ".green(), movie.genre);
            println!("{}Director: {}", "• ".green(), movie.director);
            println!("{}Cast: {}", "• ".green(), movie.cast);
            if let Some(rating) = user_rating {
                println!("{}Your rating: {:.1}", "• ".cyan(), rating);
            }
            if !movie.description.is_empty() {
                println!("\n{}\n", movie.description);
            }
            output("More like this", &more_like_this, false)
        }
    }
}

fn handle_genres(engine: &RecommendationEngine, json: bool) -> Result<()> {
    let counts = engine.catalog().genre_counts();
    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }
    println!("{}", "Genres:".bold().blue());
    for (genre, count) in counts {
        println!("  - {} ({} movies)", genre, count);
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: RecommendationEngine,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let movie_ids: Vec<MovieId> = engine.catalog().movies().iter().map(|m| m.id).collect();
    if movie_ids.is_empty() || requests == 0 {
        return Err(anyhow!("Nothing to benchmark"));
    }

    // Random seeds and small random rating profiles
    let mut rng = rand::rng();
    let queries: Vec<(MovieId, UserRatings)> = (0..requests)
        .map(|_| {
            let seed = movie_ids[rng.random_range(0..movie_ids.len())];
            let ratings = (0..5)
                .map(|_| {
                    let id = movie_ids[rng.random_range(0..movie_ids.len())];
                    (id, rng.random_range(1..=10) as f32)
                })
                .collect();
            (seed, ratings)
        })
        .collect();

    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for (seed, ratings) in queries {
        let engine = engine.clone();
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || engine.hybrid(seed, &ratings, 10)).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = wall_clock.elapsed();

    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print a ranked list as a table or JSON
fn output(title: &str, recommendations: &[MovieRecommendation], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recommendations)?);
        return Ok(());
    }

    println!("{}", title.bold().blue());
    if recommendations.is_empty() {
        println!("  (no results)");
        return Ok(());
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. [{}] {} ({}) [{}] - Score: {:.3}",
            (rank + 1).to_string().green(),
            rec.movie_id,
            rec.title,
            rec.year,
            rec.genres.join(", "),
            rec.score
        );
        println!("   {}", rec.explanation.dimmed());
    }
    Ok(())
}
