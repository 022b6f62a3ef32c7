use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cinerec::api::{create_router, AppState};
use cinerec::config::Config;
use cinerec::services::catalog::Catalog;
use cinerec::services::ingest::{self, IngestOptions};
use cinerec::services::poster::PosterResolver;
use cinerec::services::providers::TmdbProvider;
use cinerec::services::recommender::Recommender;
use cinerec::services::similarity::SimilarityMatrix;

/// Movie recommendation service
#[derive(Parser)]
#[command(name = "cinerec")]
#[command(about = "Content-similarity movie recommendations over a precomputed matrix")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the recommendation API
    Serve,
    /// Fetch the movie listing from TMDB and dump the catalog CSV
    Ingest {
        /// Number of listing pages to pull
        #[arg(long, default_value_t = 500)]
        pages: u32,

        /// Also fetch and persist the genre listing
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        fetch_genres: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Ingest {
            pages,
            fetch_genres,
        } => ingest_catalog(config, pages, fetch_genres).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("loading catalog from {}", config.catalog_path))?;
    let matrix = SimilarityMatrix::load(&config.similarity_path)
        .with_context(|| format!("loading similarity matrix from {}", config.similarity_path))?;
    let recommender = Recommender::new(
        catalog,
        matrix,
        PosterResolver::new(config.poster_base_url.clone()),
    )?;

    let state = AppState::new(recommender);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ingest_catalog(config: Config, pages: u32, fetch_genres: bool) -> anyhow::Result<()> {
    if config.tmdb_api_token.is_empty() {
        anyhow::bail!("TMDB_API_TOKEN is not set");
    }

    let provider = TmdbProvider::new(config.tmdb_api_token.clone(), config.tmdb_api_url.clone());
    let options = IngestOptions {
        pages,
        fetch_genres,
        catalog_path: PathBuf::from(&config.catalog_path),
        genres_path: PathBuf::from(&config.genres_path),
    };

    let report = ingest::run(&provider, &options).await?;
    println!(
        "Ingested {} movies and {} genres",
        report.movies, report.genres
    );

    Ok(())
}
