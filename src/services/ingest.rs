use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::{format_genre_ids, GenreRecord, MovieRecord, TmdbGenre, TmdbMovie};
use crate::services::providers::CatalogProvider;

/// Options for one catalog ingest run
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Number of listing pages to pull
    pub pages: u32,
    /// Also fetch and persist the genre listing
    pub fetch_genres: bool,
    pub catalog_path: PathBuf,
    pub genres_path: PathBuf,
}

/// Summary of a completed ingest run
#[derive(Debug, PartialEq)]
pub struct IngestReport {
    pub movies: usize,
    pub genres: usize,
}

/// Fetches the movie listing (and optionally the genre listing) and dumps
/// the catalog CSV artifacts
pub async fn run(
    provider: &dyn CatalogProvider,
    options: &IngestOptions,
) -> AppResult<IngestReport> {
    tracing::info!(
        pages = options.pages,
        fetch_genres = options.fetch_genres,
        provider = provider.name(),
        "Starting catalog ingest"
    );

    let raw = provider.fetch_movies(options.pages).await?;
    let records = transform(raw)?;
    write_catalog(&options.catalog_path, &records)?;

    let genres = if options.fetch_genres {
        let genres = provider.fetch_genres().await?;
        write_genres(&options.genres_path, &genres)?;
        genres.len()
    } else {
        0
    };

    tracing::info!(movies = records.len(), genres, "Catalog ingest finished");

    Ok(IngestReport {
        movies: records.len(),
        genres,
    })
}

/// Flattens the raw listing into catalog records
///
/// Duplicate ids and empty required fields are fatal for the whole run.
fn transform(raw: Vec<TmdbMovie>) -> AppResult<Vec<MovieRecord>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for movie in raw {
        if !seen.insert(movie.id) {
            return Err(AppError::InvalidInput(format!(
                "duplicate movie id {} in listing",
                movie.id
            )));
        }
        if movie.title.is_empty()
            || movie.overview.is_empty()
            || movie.release_date.is_empty()
            || movie.original_language.is_empty()
        {
            return Err(AppError::InvalidInput(format!(
                "movie {} has empty required fields",
                movie.id
            )));
        }

        records.push(MovieRecord {
            id: movie.id,
            genre_ids: format_genre_ids(&movie.genre_ids),
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            original_language: movie.original_language,
            poster_path: movie.poster_path.unwrap_or_default(),
        });
    }

    Ok(records)
}

fn write_catalog(path: &Path, records: &[MovieRecord]) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::Load(format!("failed to create catalog {}: {}", path.display(), e))
    })?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_genres(path: &Path, genres: &[TmdbGenre]) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::Load(format!("failed to create genres {}: {}", path.display(), e))
    })?;
    for genre in genres {
        writer.serialize(GenreRecord {
            id: genre.id,
            name: genre.name.clone(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
