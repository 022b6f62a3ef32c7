/// Catalog data provider abstraction
///
/// The ingest step is pluggable over the upstream movie database: the trait
/// covers the paginated movie listing and the genre listing, so a different
/// listing source can slot in without touching the ingest pipeline.
use crate::{
    error::AppResult,
    models::{TmdbGenre, TmdbMovie},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for upstream catalog data sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch up to `pages` pages of the top-rated movie listing
    async fn fetch_movies(&self, pages: u32) -> AppResult<Vec<TmdbMovie>>;

    /// Fetch the genre id/name listing
    async fn fetch_genres(&self) -> AppResult<Vec<TmdbGenre>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
