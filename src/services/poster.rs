use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Default image CDN base path at display width
pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// Shown in place of a poster the catalog has no path for
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Poster";

/// Resolves relative poster paths against the image CDN base URL
#[derive(Debug, Clone)]
pub struct PosterResolver {
    base_url: String,
}

impl PosterResolver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// Full image URL for a movie's poster
    ///
    /// Fails with `MissingPoster` when the movie has no stored path instead
    /// of emitting a broken URL.
    pub fn resolve(&self, movie: &Movie) -> AppResult<String> {
        let path = movie
            .poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .ok_or(AppError::MissingPoster(movie.id))?;

        Ok(format!("{}{}", self.base_url, path.trim_start_matches('/')))
    }
}

impl Default for PosterResolver {
    fn default() -> Self {
        Self::new(DEFAULT_POSTER_BASE_URL)
    }
}
