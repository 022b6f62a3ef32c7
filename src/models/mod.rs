use serde::Deserialize;

pub mod movie;

pub use movie::{format_genre_ids, parse_genre_ids, Genre, GenreRecord, Movie, MovieRecord};

// ============================================================================
// TMDB API Types
// ============================================================================

/// One movie entry from the TMDB listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    pub original_language: String,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// One page of a paginated TMDB listing
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    pub page: u32,
    pub results: Vec<TmdbMovie>,
    pub total_pages: u32,
}

/// TMDB genre entry
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: i64,
    pub name: String,
}

impl From<TmdbGenre> for Genre {
    fn from(genre: TmdbGenre) -> Self {
        Genre {
            id: genre.id,
            name: genre.name,
        }
    }
}

/// Response of the TMDB genre listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    pub genres: Vec<TmdbGenre>,
}
