use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie in the catalog, immutable after load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub original_language: String,
    pub genre_ids: Vec<i64>,
    /// Relative poster path on the image CDN, absent when upstream had none
    pub poster_path: Option<String>,
}

/// One row of the persisted catalog CSV
///
/// Column names are the artifact schema shared with the offline matrix
/// builder; they must not change independently of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    #[serde(rename = "id_genero")]
    pub genre_ids: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "resumo")]
    pub overview: String,
    #[serde(rename = "lancamento")]
    pub release_date: String,
    #[serde(rename = "idioma_original")]
    pub original_language: String,
    #[serde(rename = "poster")]
    pub poster_path: String,
}

impl TryFrom<MovieRecord> for Movie {
    type Error = AppError;

    fn try_from(record: MovieRecord) -> AppResult<Self> {
        let release_date =
            NaiveDate::parse_from_str(&record.release_date, "%Y-%m-%d").map_err(|e| {
                AppError::Load(format!(
                    "movie {}: invalid release date {:?}: {}",
                    record.id, record.release_date, e
                ))
            })?;

        let genre_ids = parse_genre_ids(&record.genre_ids).map_err(|e| {
            AppError::Load(format!("movie {}: invalid genre list: {}", record.id, e))
        })?;

        let poster_path = if record.poster_path.is_empty() {
            None
        } else {
            Some(record.poster_path)
        };

        Ok(Movie {
            id: record.id,
            title: record.title,
            overview: record.overview,
            release_date,
            original_language: record.original_language,
            genre_ids,
            poster_path,
        })
    }
}

/// A movie genre
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// One row of the persisted genre CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRecord {
    pub id: i64,
    #[serde(rename = "genero")]
    pub name: String,
}

/// Parses a bracketed genre id list as stored in the catalog CSV,
/// e.g. `"[28, 12]"`
pub fn parse_genre_ids(raw: &str) -> Result<Vec<i64>, String> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("expected bracketed list, got {:?}", raw))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|e| format!("bad genre id {:?}: {}", part.trim(), e))
        })
        .collect()
}

/// Formats a genre id list for the catalog CSV, the inverse of
/// [`parse_genre_ids`]
pub fn format_genre_ids(ids: &[i64]) -> String {
    let parts: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64) -> MovieRecord {
        MovieRecord {
            id,
            genre_ids: "[28, 12]".to_string(),
            title: "Inception".to_string(),
            overview: "A thief who steals corporate secrets".to_string(),
            release_date: "2010-07-15".to_string(),
            original_language: "en".to_string(),
            poster_path: "/inception.jpg".to_string(),
        }
    }

    #[test]
    fn test_movie_from_record() {
        let movie = Movie::try_from(record(27205)).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.genre_ids, vec![28, 12]);
        assert_eq!(
            movie.release_date,
            NaiveDate::from_ymd_opt(2010, 7, 15).unwrap()
        );
        assert_eq!(movie.poster_path, Some("/inception.jpg".to_string()));
    }

    #[test]
    fn test_movie_from_record_empty_poster_becomes_none() {
        let mut rec = record(1);
        rec.poster_path = String::new();
        let movie = Movie::try_from(rec).unwrap();
        assert_eq!(movie.poster_path, None);
    }

    #[test]
    fn test_movie_from_record_bad_date() {
        let mut rec = record(1);
        rec.release_date = "not-a-date".to_string();
        let err = Movie::try_from(rec).unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_parse_genre_ids() {
        assert_eq!(parse_genre_ids("[28, 12]").unwrap(), vec![28, 12]);
        assert_eq!(parse_genre_ids("[878]").unwrap(), vec![878]);
        assert_eq!(parse_genre_ids("[]").unwrap(), Vec::<i64>::new());
    }

    #[test]
    fn test_parse_genre_ids_rejects_unbracketed() {
        assert!(parse_genre_ids("28, 12").is_err());
        assert!(parse_genre_ids("[28, x]").is_err());
    }

    #[test]
    fn test_format_genre_ids_round_trips() {
        let ids = vec![28, 12, 878];
        assert_eq!(parse_genre_ids(&format_genre_ids(&ids)).unwrap(), ids);
        assert_eq!(format_genre_ids(&[]), "[]");
    }
}
