use std::collections::HashMap;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::{Movie, MovieRecord};

/// In-memory catalog of movies, read-only after load
///
/// Row order is the same order the similarity matrix was built against;
/// neither artifact may be reordered without the other.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    /// Loads the catalog from the persisted CSV artifact
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::Load(format!("failed to open catalog {}: {}", path.display(), e))
        })?;

        let mut movies = Vec::new();
        for result in reader.deserialize() {
            let record: MovieRecord = result?;
            movies.push(Movie::try_from(record)?);
        }

        let catalog = Self::from_movies(movies)?;
        tracing::info!(movies = catalog.len(), path = %path.display(), "Catalog loaded");
        Ok(catalog)
    }

    /// Builds a catalog from already-parsed movies, rejecting duplicate ids
    pub fn from_movies(movies: Vec<Movie>) -> AppResult<Self> {
        let mut by_id = HashMap::with_capacity(movies.len());
        for (index, movie) in movies.iter().enumerate() {
            if by_id.insert(movie.id, index).is_some() {
                return Err(AppError::Load(format!(
                    "duplicate movie id {} in catalog",
                    movie.id
                )));
            }
        }
        Ok(Self { movies, by_id })
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn index_of_id(&self, id: i64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Exact title match; on duplicate titles the first match in catalog
    /// order wins
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: format!("About {}", title),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 15).unwrap(),
            original_language: "en".to_string(),
            genre_ids: vec![28],
            poster_path: Some(format!("/{}.jpg", id)),
        }
    }

    #[test]
    fn test_load_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,id_genero,titulo,resumo,lancamento,idioma_original,poster").unwrap();
        writeln!(file, "603,\"[28, 878]\",The Matrix,A hacker learns the truth,1999-03-31,en,/matrix.jpg").unwrap();
        writeln!(file, "27205,\"[28, 12]\",Inception,Dreams within dreams,2010-07-15,en,/inception.jpg").unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().title, "The Matrix");
        assert_eq!(catalog.index_of_id(27205), Some(1));
        assert_eq!(catalog.index_of_title("Inception"), Some(1));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_load_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id,titulo").unwrap();
        writeln!(file, "603,The Matrix").unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_from_movies_rejects_duplicate_ids() {
        let err = Catalog::from_movies(vec![movie(1, "A"), movie(1, "B")]).unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_in_catalog_order() {
        let catalog =
            Catalog::from_movies(vec![movie(1, "A"), movie(2, "Remake"), movie(3, "Remake")])
                .unwrap();
        assert_eq!(catalog.index_of_title("Remake"), Some(1));
    }

    #[test]
    fn test_unknown_lookups_return_none() {
        let catalog = Catalog::from_movies(vec![movie(1, "A")]).unwrap();
        assert_eq!(catalog.index_of_id(99), None);
        assert_eq!(catalog.index_of_title("B"), None);
    }
}
