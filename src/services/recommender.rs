use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::catalog::Catalog;
use crate::services::poster::{PosterResolver, PLACEHOLDER_POSTER_URL};
use crate::services::similarity::SimilarityMatrix;

/// Number of recommendations returned when the caller does not ask for more
pub const DEFAULT_K: usize = 5;

/// A single recommended movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
}

/// Top-K nearest-neighbor lookup over the catalog and similarity matrix
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
    posters: PosterResolver,
}

impl Recommender {
    /// Pairs a catalog with its similarity matrix
    ///
    /// Rejects the pair when the matrix row count does not match the catalog
    /// size; a mismatch means the artifacts were built from different data.
    pub fn new(
        catalog: Catalog,
        matrix: SimilarityMatrix,
        posters: PosterResolver,
    ) -> AppResult<Self> {
        if catalog.len() != matrix.len() {
            return Err(AppError::Load(format!(
                "catalog/similarity size mismatch: {} movies vs {} matrix rows",
                catalog.len(),
                matrix.len()
            )));
        }
        Ok(Self {
            catalog,
            matrix,
            posters,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Top-k most similar movies for a catalog movie id
    pub fn recommend_by_id(&self, id: i64, k: usize) -> AppResult<Vec<Recommendation>> {
        let index = self
            .catalog
            .index_of_id(id)
            .ok_or_else(|| AppError::NotFound(format!("no movie with id {}", id)))?;
        self.recommend_at(index, k)
    }

    /// Top-k by exact title; on duplicate titles the first match in catalog
    /// order is used
    pub fn recommend_by_title(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        let index = self
            .catalog
            .index_of_title(title)
            .ok_or_else(|| AppError::NotFound(format!("no movie titled {:?}", title)))?;
        self.recommend_at(index, k)
    }

    fn recommend_at(&self, index: usize, k: usize) -> AppResult<Vec<Recommendation>> {
        if self.catalog.len() < k + 1 {
            return Err(AppError::InsufficientData {
                needed: k + 1,
                available: self.catalog.len(),
            });
        }

        let mut scored = self
            .matrix
            .row(index)
            .ok_or_else(|| AppError::Internal(format!("similarity row {} out of bounds", index)))?;

        // Highest score first; equal scores fall back to catalog order so
        // results are deterministic
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        // The queried movie is dropped by index, not by assuming the
        // self-match ranks first
        scored
            .into_iter()
            .filter(|(candidate, _)| *candidate != index)
            .take(k)
            .map(|(candidate, _)| self.recommendation_at(candidate))
            .collect()
    }

    fn recommendation_at(&self, index: usize) -> AppResult<Recommendation> {
        let movie = self
            .catalog
            .get(index)
            .ok_or_else(|| AppError::Internal(format!("catalog index {} out of bounds", index)))?;

        // A missing poster only degrades the one entry, never the batch
        let poster_url = match self.posters.resolve(movie) {
            Ok(url) => url,
            Err(AppError::MissingPoster(id)) => {
                tracing::warn!(
                    movie_id = id,
                    title = %movie.title,
                    "Movie has no poster path, substituting placeholder"
                );
                PLACEHOLDER_POSTER_URL.to_string()
            }
            Err(e) => return Err(e),
        };

        Ok(Recommendation {
            id: movie.id,
            title: movie.title.clone(),
            poster_url,
        })
    }
}
