use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores, read-only after load
///
/// `scores[i][j]` is the content similarity between the movies at catalog
/// indices `i` and `j`. The matrix is square and symmetric; the diagonal
/// holds self-similarity.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    scores: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Loads the matrix from its bincode artifact
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            AppError::Load(format!(
                "failed to read similarity matrix {}: {}",
                path.display(),
                e
            ))
        })?;
        let scores: Vec<Vec<f32>> = bincode::deserialize(&bytes)?;

        let matrix = Self::from_rows(scores)?;
        tracing::info!(rows = matrix.len(), path = %path.display(), "Similarity matrix loaded");
        Ok(matrix)
    }

    /// Builds a matrix from in-memory rows, rejecting non-square input
    pub fn from_rows(scores: Vec<Vec<f32>>) -> AppResult<Self> {
        let n = scores.len();
        for (i, row) in scores.iter().enumerate() {
            if row.len() != n {
                return Err(AppError::Load(format!(
                    "similarity matrix is not square: row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        Ok(Self { scores })
    }

    /// Writes the bincode artifact; the counterpart of [`SimilarityMatrix::load`]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let bytes = bincode::serialize(&self.scores)?;
        fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Scores for one movie against the whole catalog as `(index, score)`
    /// pairs in catalog order
    pub fn row(&self, index: usize) -> Option<Vec<(usize, f32)>> {
        self.scores
            .get(index)
            .map(|row| row.iter().copied().enumerate().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_accepts_square() {
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]).unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_row_pairs_scores_with_catalog_indices() {
        let matrix =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        assert_eq!(matrix.row(0), Some(vec![(0, 1.0), (1, 0.5)]));
        assert_eq!(matrix.row(2), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.bin");

        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.1],
            vec![0.9, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ])
        .unwrap();
        matrix.save(&path).unwrap();

        let loaded = SimilarityMatrix::load(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.row(1), Some(vec![(0, 0.9), (1, 1.0), (2, 0.2)]));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SimilarityMatrix::load("does/not/exist.bin").unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.bin");
        fs::write(&path, b"not bincode").unwrap();

        let err = SimilarityMatrix::load(&path).unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
    }
}
