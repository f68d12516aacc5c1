//! Sparse TF-IDF matrix helpers over `sprs` CSR matrices.

use sprs::{CsMat, TriMat};

use crate::error::{AppError, AppResult};

/// Builds a CSR matrix from per-row `(column, value)` entries; zeros are skipped
pub fn csr_from_rows(n_cols: usize, rows: Vec<Vec<(usize, f64)>>) -> CsMat<f64> {
    let mut tri = TriMat::new((rows.len(), n_cols));
    for (row, entries) in rows.into_iter().enumerate() {
        for (col, value) in entries {
            if value != 0.0 {
                tri.add_triplet(row, col, value);
            }
        }
    }
    tri.to_csr()
}

/// Cosine similarity between row `query` and every row, in row order.
///
/// Rows with a zero norm score 0 against everything.
pub fn cosine_similarities(matrix: &CsMat<f64>, query: usize) -> Vec<f64> {
    let Some(query_row) = matrix.outer_view(query) else {
        return vec![0.0; matrix.rows()];
    };
    let query_norm = query_row.l2_norm();
    if query_norm == 0.0 {
        return vec![0.0; matrix.rows()];
    }

    matrix
        .outer_iterator()
        .map(|row| {
            let norm = row.l2_norm();
            if norm == 0.0 {
                0.0
            } else {
                row.dot(&query_row) / (query_norm * norm)
            }
        })
        .collect()
}

/// Re-runs the CSR structure checks on a deserialized matrix
pub fn check_structure(matrix: &CsMat<f64>) -> AppResult<()> {
    if !matrix.is_csr() {
        return Err(AppError::Artifact("matrix is not stored row-major".to_string()));
    }
    CsMat::try_new(
        matrix.shape(),
        matrix.proper_indptr().into_owned(),
        matrix.indices().to_vec(),
        matrix.data().to_vec(),
    )
    .map(|_| ())
    .map_err(|(_, _, _, e)| AppError::Artifact(format!("malformed matrix: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsMat<f64> {
        csr_from_rows(
            3,
            vec![
                vec![(2, 1.0), (0, 1.0)],
                vec![(0, 2.0), (2, 2.0)],
                vec![(1, 5.0), (0, 0.0)],
                vec![],
            ],
        )
    }

    #[test]
    fn test_csr_from_rows() {
        let matrix = sample();
        assert_eq!(matrix.shape(), (4, 3));
        assert_eq!(matrix.nnz(), 5);
        assert!(matrix.is_csr());
        assert_eq!(matrix.get(0, 2), Some(&1.0));
        assert_eq!(matrix.get(2, 0), None);
        assert!(check_structure(&matrix).is_ok());
    }

    #[test]
    fn test_cosine_similarities() {
        let scores = cosine_similarities(&sample(), 0);
        assert!((scores[0] - 1.0).abs() < 1e-12);
        assert!((scores[1] - 1.0).abs() < 1e-12);
        assert_eq!(scores[2], 0.0);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn test_cosine_similarities_for_empty_row() {
        assert_eq!(cosine_similarities(&sample(), 3), vec![0.0; 4]);
    }

    #[test]
    fn test_check_structure_rejects_column_major() {
        let matrix = sample().to_csc();
        assert!(matches!(check_structure(&matrix), Err(AppError::Artifact(_))));
    }
}
