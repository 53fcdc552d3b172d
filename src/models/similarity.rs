use crate::error::{AppError, AppResult};

const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// Read access to precomputed item-item similarities, indexed by catalog row
pub trait SimilarityProvider: Send + Sync {
    /// Number of rows (and columns) in the matrix
    fn dimension(&self) -> usize;

    /// Similarity of `row` to every catalog row, or `None` when out of range
    fn similarities(&self, row: usize) -> Option<&[f64]>;
}

/// Dense, square, symmetric, non-negative similarity matrix stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AppError::Validation(format!(
                    "similarity matrix is not square: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    size
                )));
            }
            if let Some((j, v)) = row
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v < 0.0)
            {
                return Err(AppError::Validation(format!(
                    "similarity matrix entry ({}, {}) = {} must be finite and non-negative",
                    i, j, v
                )));
            }
            values.extend(row);
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let (a, b) = (values[i * size + j], values[j * size + i]);
                if (a - b).abs() > SYMMETRY_TOLERANCE {
                    return Err(AppError::Validation(format!(
                        "similarity matrix is not symmetric at ({}, {}): {} vs {}",
                        i, j, a, b
                    )));
                }
            }
        }

        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }
}

impl SimilarityProvider for SimilarityMatrix {
    fn dimension(&self) -> usize {
        self.size
    }

    fn similarities(&self, row: usize) -> Option<&[f64]> {
        if row < self.size {
            Some(&self.values[row * self.size..(row + 1) * self.size])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_access() {
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.5, 0.2],
            vec![0.5, 1.0, 0.1],
            vec![0.2, 0.1, 1.0],
        ])
        .unwrap();

        assert_eq!(matrix.dimension(), 3);
        assert_eq!(matrix.similarities(1), Some(&[0.5, 1.0, 0.1][..]));
        assert_eq!(matrix.similarities(3), None);
        assert_eq!(matrix.get(2, 0), Some(0.2));
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("not square")));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, 0.5], vec![0.4, 1.0]]);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("symmetric")));
    }

    #[test]
    fn test_rejects_negative_entries() {
        let result = SimilarityMatrix::from_rows(vec![vec![1.0, -0.1], vec![-0.1, 1.0]]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
