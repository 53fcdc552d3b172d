use chrono::{DateTime, Utc};

use super::{Catalog, SimilarityMatrix, SimilarityProvider};
use crate::error::{AppError, AppResult};

/// Catalog and similarity matrix loaded together for one serving session
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub similarity: SimilarityMatrix,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    /// Pairs a catalog with its matrix, refusing a matrix sized for a different catalog
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> AppResult<Self> {
        if similarity.dimension() != catalog.len() {
            return Err(AppError::DataIntegrity(format!(
                "similarity matrix is {}x{} but catalog has {} products",
                similarity.dimension(),
                similarity.dimension(),
                catalog.len()
            )));
        }

        Ok(Self {
            catalog,
            similarity,
            loaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::tests::product;

    #[test]
    fn test_rejects_dimension_mismatch() {
        let catalog = Catalog::new(vec![product("A", 4.0), product("B", 3.0)]).unwrap();
        let similarity = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();

        let result = Snapshot::new(catalog, similarity);
        assert!(matches!(result, Err(AppError::DataIntegrity(msg)) if msg.contains("1x1")));
    }

    #[test]
    fn test_accepts_aligned_inputs() {
        let catalog = Catalog::new(vec![product("A", 4.0), product("B", 3.0)]).unwrap();
        let similarity =
            SimilarityMatrix::from_rows(vec![vec![1.0, 0.3], vec![0.3, 1.0]]).unwrap();

        let snapshot = Snapshot::new(catalog, similarity).unwrap();
        assert_eq!(snapshot.catalog.len(), 2);
    }
}
