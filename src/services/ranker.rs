use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, ProductId, RankOutcome, Recommendation, SimilarityProvider},
};

pub const DEFAULT_ALPHA: f64 = 0.6;
pub const DEFAULT_TOP_N: usize = 5;

/// Per-request knobs for [`HybridRanker::rank`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    /// 1.0 ranks purely by similarity to the reference, 0.0 purely by rating
    pub alpha: f64,
    pub top_n: usize,
    /// Leave the reference product itself out of the results
    pub exclude_reference: bool,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            top_n: DEFAULT_TOP_N,
            exclude_reference: false,
        }
    }
}

impl RankOptions {
    fn validate(&self) -> AppResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(AppError::Validation(format!(
                "alpha must be within [0, 1], got {}",
                self.alpha
            )));
        }
        if self.top_n == 0 {
            return Err(AppError::Validation("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Hybrid content/rating ranker
///
/// Scores every product of a filtered subset by
/// `alpha * similarity(reference, product) + (1 - alpha) * normalized_rating(product)`,
/// where the reference is the first product of the subset and the rating is
/// min-max scaled over the full catalog so scores stay comparable across filters.
#[derive(Debug, Clone)]
pub struct HybridRanker {
    marketplace_base_url: String,
}

impl HybridRanker {
    pub fn new(marketplace_base_url: impl Into<String>) -> Self {
        Self {
            marketplace_base_url: marketplace_base_url.into(),
        }
    }

    pub fn product_url(&self, id: &ProductId) -> String {
        format!("{}{}", self.marketplace_base_url, id)
    }

    /// Ranks `subset` (in the order the filter produced it) against `catalog`.
    ///
    /// Returns `RankOutcome::NoMatches` for an empty subset. Ties keep catalog
    /// row order. No partial result is ever returned alongside an error.
    pub fn rank<S>(
        &self,
        catalog: &Catalog,
        subset: &[ProductId],
        similarity: &S,
        options: RankOptions,
    ) -> AppResult<RankOutcome>
    where
        S: SimilarityProvider + ?Sized,
    {
        options.validate()?;

        if similarity.dimension() != catalog.len() {
            return Err(AppError::DataIntegrity(format!(
                "similarity matrix has {} rows but catalog has {} products",
                similarity.dimension(),
                catalog.len()
            )));
        }

        let Some(reference) = subset.first() else {
            tracing::debug!("Filtered subset is empty, nothing to rank");
            return Ok(RankOutcome::NoMatches);
        };

        let reference_row = catalog.index_of(reference).ok_or_else(|| {
            AppError::DataIntegrity(format!("reference product {} is not in the catalog", reference))
        })?;

        let mut candidate_rows = HashSet::with_capacity(subset.len());
        for id in subset {
            let row = catalog.index_of(id).ok_or_else(|| {
                AppError::DataIntegrity(format!("filtered product {} is not in the catalog", id))
            })?;
            candidate_rows.insert(row);
        }

        let reference_similarities = similarity.similarities(reference_row).ok_or_else(|| {
            AppError::DataIntegrity(format!(
                "no similarity row {} for reference product {}",
                reference_row, reference
            ))
        })?;

        let normalized = catalog.normalized_ratings();
        let alpha = options.alpha;

        // Walk rows in catalog order so the stable sort breaks ties by row
        let mut scored: Vec<(usize, f64)> = (0..catalog.len())
            .filter(|row| candidate_rows.contains(row))
            .filter(|row| !(options.exclude_reference && *row == reference_row))
            .map(|row| {
                let score = alpha * reference_similarities[row] + (1.0 - alpha) * normalized[row];
                (row, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(options.top_n);

        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .map(|(row, combined_score)| {
                let product = &catalog.products()[row];
                Recommendation {
                    product_id: product.product_id.clone(),
                    rating: product.rating,
                    combined_score,
                    product_url: self.product_url(&product.product_id),
                }
            })
            .collect();

        tracing::debug!(
            reference = %reference,
            subset_size = candidate_rows.len(),
            alpha,
            returned = recommendations.len(),
            "Ranked filtered subset"
        );

        Ok(RankOutcome::Ranked {
            reference: reference.clone(),
            recommendations,
        })
    }
}
