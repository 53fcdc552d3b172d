use serde::Serialize;

use super::ProductId;

/// One ranked product returned to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    pub rating: f64,
    /// Blend of similarity-to-reference and normalized rating, kept for diagnostics
    pub combined_score: f64,
    /// Marketplace link; built by concatenation and never checked, so it may be stale
    pub product_url: String,
}

/// Result of a ranking request
#[derive(Debug, Clone, PartialEq)]
pub enum RankOutcome {
    /// The filtered subset was empty; nothing could be ranked
    NoMatches,
    /// Ranked products, best first, anchored on `reference`
    Ranked {
        reference: ProductId,
        recommendations: Vec<Recommendation>,
    },
}

impl RankOutcome {
    pub fn is_no_matches(&self) -> bool {
        matches!(self, RankOutcome::NoMatches)
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match self {
            RankOutcome::NoMatches => &[],
            RankOutcome::Ranked {
                recommendations, ..
            } => recommendations,
        }
    }
}
