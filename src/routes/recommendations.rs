use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ProductId, RankOutcome, Recommendation},
    routes::AppState,
    services::{ProductFilter, RankOptions},
};

const NO_MATCHES_MESSAGE: &str =
    "No products found matching your preferences. Please adjust filters.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecommendationRequest {
    pub filters: ProductFilter,
    pub alpha: Option<f64>,
    pub top_n: Option<usize>,
    pub exclude_reference: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResponse {
    Ranked {
        reference_product_id: ProductId,
        alpha: f64,
        recommendations: Vec<Recommendation>,
    },
    NoMatches {
        message: &'static str,
    },
}

/// Handler for recommendations endpoint
///
/// Filters the catalog, then ranks the matches against the first of them.
/// An empty match set is a normal response telling the client to relax filters.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let options = RankOptions {
        alpha: request.alpha.unwrap_or(state.defaults.alpha),
        top_n: request.top_n.unwrap_or(state.defaults.top_n),
        exclude_reference: request
            .exclude_reference
            .unwrap_or(state.defaults.exclude_reference),
    };

    let snapshot = &state.snapshot;
    let subset = request.filters.apply(&snapshot.catalog)?;

    tracing::info!(
        request_id = %request_id,
        matched = subset.len(),
        alpha = options.alpha,
        top_n = options.top_n,
        "Processing recommendation request"
    );

    let outcome = state
        .ranker
        .rank(&snapshot.catalog, &subset, &snapshot.similarity, options)
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Ranking failed");
            e
        })?;

    let response = match outcome {
        RankOutcome::NoMatches => {
            tracing::info!(request_id = %request_id, "No products matched filters");
            RecommendationResponse::NoMatches {
                message: NO_MATCHES_MESSAGE,
            }
        }
        RankOutcome::Ranked {
            reference,
            recommendations,
        } => {
            tracing::info!(
                request_id = %request_id,
                reference = %reference,
                returned = recommendations.len(),
                "Recommendations ranked"
            );
            RecommendationResponse::Ranked {
                reference_product_id: reference,
                alpha: options.alpha,
                recommendations,
            }
        }
    };

    Ok(Json(response))
}
