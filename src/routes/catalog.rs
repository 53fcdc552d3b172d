use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::{models::CatalogSummary, routes::AppState};

const LINK_DISCLAIMER: &str = "Some product links may no longer be available if the \
product's ASIN has changed or the item has been removed from the marketplace.";

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    #[serde(flatten)]
    pub summary: CatalogSummary,
    pub loaded_at: DateTime<Utc>,
    pub link_disclaimer: &'static str,
}

/// Bounds and choices a client needs to build its filter controls
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        summary: state.snapshot.catalog.summary(),
        loaded_at: state.snapshot.loaded_at,
        link_disclaimer: LINK_DISCLAIMER,
    })
}
