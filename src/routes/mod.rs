use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::Snapshot,
    services::{HybridRanker, RankOptions},
};

pub mod catalog;
pub mod products;
pub mod recommendations;

/// Shared, read-only state for every request
pub struct AppState {
    pub snapshot: Arc<Snapshot>,
    pub ranker: HybridRanker,
    /// Applied when a request leaves alpha or top_n unset
    pub defaults: RankOptions,
}

impl AppState {
    pub fn new(snapshot: Arc<Snapshot>, config: &Config) -> Self {
        Self {
            snapshot,
            ranker: HybridRanker::new(config.marketplace_base_url.clone()),
            defaults: RankOptions {
                alpha: config.default_alpha,
                top_n: config.default_top_n,
                ..RankOptions::default()
            },
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/catalog", get(catalog::summary))
        .route("/products/filter", post(products::filter))
        .route("/products/:product_id", get(products::get_product))
        .route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
