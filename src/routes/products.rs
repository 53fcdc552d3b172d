use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Product, ProductId},
    routes::AppState,
    services::ProductFilter,
};

/// Handler for single product lookup
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = ProductId::new(product_id);
    state
        .snapshot
        .catalog
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {}", id)))
}

/// Handler returning every product that passes the filter, in catalog order
pub async fn filter(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Json(filter): Json<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let catalog = &state.snapshot.catalog;
    let matching = filter.apply(catalog)?;

    tracing::info!(
        request_id = %request_id,
        matched = matching.len(),
        "Filtered catalog"
    );

    let products: Vec<Product> = matching
        .iter()
        .filter_map(|id| catalog.get(id))
        .cloned()
        .collect();

    Ok(Json(products))
}
