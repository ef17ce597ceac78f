//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::{Category, Product};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Restrict to a category slug.
    pub category: Option<String>,
    /// Restrict to featured products.
    pub featured: Option<bool>,
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
}

/// List products, optionally filtered by category and featured flag.
///
/// An unknown category slug yields an empty list, not an error, matching the
/// catalog's filter semantics.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<ProductListResponse> {
    let catalog = state.catalog();

    let mut products = match &query.category {
        Some(slug) => catalog.products_in_category(slug),
        None => catalog.products().to_vec(),
    };

    if query.featured == Some(true) {
        products.retain(|p| p.featured);
    }

    Json(ProductListResponse { products })
}

/// Product detail by slug.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .product_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product not found: {slug}")))
}

/// Category listing.
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().to_vec())
}
