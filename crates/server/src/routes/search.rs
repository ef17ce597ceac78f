//! Search route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::Product;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Product>,
}

/// Search the catalog.
///
/// Case-insensitive substring match over title, description, and category
/// name; title prefix matches sort first. A blank query returns no results.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let term = query.q.trim();
    let results = state.catalog().search(term);

    Json(SearchResponse {
        query: term.to_owned(),
        count: results.len(),
        results,
    })
}
