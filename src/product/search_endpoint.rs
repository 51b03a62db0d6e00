//! JSON autocomplete endpoint for product names.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{AppState, Error, product::search_products};

/// The query parameters accepted by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// The partial product name to match. Missing or empty matches all.
    #[serde(default)]
    pub q: String,
}

/// Return up to 10 products matching `q` as a JSON array of
/// `{id, name, category}` objects, ordered by name.
pub async fn search_products_endpoint(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_api_response();
        }
    };

    match search_products(params.q.trim(), &connection) {
        Ok(suggestions) => Json(suggestions).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while searching products: {error}");
            error.into_api_response()
        }
    }
}
