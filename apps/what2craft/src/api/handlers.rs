//! # API Endpoint Handlers

use super::{
    AppState,
    types::{ErrorResponse, HealthResponse},
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use what2craft_core::CraftingClosure;

/// Body returned whenever the closure cannot be produced.
const CATALOG_UNAVAILABLE: &str = "item catalog unavailable";

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint. Never triggers a catalog load.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse::new(
        state.catalog.edition(),
        state.catalog.is_ready(),
    ))
}

// =============================================================================
// ITEMS HANDLER
// =============================================================================

/// Every crafting-relevant item, ordered by id.
///
/// The first request computes the closure; later requests reuse it.
pub async fn items_handler(State(state): State<AppState>) -> Response {
    match crafting_closure(&state).await {
        Some(closure) => Json(&*closure).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(CATALOG_UNAVAILABLE)),
        )
            .into_response(),
    }
}

/// Fetch the closure on a blocking worker so file I/O stays off the executor.
async fn crafting_closure(state: &AppState) -> Option<Arc<CraftingClosure>> {
    let cache = Arc::clone(&state.catalog);
    match tokio::task::spawn_blocking(move || cache.get()).await {
        Ok(Ok(closure)) => Some(closure),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "item catalog unavailable");
            None
        }
        Err(e) => {
            tracing::error!("Catalog worker failed: {}", e);
            None
        }
    }
}
