//! All routes for the HTTP API.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{api, AppState};

pub mod rca;

/// Builds the API router over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/rca",
            get(rca::get).post(rca::post).options(rca::options),
        )
        .fallback(|| async { api::Error::RouteNotFound })
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
