//! # REST Routes
//!
//! Router configuration for the REST API.

use crate::api::rest::handlers::{self, AppState};
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Path prefix for every endpoint.
pub const API_PREFIX: &str = "/api/v0";

/// Creates the REST API router.
///
/// Every route is nested under [`API_PREFIX`]. Requests are traced and CORS
/// is permissive.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/markets", get(handlers::list_markets))
        .route("/markets/search", get(handlers::search_markets))
        .route("/markets/{id}", get(handlers::get_market))
        .route("/markets/{id}/vendors", get(handlers::list_market_vendors))
        .route("/vendors", post(handlers::create_vendor))
        .route(
            "/vendors/{id}",
            get(handlers::get_vendor)
                .patch(handlers::update_vendor)
                .delete(handlers::delete_vendor),
        )
        .route(
            "/market_vendors",
            post(handlers::create_market_vendor).delete(handlers::delete_market_vendor),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
