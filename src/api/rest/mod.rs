//! # REST API
//!
//! REST endpoints using axum.
//!
//! Successful responses are `{"data": ...}` documents; failures are
//! `{"errors": [{"details": "..."}]}` with a matching status code.
//!
//! # Endpoints
//!
//! ## Markets
//! - `GET /api/v0/markets` - List all markets with vendor counts
//! - `GET /api/v0/markets/{id}` - Get market by ID
//! - `GET /api/v0/markets/search` - Search by `name`, `city` and `state`
//! - `GET /api/v0/markets/{id}/vendors` - List vendors linked to a market
//!
//! ## Vendors
//! - `GET /api/v0/vendors/{id}` - Get vendor by ID
//! - `POST /api/v0/vendors` - Create vendor
//! - `PATCH /api/v0/vendors/{id}` - Update vendor
//! - `DELETE /api/v0/vendors/{id}` - Delete vendor and its links
//!
//! ## Market Vendors
//! - `POST /api/v0/market_vendors` - Link a vendor to a market
//! - `DELETE /api/v0/market_vendors` - Remove a link
//!
//! ## Health
//! - `GET /api/v0/health` - Health check endpoint
//!
//! # Usage
//!
//! ```ignore
//! use market_api::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let router = create_router(Arc::new(AppState::in_memory()));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorDetail, ErrorResponse};
pub use handlers::{
    AppState, Document, HealthResponse, MarketResponse, MarketVendorResponse, Resource,
    VendorResponse,
};
pub use routes::{API_PREFIX, create_router};
