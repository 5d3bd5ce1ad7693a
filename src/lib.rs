//! # Market API
//!
//! REST service for farmers markets and the vendors that sell at them.
//!
//! Markets are read-only to clients and can be searched by name, city and
//! state with case-insensitive substring filters. Vendors support full CRUD.
//! Market-vendor links form a many-to-many relation with at most one link per
//! pair.
//!
//! # Architecture
//!
//! ```text
//! api             axum router, handlers, error mapping
//! application     use cases: market search, association manager, CRUD services
//! domain          entities, identifiers, search criteria, validation
//! infrastructure  repository ports with in-memory and PostgreSQL adapters
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use market_api::api::rest::{AppState, create_router};
//! use std::sync::Arc;
//!
//! let app = create_router(Arc::new(AppState::in_memory()));
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
