//! # Persistence Layer
//!
//! Repository ports and their implementations.
//!
//! ## Repository Traits (Ports)
//!
//! - [`MarketRepository`]: Persistence and substring search for markets
//! - [`VendorRepository`]: Persistence for vendors
//! - [`MarketVendorRepository`]: Persistence for market-vendor links
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for tests and database-less runs
//! - `postgres`: PostgreSQL implementations using sqlx

pub mod in_memory;
pub mod postgres;
pub mod traits;

pub use traits::{
    MarketRepository, MarketVendorRepository, RepositoryError, RepositoryResult,
    VendorRepository,
};
