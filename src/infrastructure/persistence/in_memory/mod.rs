//! # In-Memory Repositories
//!
//! In-memory implementations for testing and database-less runs.
//!
//! ## Available Repositories
//!
//! - [`InMemoryMarketRepository`]: Market persistence and search
//! - [`InMemoryVendorRepository`]: Vendor persistence
//! - [`InMemoryMarketVendorRepository`]: Market-vendor link persistence
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<_>>` over ordered maps for
//! thread-safe access and stable ID ordering.

pub mod market_repository;
pub mod market_vendor_repository;
pub mod vendor_repository;

pub use market_repository::InMemoryMarketRepository;
pub use market_vendor_repository::InMemoryMarketVendorRepository;
pub use vendor_repository::InMemoryVendorRepository;
