//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`MarketSearch`]: Validated, conjunctive substring search over markets
//! - [`AssociationManager`]: Market-vendor link creation, removal and counts
//! - [`MarketService`]: Market reads with derived vendor counts
//! - [`VendorService`]: Vendor CRUD

pub mod association;
pub mod market_search;
pub mod market_service;
pub mod vendor_service;

pub use association::AssociationManager;
pub use market_search::MarketSearch;
pub use market_service::{MarketService, MarketSummary};
pub use vendor_service::VendorService;
