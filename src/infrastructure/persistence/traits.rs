//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! This module defines the repository traits (ports) that abstract
//! persistence operations. Implementations can use different backends
//! like PostgreSQL or in-memory storage.
//!
//! # Available Repositories
//!
//! - [`MarketRepository`]: Persistence and substring search for markets
//! - [`VendorRepository`]: Persistence for vendors
//! - [`MarketVendorRepository`]: Persistence for market-vendor links
//!
//! # Examples
//!
//! ```ignore
//! use market_api::infrastructure::persistence::traits::MarketVendorRepository;
//!
//! async fn vendor_count(repo: &impl MarketVendorRepository, market_id: MarketId) {
//!     let count = repo.count_for_market(market_id).await?;
//!     println!("Market {market_id} has {count} vendors");
//! }
//! ```

use crate::domain::entities::{
    Market, MarketAttributes, MarketVendor, Vendor, VendorAttributes,
};
use crate::domain::value_objects::{MarketId, SearchCriteria, VendorId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Duplicate entity.
    #[error("Duplicate entity: {entity_type} with id {id} already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for markets.
///
/// Besides plain persistence, exposes the substring-match query used by
/// market search.
#[async_trait]
pub trait MarketRepository: Send + Sync + fmt::Debug {
    /// Inserts a new market and returns it with its assigned ID.
    async fn insert(&self, attributes: &MarketAttributes) -> RepositoryResult<Market>;

    /// Gets a market by ID.
    ///
    /// Returns `None` if the market does not exist.
    async fn get(&self, id: MarketId) -> RepositoryResult<Option<Market>>;

    /// Gets all markets in ascending ID order.
    async fn get_all(&self) -> RepositoryResult<Vec<Market>>;

    /// Finds markets satisfying every filter in `criteria`.
    ///
    /// Each filter is a case-insensitive substring match on its field.
    /// Results are in ascending ID order.
    async fn find_matching(&self, criteria: &SearchCriteria) -> RepositoryResult<Vec<Market>>;

    /// Counts all markets.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for vendors.
#[async_trait]
pub trait VendorRepository: Send + Sync + fmt::Debug {
    /// Inserts a new vendor and returns it with its assigned ID.
    async fn insert(&self, attributes: &VendorAttributes) -> RepositoryResult<Vendor>;

    /// Gets a vendor by ID.
    ///
    /// Returns `None` if the vendor does not exist.
    async fn get(&self, id: VendorId) -> RepositoryResult<Option<Vendor>>;

    /// Gets the vendors with the given IDs in ascending ID order.
    ///
    /// Unknown IDs are skipped.
    async fn get_many(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>>;

    /// Replaces the attributes of an existing vendor.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vendor does not exist.
    async fn update(&self, id: VendorId, attributes: &VendorAttributes)
    -> RepositoryResult<Vendor>;

    /// Deletes a vendor by ID.
    ///
    /// Returns `Ok(true)` if the vendor was deleted, `Ok(false)` if it didn't exist.
    async fn delete(&self, id: VendorId) -> RepositoryResult<bool>;

    /// Counts all vendors.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for market-vendor links.
///
/// The `(market_id, vendor_id)` pair is unique across all links.
#[async_trait]
pub trait MarketVendorRepository: Send + Sync + fmt::Debug {
    /// Inserts a link for the pair.
    ///
    /// The existence check and the insert happen as one atomic step, so two
    /// concurrent inserts of the same pair cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the pair is already linked.
    async fn insert(&self, market_id: MarketId, vendor_id: VendorId)
    -> RepositoryResult<MarketVendor>;

    /// Finds the link for the pair.
    async fn find_by_pair(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<Option<MarketVendor>>;

    /// Deletes the link for the pair.
    ///
    /// Returns `Ok(true)` if a link was deleted, `Ok(false)` if none existed.
    async fn delete_by_pair(&self, market_id: MarketId, vendor_id: VendorId)
    -> RepositoryResult<bool>;

    /// Deletes every link that references the vendor.
    ///
    /// Returns the number of links removed.
    async fn delete_for_vendor(&self, vendor_id: VendorId) -> RepositoryResult<u64>;

    /// Returns the IDs of vendors linked to the market, ascending.
    async fn vendor_ids_for_market(&self, market_id: MarketId) -> RepositoryResult<Vec<VendorId>>;

    /// Counts links for the market.
    async fn count_for_market(&self, market_id: MarketId) -> RepositoryResult<u64>;

    /// Counts all links.
    async fn count(&self) -> RepositoryResult<u64>;
}
