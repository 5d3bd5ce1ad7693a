//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`MarketId`], [`VendorId`], [`MarketVendorId`]: storage-assigned integer identifiers
//!
//! ## Search
//!
//! - [`SearchCriteria`]: validated, conjunctive market search filters
//! - [`SearchField`]: the fields search may filter on

pub mod ids;
pub mod search_criteria;

pub use ids::{MarketId, MarketVendorId, VendorId};
pub use search_criteria::{FieldFilter, SearchCriteria, SearchField};
