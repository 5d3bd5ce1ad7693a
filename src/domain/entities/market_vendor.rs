//! # Market Vendor Link
//!
//! Join record associating one market with one vendor. At most one link
//! exists per `(market_id, vendor_id)` pair.

use crate::domain::value_objects::{MarketId, MarketVendorId, VendorId};
use chrono::{DateTime, Utc};

/// A link between a market and a vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketVendor {
    id: MarketVendorId,
    market_id: MarketId,
    vendor_id: VendorId,
    created_at: DateTime<Utc>,
}

impl MarketVendor {
    /// Rebuilds a link from stored parts.
    #[must_use]
    pub fn from_parts(
        id: MarketVendorId,
        market_id: MarketId,
        vendor_id: VendorId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            market_id,
            vendor_id,
            created_at,
        }
    }

    /// Returns the link ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> MarketVendorId {
        self.id
    }

    /// Returns the linked market.
    #[inline]
    #[must_use]
    pub fn market_id(&self) -> MarketId {
        self.market_id
    }

    /// Returns the linked vendor.
    #[inline]
    #[must_use]
    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    /// Returns when the link was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if this link joins exactly `market_id` and `vendor_id`.
    #[inline]
    #[must_use]
    pub fn links(&self, market_id: MarketId, vendor_id: VendorId) -> bool {
        self.market_id == market_id && self.vendor_id == vendor_id
    }
}
