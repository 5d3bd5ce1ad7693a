//! # Association Manager
//!
//! Creates and removes market-vendor links and answers questions about them.
//!
//! `create_link` checks, in order: the market exists, the vendor exists, the
//! pair is not already linked. The insert itself is an atomic
//! compare-and-insert in the repository, and a duplicate reported there is
//! mapped to the same [`ApplicationError::DuplicateLink`] as the explicit
//! lookup, so concurrent identical requests cannot create two links.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{MarketVendor, Vendor};
use crate::domain::value_objects::{MarketId, VendorId};
use crate::infrastructure::persistence::{
    MarketRepository, MarketVendorRepository, VendorRepository,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Manages links between markets and vendors.
#[derive(Debug, Clone)]
pub struct AssociationManager {
    markets: Arc<dyn MarketRepository>,
    vendors: Arc<dyn VendorRepository>,
    links: Arc<dyn MarketVendorRepository>,
}

impl AssociationManager {
    /// Creates an association manager.
    #[must_use]
    pub fn new(
        markets: Arc<dyn MarketRepository>,
        vendors: Arc<dyn VendorRepository>,
        links: Arc<dyn MarketVendorRepository>,
    ) -> Self {
        Self {
            markets,
            vendors,
            links,
        }
    }

    /// Links a market to a vendor.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::MarketNotFound` if the market does not exist
    /// - `ApplicationError::VendorNotFound` if the vendor does not exist
    /// - `ApplicationError::DuplicateLink` if the pair is already linked
    pub async fn create_link(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> ApplicationResult<MarketVendor> {
        if self.markets.get(market_id).await?.is_none() {
            warn!(%market_id, %vendor_id, "link rejected: market does not exist");
            return Err(ApplicationError::MarketNotFound(market_id));
        }
        if self.vendors.get(vendor_id).await?.is_none() {
            warn!(%market_id, %vendor_id, "link rejected: vendor does not exist");
            return Err(ApplicationError::VendorNotFound(vendor_id));
        }
        if self
            .links
            .find_by_pair(market_id, vendor_id)
            .await?
            .is_some()
        {
            warn!(%market_id, %vendor_id, "link rejected: pair already linked");
            return Err(ApplicationError::duplicate_link(market_id, vendor_id));
        }

        let link = self
            .links
            .insert(market_id, vendor_id)
            .await
            .map_err(|e| {
                if e.is_duplicate() {
                    warn!(%market_id, %vendor_id, "link rejected: concurrent insert won");
                    ApplicationError::duplicate_link(market_id, vendor_id)
                } else {
                    e.into()
                }
            })?;

        info!(link_id = %link.id(), %market_id, %vendor_id, "market vendor link created");
        Ok(link)
    }

    /// Removes the link between a market and a vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::LinkNotFound` if the pair is not linked.
    pub async fn delete_link(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> ApplicationResult<()> {
        if !self.links.delete_by_pair(market_id, vendor_id).await? {
            warn!(%market_id, %vendor_id, "link removal rejected: pair not linked");
            return Err(ApplicationError::link_not_found(market_id, vendor_id));
        }

        info!(%market_id, %vendor_id, "market vendor link removed");
        Ok(())
    }

    /// Returns true if the pair is linked.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn link_exists(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> ApplicationResult<bool> {
        Ok(self
            .links
            .find_by_pair(market_id, vendor_id)
            .await?
            .is_some())
    }

    /// Counts the vendors linked to a market.
    ///
    /// Returns 0 for a market with no links, including unknown markets.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn count_vendors_for_market(&self, market_id: MarketId) -> ApplicationResult<u64> {
        Ok(self.links.count_for_market(market_id).await?)
    }

    /// Returns the vendors linked to a market.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the market does not exist.
    pub async fn vendors_for_market(&self, market_id: MarketId) -> ApplicationResult<Vec<Vendor>> {
        if self.markets.get(market_id).await?.is_none() {
            return Err(ApplicationError::not_found("Market", market_id.to_string()));
        }

        let vendor_ids = self.links.vendor_ids_for_market(market_id).await?;
        let vendors = self.vendors.get_many(&vendor_ids).await?;
        debug!(%market_id, vendors = vendors.len(), "listed market vendors");
        Ok(vendors)
    }
}
