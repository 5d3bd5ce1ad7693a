//! # Market Service
//!
//! Read access to markets, each paired with its derived vendor count, plus
//! administrative creation.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::association::AssociationManager;
use crate::application::services::market_search::MarketSearch;
use crate::domain::entities::{Market, MarketAttributes};
use crate::domain::value_objects::MarketId;
use crate::infrastructure::persistence::MarketRepository;
use std::sync::Arc;
use tracing::info;

/// A market together with the number of vendors linked to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketSummary {
    /// The market.
    pub market: Market,
    /// Number of linked vendors, computed on read.
    pub vendor_count: u64,
}

/// Market use cases.
#[derive(Debug, Clone)]
pub struct MarketService {
    markets: Arc<dyn MarketRepository>,
    search: MarketSearch,
    associations: AssociationManager,
}

impl MarketService {
    /// Creates a market service.
    #[must_use]
    pub fn new(markets: Arc<dyn MarketRepository>, associations: AssociationManager) -> Self {
        Self {
            search: MarketSearch::new(Arc::clone(&markets)),
            markets,
            associations,
        }
    }

    /// Validates and stores a new market.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each blank field.
    pub async fn create(&self, attributes: MarketAttributes) -> ApplicationResult<Market> {
        attributes.validate()?;
        let market = self.markets.insert(&attributes).await?;
        info!(market_id = %market.id(), name = market.name(), "market created");
        Ok(market)
    }

    /// Lists every market.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn list(&self) -> ApplicationResult<Vec<MarketSummary>> {
        let markets = self.markets.get_all().await?;
        self.summarize(markets).await
    }

    /// Gets one market.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the market does not exist.
    pub async fn get(&self, id: MarketId) -> ApplicationResult<MarketSummary> {
        let market = self
            .markets
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Market", id.to_string()))?;
        let vendor_count = self.associations.count_vendors_for_market(id).await?;
        Ok(MarketSummary {
            market,
            vendor_count,
        })
    }

    /// Searches markets by name, city and state.
    ///
    /// # Errors
    ///
    /// Returns an invalid criteria error if no searchable field is named.
    pub async fn search(
        &self,
        params: Vec<(String, String)>,
    ) -> ApplicationResult<Vec<MarketSummary>> {
        let markets = self.search.search(params).await?;
        self.summarize(markets).await
    }

    async fn summarize(&self, markets: Vec<Market>) -> ApplicationResult<Vec<MarketSummary>> {
        let mut summaries = Vec::with_capacity(markets.len());
        for market in markets {
            let vendor_count = self
                .associations
                .count_vendors_for_market(market.id())
                .await?;
            summaries.push(MarketSummary {
                market,
                vendor_count,
            });
        }
        Ok(summaries)
    }
}
