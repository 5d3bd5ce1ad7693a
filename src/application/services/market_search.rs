//! # Market Search
//!
//! Validates search parameters and narrows the market set with conjunctive,
//! case-insensitive substring filters on name, city and state.
//!
//! # Examples
//!
//! ```ignore
//! use market_api::application::services::MarketSearch;
//!
//! let search = MarketSearch::new(market_repository);
//! let florida = search.search([("state", "Florida")]).await?;
//! ```

use crate::application::error::ApplicationResult;
use crate::domain::entities::Market;
use crate::domain::value_objects::SearchCriteria;
use crate::infrastructure::persistence::MarketRepository;
use std::sync::Arc;
use tracing::{debug, warn};

/// Market search service.
#[derive(Debug, Clone)]
pub struct MarketSearch {
    markets: Arc<dyn MarketRepository>,
}

impl MarketSearch {
    /// Creates a search service over `markets`.
    #[must_use]
    pub fn new(markets: Arc<dyn MarketRepository>) -> Self {
        Self { markets }
    }

    /// Searches markets using raw key/value parameters.
    ///
    /// See [`SearchCriteria::from_params`] for how parameters are validated.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain(DomainError::InvalidCriteria)` if
    /// parameters are present but none is `name`, `city` or `state`, or an
    /// infrastructure error if storage fails.
    pub async fn search<I, K, V>(&self, params: I) -> ApplicationResult<Vec<Market>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let criteria = SearchCriteria::from_params(params).inspect_err(|_| {
            warn!("rejected market search without a searchable field");
        })?;
        self.search_criteria(&criteria).await
    }

    /// Searches markets using already validated criteria.
    ///
    /// # Errors
    ///
    /// Returns an infrastructure error if storage fails.
    pub async fn search_criteria(
        &self,
        criteria: &SearchCriteria,
    ) -> ApplicationResult<Vec<Market>> {
        let markets = self.markets.find_matching(criteria).await?;
        debug!(
            filters = criteria.filters().len(),
            matches = markets.len(),
            "market search completed"
        );
        Ok(markets)
    }
}
