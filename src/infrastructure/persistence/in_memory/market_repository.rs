//! # In-Memory Market Repository
//!
//! In-memory implementation of [`MarketRepository`] for testing and for
//! running the service without a database.
//!
//! This implementation uses a thread-safe ordered map keyed by ID, so every
//! listing comes back in ascending ID order.

use crate::domain::entities::{Market, MarketAttributes};
use crate::domain::value_objects::{MarketId, SearchCriteria};
use crate::infrastructure::persistence::traits::{MarketRepository, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Storage {
    last_id: i64,
    markets: BTreeMap<MarketId, Market>,
}

/// In-memory implementation of [`MarketRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryMarketRepository {
    /// Creates a new empty in-memory market repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of markets in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.markets.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MarketRepository for InMemoryMarketRepository {
    async fn insert(&self, attributes: &MarketAttributes) -> RepositoryResult<Market> {
        let mut storage = self.storage.write().await;
        storage.last_id += 1;
        let id = MarketId::new(storage.last_id);
        let now = Utc::now();
        let market = Market::from_parts(id, attributes.clone(), now, now);
        storage.markets.insert(id, market.clone());
        Ok(market)
    }

    async fn get(&self, id: MarketId) -> RepositoryResult<Option<Market>> {
        let storage = self.storage.read().await;
        Ok(storage.markets.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Market>> {
        let storage = self.storage.read().await;
        Ok(storage.markets.values().cloned().collect())
    }

    async fn find_matching(&self, criteria: &SearchCriteria) -> RepositoryResult<Vec<Market>> {
        let storage = self.storage.read().await;
        let matches: Vec<Market> = storage
            .markets
            .values()
            .filter(|market| criteria.matches(market))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.markets.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attributes(name: &str, city: &str, state: &str) -> MarketAttributes {
        MarketAttributes {
            name: name.to_string(),
            street: "1 Main St".to_string(),
            city: city.to_string(),
            county: "County".to_string(),
            state: state.to_string(),
            zip: "00000".to_string(),
            lat: "1.0".to_string(),
            lon: "2.0".to_string(),
        }
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryMarketRepository::new();
        assert!(repo.is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = InMemoryMarketRepository::new();

        let first = repo.insert(&attributes("A", "X", "Y")).await.unwrap();
        let second = repo.insert(&attributes("B", "X", "Y")).await.unwrap();

        assert!(second.id() > first.id());
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryMarketRepository::new();
        let market = repo
            .insert(&attributes("Haile Market", "Gainesville", "Florida"))
            .await
            .unwrap();

        let retrieved = repo.get(market.id()).await.unwrap();
        assert_eq!(retrieved, Some(market));
    }

    #[tokio::test]
    async fn get_nonexistent_returns_none() {
        let repo = InMemoryMarketRepository::new();
        assert!(repo.get(MarketId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_all_is_ordered_by_id() {
        let repo = InMemoryMarketRepository::new();
        for name in ["C", "A", "B"] {
            repo.insert(&attributes(name, "X", "Y")).await.unwrap();
        }

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn find_matching_applies_every_filter() {
        let repo = InMemoryMarketRepository::new();
        repo.insert(&attributes("Downtown Market", "Gainesville", "Florida"))
            .await
            .unwrap();
        repo.insert(&attributes("Haile Market", "Tampa", "Florida"))
            .await
            .unwrap();
        repo.insert(&attributes("Farmers Market", "Los Angeles", "California"))
            .await
            .unwrap();

        let criteria = SearchCriteria::from_params([("state", "florida")]).unwrap();
        assert_eq!(repo.find_matching(&criteria).await.unwrap().len(), 2);

        let criteria =
            SearchCriteria::from_params([("state", "Florida"), ("city", "tamp")]).unwrap();
        let found = repo.find_matching(&criteria).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().unwrap().name(), "Haile Market");

        let all = repo.find_matching(&SearchCriteria::all()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
