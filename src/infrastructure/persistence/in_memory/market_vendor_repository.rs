//! # In-Memory Market Vendor Repository
//!
//! In-memory implementation of [`MarketVendorRepository`].
//!
//! Links are indexed by their `(market_id, vendor_id)` pair. The duplicate
//! check in [`insert`](MarketVendorRepository::insert) runs under the same
//! write lock as the insert.

use crate::domain::entities::MarketVendor;
use crate::domain::value_objects::{MarketId, MarketVendorId, VendorId};
use crate::infrastructure::persistence::traits::{
    MarketVendorRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Storage {
    last_id: i64,
    links: BTreeMap<(MarketId, VendorId), MarketVendor>,
}

/// In-memory implementation of [`MarketVendorRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketVendorRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryMarketVendorRepository {
    /// Creates a new empty in-memory link repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of links in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.links.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MarketVendorRepository for InMemoryMarketVendorRepository {
    async fn insert(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<MarketVendor> {
        let mut storage = self.storage.write().await;
        if storage.links.contains_key(&(market_id, vendor_id)) {
            return Err(RepositoryError::duplicate(
                "MarketVendor",
                format!("market_id={market_id}, vendor_id={vendor_id}"),
            ));
        }

        storage.last_id += 1;
        let link = MarketVendor::from_parts(
            MarketVendorId::new(storage.last_id),
            market_id,
            vendor_id,
            Utc::now(),
        );
        storage.links.insert((market_id, vendor_id), link.clone());
        Ok(link)
    }

    async fn find_by_pair(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<Option<MarketVendor>> {
        let storage = self.storage.read().await;
        Ok(storage.links.get(&(market_id, vendor_id)).cloned())
    }

    async fn delete_by_pair(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.links.remove(&(market_id, vendor_id)).is_some())
    }

    async fn delete_for_vendor(&self, vendor_id: VendorId) -> RepositoryResult<u64> {
        let mut storage = self.storage.write().await;
        let before = storage.links.len();
        storage.links.retain(|(_, linked), _| *linked != vendor_id);
        Ok((before - storage.links.len()) as u64)
    }

    async fn vendor_ids_for_market(&self, market_id: MarketId) -> RepositoryResult<Vec<VendorId>> {
        let storage = self.storage.read().await;
        let ids: Vec<VendorId> = storage
            .links
            .keys()
            .filter(|(linked, _)| *linked == market_id)
            .map(|(_, vendor_id)| *vendor_id)
            .collect();
        Ok(ids)
    }

    async fn count_for_market(&self, market_id: MarketId) -> RepositoryResult<u64> {
        let ids = self.vendor_ids_for_market(market_id).await?;
        Ok(ids.len() as u64)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.links.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MARKET: MarketId = MarketId::new(1);
    const VENDOR: VendorId = VendorId::new(2);

    #[tokio::test]
    async fn insert_and_find_by_pair() {
        let repo = InMemoryMarketVendorRepository::new();
        let link = repo.insert(MARKET, VENDOR).await.unwrap();

        assert!(link.links(MARKET, VENDOR));
        assert_eq!(repo.find_by_pair(MARKET, VENDOR).await.unwrap(), Some(link));
        assert!(
            repo.find_by_pair(MARKET, VendorId::new(3))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn duplicate_pair_is_rejected() {
        let repo = InMemoryMarketVendorRepository::new();
        repo.insert(MARKET, VENDOR).await.unwrap();

        let err = repo.insert(MARKET, VENDOR).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_inserts_store_one_link() {
        let repo = InMemoryMarketVendorRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(MARKET, VENDOR).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn delete_by_pair() {
        let repo = InMemoryMarketVendorRepository::new();
        repo.insert(MARKET, VENDOR).await.unwrap();

        assert!(repo.delete_by_pair(MARKET, VENDOR).await.unwrap());
        assert!(!repo.delete_by_pair(MARKET, VENDOR).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn counts_and_lists_per_market() {
        let repo = InMemoryMarketVendorRepository::new();
        let other = MarketId::new(9);
        for vendor in 1..=3 {
            repo.insert(MARKET, VendorId::new(vendor)).await.unwrap();
        }
        repo.insert(other, VendorId::new(1)).await.unwrap();

        assert_eq!(repo.count_for_market(MARKET).await.unwrap(), 3);
        assert_eq!(repo.count_for_market(other).await.unwrap(), 1);
        assert_eq!(repo.count_for_market(MarketId::new(42)).await.unwrap(), 0);
        assert_eq!(
            repo.vendor_ids_for_market(MARKET).await.unwrap(),
            vec![VendorId::new(1), VendorId::new(2), VendorId::new(3)]
        );
    }

    #[tokio::test]
    async fn delete_for_vendor_removes_all_its_links() {
        let repo = InMemoryMarketVendorRepository::new();
        repo.insert(MarketId::new(1), VENDOR).await.unwrap();
        repo.insert(MarketId::new(2), VENDOR).await.unwrap();
        repo.insert(MarketId::new(1), VendorId::new(7)).await.unwrap();

        assert_eq!(repo.delete_for_vendor(VENDOR).await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
