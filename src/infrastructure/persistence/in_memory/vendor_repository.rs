//! # In-Memory Vendor Repository
//!
//! In-memory implementation of [`VendorRepository`] for testing and for
//! running the service without a database.

use crate::domain::entities::{Vendor, VendorAttributes};
use crate::domain::value_objects::VendorId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VendorRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Storage {
    last_id: i64,
    vendors: BTreeMap<VendorId, Vendor>,
}

/// In-memory implementation of [`VendorRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryVendorRepository {
    storage: Arc<RwLock<Storage>>,
}

impl InMemoryVendorRepository {
    /// Creates a new empty in-memory vendor repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of vendors in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.vendors.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VendorRepository for InMemoryVendorRepository {
    async fn insert(&self, attributes: &VendorAttributes) -> RepositoryResult<Vendor> {
        let mut storage = self.storage.write().await;
        storage.last_id += 1;
        let id = VendorId::new(storage.last_id);
        let now = Utc::now();
        let vendor = Vendor::from_parts(id, attributes.clone(), now, now);
        storage.vendors.insert(id, vendor.clone());
        Ok(vendor)
    }

    async fn get(&self, id: VendorId) -> RepositoryResult<Option<Vendor>> {
        let storage = self.storage.read().await;
        Ok(storage.vendors.get(&id).cloned())
    }

    async fn get_many(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>> {
        let storage = self.storage.read().await;
        let vendors: Vec<Vendor> = storage
            .vendors
            .values()
            .filter(|vendor| ids.contains(&vendor.id()))
            .cloned()
            .collect();
        Ok(vendors)
    }

    async fn update(
        &self,
        id: VendorId,
        attributes: &VendorAttributes,
    ) -> RepositoryResult<Vendor> {
        let mut storage = self.storage.write().await;
        let vendor = storage
            .vendors
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Vendor", id.to_string()))?;
        vendor.update(attributes.clone(), Utc::now());
        Ok(vendor.clone())
    }

    async fn delete(&self, id: VendorId) -> RepositoryResult<bool> {
        let mut storage = self.storage.write().await;
        Ok(storage.vendors.remove(&id).is_some())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.vendors.len() as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn attributes(name: &str) -> VendorAttributes {
        VendorAttributes {
            name: name.to_string(),
            description: "local honey".to_string(),
            contact_name: "Berly Couwer".to_string(),
            contact_phone: "8389928383".to_string(),
            credit_accepted: false,
        }
    }

    #[tokio::test]
    async fn insert_and_get() {
        let repo = InMemoryVendorRepository::new();
        let vendor = repo.insert(&attributes("Buzzy Bees")).await.unwrap();

        let retrieved = repo.get(vendor.id()).await.unwrap();
        assert_eq!(retrieved, Some(vendor));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn get_many_skips_unknown_ids() {
        let repo = InMemoryVendorRepository::new();
        let a = repo.insert(&attributes("A")).await.unwrap();
        let b = repo.insert(&attributes("B")).await.unwrap();
        repo.insert(&attributes("C")).await.unwrap();

        let found = repo
            .get_many(&[b.id(), VendorId::new(999), a.id()])
            .await
            .unwrap();
        let ids: Vec<VendorId> = found.iter().map(Vendor::id).collect();
        assert_eq!(ids, vec![a.id(), b.id()]);
    }

    #[tokio::test]
    async fn update_replaces_attributes() {
        let repo = InMemoryVendorRepository::new();
        let vendor = repo.insert(&attributes("Buzzy Bees")).await.unwrap();

        let mut changed = attributes("Buzzy Bees");
        changed.credit_accepted = true;
        let updated = repo.update(vendor.id(), &changed).await.unwrap();

        assert!(updated.credit_accepted());
        assert!(updated.updated_at() >= vendor.updated_at());
        assert_eq!(repo.get(vendor.id()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_nonexistent_is_not_found() {
        let repo = InMemoryVendorRepository::new();
        let err = repo
            .update(VendorId::new(5), &attributes("X"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete() {
        let repo = InMemoryVendorRepository::new();
        let vendor = repo.insert(&attributes("Buzzy Bees")).await.unwrap();

        assert!(repo.delete(vendor.id()).await.unwrap());
        assert!(!repo.delete(vendor.id()).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.is_empty());
    }
}
