//! # Vendor Service
//!
//! Create, read, update and delete vendors.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::entities::{Vendor, VendorPatch};
use crate::domain::value_objects::VendorId;
use crate::infrastructure::persistence::{MarketVendorRepository, VendorRepository};
use std::sync::Arc;
use tracing::info;

/// Vendor use cases.
#[derive(Debug, Clone)]
pub struct VendorService {
    vendors: Arc<dyn VendorRepository>,
    links: Arc<dyn MarketVendorRepository>,
}

impl VendorService {
    /// Creates a vendor service.
    #[must_use]
    pub fn new(
        vendors: Arc<dyn VendorRepository>,
        links: Arc<dyn MarketVendorRepository>,
    ) -> Self {
        Self { vendors, links }
    }

    /// Creates a vendor from the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each missing or blank field.
    pub async fn create(&self, patch: VendorPatch) -> ApplicationResult<Vendor> {
        let attributes = patch.into_new_attributes()?;
        let vendor = self.vendors.insert(&attributes).await?;
        info!(vendor_id = %vendor.id(), name = vendor.name(), "vendor created");
        Ok(vendor)
    }

    /// Gets one vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vendor does not exist.
    pub async fn get(&self, id: VendorId) -> ApplicationResult<Vendor> {
        self.vendors
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Applies the supplied fields to an existing vendor.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vendor does not exist, or a
    /// validation error if a supplied field is blank.
    pub async fn update(&self, id: VendorId, patch: VendorPatch) -> ApplicationResult<Vendor> {
        let current = self.get(id).await?;
        let attributes = patch.apply_to(current.attributes())?;
        let vendor = self.vendors.update(id, &attributes).await.map_err(|e| {
            if e.is_not_found() {
                not_found(id)
            } else {
                e.into()
            }
        })?;
        info!(vendor_id = %id, "vendor updated");
        Ok(vendor)
    }

    /// Deletes a vendor and every link that references it.
    ///
    /// The vendor goes first and its links are swept afterwards, so a failed
    /// vendor delete leaves every link in place. PostgreSQL already cascades
    /// the links inside the vendor delete.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotFound` if the vendor does not exist.
    pub async fn delete(&self, id: VendorId) -> ApplicationResult<()> {
        if !self.vendors.delete(id).await? {
            return Err(not_found(id));
        }
        let unlinked = self.links.delete_for_vendor(id).await?;
        info!(vendor_id = %id, unlinked, "vendor deleted");
        Ok(())
    }
}

fn not_found(id: VendorId) -> ApplicationError {
    ApplicationError::not_found("Vendor", id.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::VendorAttributes;
    use crate::domain::value_objects::MarketId;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryMarketVendorRepository, InMemoryVendorRepository,
    };
    use crate::infrastructure::persistence::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;

    fn service() -> (VendorService, InMemoryMarketVendorRepository) {
        let links = InMemoryMarketVendorRepository::new();
        let service = VendorService::new(
            Arc::new(InMemoryVendorRepository::new()),
            Arc::new(links.clone()),
        );
        (service, links)
    }

    fn buzzy_bees() -> VendorPatch {
        VendorPatch {
            name: Some("Buzzy Bees".to_string()),
            description: Some("local honey and wax products".to_string()),
            contact_name: Some("Berly Couwer".to_string()),
            contact_phone: Some("8389928383".to_string()),
            credit_accepted: Some(false),
        }
    }

    #[tokio::test]
    async fn create_and_get() {
        let (service, _) = service();
        let vendor = service.create(buzzy_bees()).await.unwrap();
        assert_eq!(service.get(vendor.id()).await.unwrap(), vendor);
    }

    #[tokio::test]
    async fn create_with_missing_fields_fails() {
        let (service, _) = service();
        let err = service
            .create(VendorPatch {
                name: Some("Vendor".to_string()),
                description: Some("Local Vendor".to_string()),
                ..VendorPatch::default()
            })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn get_missing_vendor() {
        let (service, _) = service();
        let err = service.get(VendorId::new(123_123_123_123)).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Couldn't find Vendor with 'id'=123123123123"
        );
    }

    #[tokio::test]
    async fn update_changes_supplied_fields() {
        let (service, _) = service();
        let vendor = service.create(buzzy_bees()).await.unwrap();

        let updated = service
            .update(
                vendor.id(),
                VendorPatch {
                    contact_name: Some("Kimberly Couwer".to_string()),
                    credit_accepted: Some(true),
                    ..VendorPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.contact_name(), "Kimberly Couwer");
        assert!(updated.credit_accepted());
        assert_eq!(updated.name(), "Buzzy Bees");
    }

    #[tokio::test]
    async fn update_with_blank_field_fails_and_keeps_vendor() {
        let (service, _) = service();
        let vendor = service.create(buzzy_bees()).await.unwrap();

        let err = service
            .update(
                vendor.id(),
                VendorPatch {
                    contact_name: Some(String::new()),
                    ..VendorPatch::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(service.get(vendor.id()).await.unwrap(), vendor);
    }

    #[tokio::test]
    async fn update_missing_vendor() {
        let (service, _) = service();
        let err = service
            .update(VendorId::new(9), buzzy_bees())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_removes_vendor_and_links() {
        let (service, links) = service();
        let vendor = service.create(buzzy_bees()).await.unwrap();
        links.insert(MarketId::new(1), vendor.id()).await.unwrap();
        links.insert(MarketId::new(2), vendor.id()).await.unwrap();

        service.delete(vendor.id()).await.unwrap();

        assert!(service.get(vendor.id()).await.unwrap_err().is_not_found());
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_vendor() {
        let (service, _) = service();
        let err = service.delete(VendorId::new(123_123_123)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    /// Vendor store whose deletes always fail.
    #[derive(Debug)]
    struct FailingDeletes(InMemoryVendorRepository);

    #[async_trait]
    impl VendorRepository for FailingDeletes {
        async fn insert(&self, attributes: &VendorAttributes) -> RepositoryResult<Vendor> {
            self.0.insert(attributes).await
        }

        async fn get(&self, id: VendorId) -> RepositoryResult<Option<Vendor>> {
            self.0.get(id).await
        }

        async fn get_many(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>> {
            self.0.get_many(ids).await
        }

        async fn update(
            &self,
            id: VendorId,
            attributes: &VendorAttributes,
        ) -> RepositoryResult<Vendor> {
            self.0.update(id, attributes).await
        }

        async fn delete(&self, _id: VendorId) -> RepositoryResult<bool> {
            Err(RepositoryError::connection("connection reset"))
        }

        async fn count(&self) -> RepositoryResult<u64> {
            self.0.count().await
        }
    }

    #[tokio::test]
    async fn failed_vendor_delete_keeps_links() {
        let links = InMemoryMarketVendorRepository::new();
        let service = VendorService::new(
            Arc::new(FailingDeletes(InMemoryVendorRepository::new())),
            Arc::new(links.clone()),
        );
        let vendor = service.create(buzzy_bees()).await.unwrap();
        links.insert(MarketId::new(1), vendor.id()).await.unwrap();

        let err = service.delete(vendor.id()).await.unwrap_err();

        assert!(err.is_internal());
        assert_eq!(links.count_for_market(MarketId::new(1)).await.unwrap(), 1);
        assert_eq!(service.get(vendor.id()).await.unwrap(), vendor);
    }
}
