//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur during use case execution,
//! including validation failures, missing entities, association conflicts and
//! infrastructure errors. Their `Display` output is the detail message
//! reported to API clients.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)                 - Field validation, invalid search criteria
//! ├── Infrastructure(InfrastructureError) - Storage failures
//! ├── NotFound                            - Market or vendor id does not exist
//! ├── MarketNotFound / VendorNotFound     - Link references a missing entity
//! ├── DuplicateLink                       - Pair is already linked
//! └── LinkNotFound                        - Pair is not linked
//! ```
//!
//! # Examples
//!
//! ```
//! use market_api::application::error::ApplicationError;
//! use market_api::infrastructure::persistence::RepositoryError;
//! use market_api::domain::value_objects::{MarketId, VendorId};
//!
//! let err = ApplicationError::not_found("Market", "123");
//! assert_eq!(err.to_string(), "Couldn't find Market with 'id'=123");
//!
//! let err = ApplicationError::duplicate_link(MarketId::new(1), VendorId::new(2));
//! assert!(err.is_conflict());
//!
//! let app_err: ApplicationError = RepositoryError::connection("connection timeout").into();
//! assert!(app_err.is_internal());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::{MarketId, VendorId};
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Infrastructure layer error.
///
/// Represents errors from external systems such as the database.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Infrastructure failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    /// Requested entity does not exist.
    #[error("Couldn't find {resource_type} with 'id'={id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier as supplied.
        id: String,
    },

    /// A link was requested for a market that does not exist.
    #[error("Validation failed: Market must exist")]
    MarketNotFound(MarketId),

    /// A link was requested for a vendor that does not exist.
    #[error("Validation failed: Vendor must exist")]
    VendorNotFound(VendorId),

    /// The market and vendor are already linked.
    #[error("Validation failed: Market vendor association already exists")]
    DuplicateLink {
        /// Market of the existing link.
        market_id: MarketId,
        /// Vendor of the existing link.
        vendor_id: VendorId,
    },

    /// No link exists for the market and vendor.
    #[error("Couldn't find MarketVendor with market_id={market_id} and vendor_id={vendor_id}")]
    LinkNotFound {
        /// Requested market.
        market_id: MarketId,
        /// Requested vendor.
        vendor_id: VendorId,
    },
}

impl ApplicationError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Creates a duplicate link error.
    #[must_use]
    pub fn duplicate_link(market_id: MarketId, vendor_id: VendorId) -> Self {
        Self::DuplicateLink {
            market_id,
            vendor_id,
        }
    }

    /// Creates a link not found error.
    #[must_use]
    pub fn link_not_found(market_id: MarketId, vendor_id: VendorId) -> Self {
        Self::LinkNotFound {
            market_id,
            vendor_id,
        }
    }

    /// Returns true if a requested entity or link does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::MarketNotFound(_)
                | Self::VendorNotFound(_)
                | Self::LinkNotFound { .. }
        )
    }

    /// Returns true if this is a field validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_validation())
    }

    /// Returns true if the search criteria named no searchable field.
    #[must_use]
    pub fn is_invalid_criteria(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_invalid_criteria())
    }

    /// Returns true if the request conflicts with existing state.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::DuplicateLink { .. })
    }

    /// Returns true if this is an infrastructure failure.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Infrastructure(_))
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        Self::Infrastructure(InfrastructureError::Repository(err))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
