//! # Vendor Entity
//!
//! A vendor that sells at one or more markets.
//!
//! Vendors are created from a [`VendorPatch`] (every supplied field applied
//! over blank defaults) and updated by applying a patch over the stored
//! attributes. Both paths end in [`VendorAttributes::validate`].

use crate::domain::errors::{DomainError, DomainResult, blank_field_messages};
use crate::domain::value_objects::VendorId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated fields of a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VendorAttributes {
    /// Vendor name.
    pub name: String,
    /// What the vendor sells.
    pub description: String,
    /// Contact person.
    pub contact_name: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Whether the vendor accepts credit cards.
    pub credit_accepted: bool,
}

impl VendorAttributes {
    /// Checks that every text field is present.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] listing each blank field.
    pub fn validate(&self) -> DomainResult<()> {
        let messages = blank_field_messages([
            ("Name", self.name.as_str()),
            ("Description", self.description.as_str()),
            ("Contact name", self.contact_name.as_str()),
            ("Contact phone", self.contact_phone.as_str()),
        ]);

        if messages.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(messages))
        }
    }
}

/// A partial set of vendor fields supplied by a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VendorPatch {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New contact person.
    pub contact_name: Option<String>,
    /// New contact phone.
    pub contact_phone: Option<String>,
    /// New credit flag.
    pub credit_accepted: Option<bool>,
}

impl VendorPatch {
    /// Builds attributes for a new vendor.
    ///
    /// Missing text fields are blank and `credit_accepted` defaults to false.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if any text field is blank.
    pub fn into_new_attributes(self) -> DomainResult<VendorAttributes> {
        self.apply_to(&VendorAttributes::default())
    }

    /// Applies the supplied fields over `current`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the result has a blank field.
    pub fn apply_to(self, current: &VendorAttributes) -> DomainResult<VendorAttributes> {
        let attributes = VendorAttributes {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            contact_name: self
                .contact_name
                .unwrap_or_else(|| current.contact_name.clone()),
            contact_phone: self
                .contact_phone
                .unwrap_or_else(|| current.contact_phone.clone()),
            credit_accepted: self.credit_accepted.unwrap_or(current.credit_accepted),
        };
        attributes.validate()?;
        Ok(attributes)
    }
}

/// A persisted vendor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    id: VendorId,
    attributes: VendorAttributes,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Vendor {
    /// Rebuilds a vendor from stored parts.
    #[must_use]
    pub fn from_parts(
        id: VendorId,
        attributes: VendorAttributes,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            attributes,
            created_at,
            updated_at,
        }
    }

    /// Returns the vendor ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> VendorId {
        self.id
    }

    /// Returns all fields.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &VendorAttributes {
        &self.attributes
    }

    /// Returns the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Returns the description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.attributes.description
    }

    /// Returns the contact person.
    #[inline]
    #[must_use]
    pub fn contact_name(&self) -> &str {
        &self.attributes.contact_name
    }

    /// Returns the contact phone number.
    #[inline]
    #[must_use]
    pub fn contact_phone(&self) -> &str {
        &self.attributes.contact_phone
    }

    /// Returns true if the vendor accepts credit cards.
    #[inline]
    #[must_use]
    pub fn credit_accepted(&self) -> bool {
        self.attributes.credit_accepted
    }

    /// Returns when the vendor was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the vendor was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the attributes and bumps `updated_at`.
    pub fn update(&mut self, attributes: VendorAttributes, at: DateTime<Utc>) {
        self.attributes = attributes;
        self.updated_at = at;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_patch() -> VendorPatch {
        VendorPatch {
            name: Some("Buzzy Bees".to_string()),
            description: Some("local honey and wax products".to_string()),
            contact_name: Some("Berly Couwer".to_string()),
            contact_phone: Some("8389928383".to_string()),
            credit_accepted: Some(true),
        }
    }

    #[test]
    fn new_attributes_from_full_patch() {
        let attrs = full_patch().into_new_attributes().unwrap();
        assert_eq!(attrs.name, "Buzzy Bees");
        assert!(attrs.credit_accepted);
    }

    #[test]
    fn credit_accepted_defaults_to_false() {
        let patch = VendorPatch {
            credit_accepted: None,
            ..full_patch()
        };
        assert!(!patch.into_new_attributes().unwrap().credit_accepted);
    }

    #[test]
    fn missing_fields_fail_on_create() {
        let patch = VendorPatch {
            name: Some("Vendor".to_string()),
            description: Some("Local Vendor".to_string()),
            ..VendorPatch::default()
        };

        let err = patch.into_new_attributes().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Contact name can't be blank, Contact phone can't be blank"
        );
    }

    #[test]
    fn patch_keeps_unsupplied_fields() {
        let current = full_patch().into_new_attributes().unwrap();
        let patch = VendorPatch {
            contact_name: Some("Kimberly Couwer".to_string()),
            credit_accepted: Some(false),
            ..VendorPatch::default()
        };

        let updated = patch.apply_to(&current).unwrap();
        assert_eq!(updated.contact_name, "Kimberly Couwer");
        assert!(!updated.credit_accepted);
        assert_eq!(updated.name, current.name);
        assert_eq!(updated.contact_phone, current.contact_phone);
    }

    #[test]
    fn blank_supplied_field_fails_on_update() {
        let current = full_patch().into_new_attributes().unwrap();
        let patch = VendorPatch {
            contact_name: Some(String::new()),
            ..VendorPatch::default()
        };

        let err = patch.apply_to(&current).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: Contact name can't be blank");
    }
}
