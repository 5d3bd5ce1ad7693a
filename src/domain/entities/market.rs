//! # Market Entity
//!
//! A farmers market with its address and coordinates.
//!
//! # Examples
//!
//! ```
//! use market_api::domain::entities::MarketAttributes;
//!
//! let attributes = MarketAttributes {
//!     name: "Haile Farmers Market".to_string(),
//!     street: "5213 SW 91st Dr".to_string(),
//!     city: "Gainesville".to_string(),
//!     county: "Alachua".to_string(),
//!     state: "Florida".to_string(),
//!     zip: "32608".to_string(),
//!     lat: "29.6140".to_string(),
//!     lon: "-82.4201".to_string(),
//! };
//!
//! assert!(attributes.validate().is_ok());
//! ```

use crate::domain::errors::{DomainError, DomainResult, blank_field_messages};
use crate::domain::value_objects::MarketId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive fields of a market.
///
/// Every field is mandatory. Coordinates are kept as strings exactly as
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MarketAttributes {
    /// Market name.
    pub name: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// County.
    pub county: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub lon: String,
}

impl MarketAttributes {
    /// Checks that every field is present.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] listing each blank field.
    pub fn validate(&self) -> DomainResult<()> {
        let messages = blank_field_messages([
            ("Name", self.name.as_str()),
            ("Street", self.street.as_str()),
            ("City", self.city.as_str()),
            ("County", self.county.as_str()),
            ("State", self.state.as_str()),
            ("Zip", self.zip.as_str()),
            ("Lat", self.lat.as_str()),
            ("Lon", self.lon.as_str()),
        ]);

        if messages.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(messages))
        }
    }
}

/// A persisted market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Market {
    id: MarketId,
    attributes: MarketAttributes,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Market {
    /// Rebuilds a market from stored parts.
    #[must_use]
    pub fn from_parts(
        id: MarketId,
        attributes: MarketAttributes,
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

    /// Returns the market ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> MarketId {
        self.id
    }

    /// Returns all descriptive fields.
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &MarketAttributes {
        &self.attributes
    }

    /// Returns the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Returns the street address.
    #[inline]
    #[must_use]
    pub fn street(&self) -> &str {
        &self.attributes.street
    }

    /// Returns the city.
    #[inline]
    #[must_use]
    pub fn city(&self) -> &str {
        &self.attributes.city
    }

    /// Returns the county.
    #[inline]
    #[must_use]
    pub fn county(&self) -> &str {
        &self.attributes.county
    }

    /// Returns the state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &str {
        &self.attributes.state
    }

    /// Returns the postal code.
    #[inline]
    #[must_use]
    pub fn zip(&self) -> &str {
        &self.attributes.zip
    }

    /// Returns the latitude.
    #[inline]
    #[must_use]
    pub fn lat(&self) -> &str {
        &self.attributes.lat
    }

    /// Returns the longitude.
    #[inline]
    #[must_use]
    pub fn lon(&self) -> &str {
        &self.attributes.lon
    }

    /// Returns when the market was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the market was last updated.
    #[inline]
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn attributes() -> MarketAttributes {
        MarketAttributes {
            name: "Downtown Market".to_string(),
            street: "111 E University Ave".to_string(),
            city: "Gainesville".to_string(),
            county: "Alachua".to_string(),
            state: "Florida".to_string(),
            zip: "32601".to_string(),
            lat: "29.6516".to_string(),
            lon: "-82.3248".to_string(),
        }
    }

    #[test]
    fn complete_attributes_are_valid() {
        assert!(attributes().validate().is_ok());
    }

    #[test]
    fn every_blank_field_is_reported() {
        let attrs = MarketAttributes {
            county: String::new(),
            lat: " ".to_string(),
            ..attributes()
        };

        let err = attrs.validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::validation(["County can't be blank", "Lat can't be blank"])
        );
    }

    #[test]
    fn empty_attributes_report_all_fields() {
        let err = MarketAttributes::default().validate().unwrap_err();
        match err {
            DomainError::Validation { messages } => assert_eq!(messages.len(), 8),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accessors_expose_fields() {
        let now = Utc::now();
        let market = Market::from_parts(MarketId::new(3), attributes(), now, now);
        assert_eq!(market.id(), MarketId::new(3));
        assert_eq!(market.name(), "Downtown Market");
        assert_eq!(market.city(), "Gainesville");
        assert_eq!(market.lat(), "29.6516");
        assert_eq!(market.created_at(), now);
    }
}
