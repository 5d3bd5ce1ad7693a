//! # Identifiers
//!
//! Integer-backed identifiers for markets, vendors and their links.
//!
//! Identifiers are assigned by storage. They serialize as plain integers and
//! display as decimal strings, which is what the JSON:API `id` field carries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier from its raw value.
            #[inline]
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[inline]
            #[must_use]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

integer_id!(
    /// Identifier of a [`Market`](crate::domain::entities::Market).
    MarketId
);

integer_id!(
    /// Identifier of a [`Vendor`](crate::domain::entities::Vendor).
    VendorId
);

integer_id!(
    /// Identifier of a [`MarketVendor`](crate::domain::entities::MarketVendor) link.
    MarketVendorId
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_decimal() {
        assert_eq!(MarketId::new(42).to_string(), "42");
    }

    #[test]
    fn parses_from_path_segment() {
        let id: VendorId = "123123123123".parse().unwrap();
        assert_eq!(id.get(), 123_123_123_123);
        assert!("abc".parse::<VendorId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&MarketVendorId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
