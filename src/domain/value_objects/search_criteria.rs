//! # Search Criteria
//!
//! Validated market search parameters.
//!
//! Raw query parameters are turned into an explicit list of
//! [`FieldFilter`]s, one per searchable field that carries a non-blank value.
//! A market matches when every filter matches (logical AND). Each filter is a
//! case-insensitive, unanchored substring test.
//!
//! # Examples
//!
//! ```
//! use market_api::domain::value_objects::{SearchCriteria, SearchField};
//!
//! let criteria = SearchCriteria::from_params([("state", "Florida"), ("city", "")]).unwrap();
//! assert_eq!(criteria.filters().len(), 1);
//! assert_eq!(criteria.filters()[0].field(), SearchField::State);
//!
//! assert!(SearchCriteria::from_params([("zip", "32609")]).is_err());
//! ```

use crate::domain::entities::Market;
use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// A market field that search can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    /// Market name.
    Name,
    /// Market city.
    City,
    /// Market state.
    State,
}

impl SearchField {
    /// Searchable fields in the order filters are built.
    pub const ALL: [SearchField; 3] = [Self::Name, Self::City, Self::State];

    /// Returns the query key for this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::City => "city",
            Self::State => "state",
        }
    }

    /// Looks up a field by its exact, case-sensitive query key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    /// Returns the value of this field on `market`.
    #[must_use]
    pub fn value_of<'a>(&self, market: &'a Market) -> &'a str {
        match self {
            Self::Name => market.name(),
            Self::City => market.city(),
            Self::State => market.state(),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A case-insensitive substring predicate on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    field: SearchField,
    value: String,
    folded: String,
}

impl FieldFilter {
    /// Creates a filter for `field` containing `value`.
    #[must_use]
    pub fn new(field: SearchField, value: impl Into<String>) -> Self {
        let value = value.into();
        let folded = value.to_lowercase();
        Self {
            field,
            value,
            folded,
        }
    }

    /// Returns the filtered field.
    #[inline]
    #[must_use]
    pub fn field(&self) -> SearchField {
        self.field
    }

    /// Returns the value as supplied.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the field on `market` contains the value, ignoring case.
    #[must_use]
    pub fn matches(&self, market: &Market) -> bool {
        self.field
            .value_of(market)
            .to_lowercase()
            .contains(&self.folded)
    }
}

/// Validated search criteria for markets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCriteria {
    filters: Vec<FieldFilter>,
}

impl SearchCriteria {
    /// Criteria that match every market.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds criteria from raw key/value parameters.
    ///
    /// An empty parameter set matches every market. Otherwise at least one
    /// key must be a searchable field; unrecognized keys next to a
    /// recognized one are ignored. Blank values add no filter. When a key
    /// repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCriteria`] if parameters are present but
    /// none of their keys is a searchable field.
    pub fn from_params<I, K, V>(params: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let params: Vec<(K, V)> = params.into_iter().collect();
        if params.is_empty() {
            return Ok(Self::all());
        }

        let recognized = params
            .iter()
            .any(|(key, _)| SearchField::from_key(key.as_ref()).is_some());
        if !recognized {
            return Err(DomainError::InvalidCriteria);
        }

        let filters = SearchField::ALL
            .into_iter()
            .filter_map(|field| {
                params
                    .iter()
                    .rev()
                    .find(|(key, _)| key.as_ref() == field.as_str())
                    .map(|(_, value)| value.as_ref())
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| FieldFilter::new(field, value))
            })
            .collect();

        Ok(Self { filters })
    }

    /// Returns the filters, in name/city/state order.
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// Returns true if no filter narrows the result.
    #[inline]
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns true if `market` satisfies every filter.
    #[must_use]
    pub fn matches(&self, market: &Market) -> bool {
        self.filters.iter().all(|filter| filter.matches(market))
    }
}
