//! # Domain Errors
//!
//! Errors raised by domain rules: field validation on markets and vendors,
//! and search criteria that name no searchable field.

use thiserror::Error;

/// Error raised when a domain rule is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// One or more fields failed validation.
    ///
    /// Messages are human readable, e.g. `"Name can't be blank"`.
    #[error("Validation failed: {}", messages.join(", "))]
    Validation {
        /// Individual failure messages, in field order.
        messages: Vec<String>,
    },

    /// A search request named none of the searchable fields.
    #[error("Invalid set of parameters.")]
    InvalidCriteria,
}

impl DomainError {
    /// Creates a validation error from a list of messages.
    #[must_use]
    pub fn validation<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns true if this is an invalid search criteria error.
    #[must_use]
    pub fn is_invalid_criteria(&self) -> bool {
        matches!(self, Self::InvalidCriteria)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Collects blank-field messages for the given `(label, value)` pairs.
///
/// A value is blank when it is empty or whitespace only.
pub(crate) fn blank_field_messages<'a, I>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| format!("{label} can't be blank"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_joins_failures() {
        let err = DomainError::validation(["Name can't be blank", "City can't be blank"]);
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Validation failed: Name can't be blank, City can't be blank"
        );
    }

    #[test]
    fn invalid_criteria_message() {
        let err = DomainError::InvalidCriteria;
        assert!(err.is_invalid_criteria());
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Invalid set of parameters.");
    }

    #[test]
    fn blank_fields_include_whitespace_only() {
        let messages = blank_field_messages([("Name", "Haile"), ("City", "  "), ("State", "")]);
        assert_eq!(messages, vec!["City can't be blank", "State can't be blank"]);
    }
}
