//! # Domain Layer
//!
//! Entities, value objects and domain rules with no infrastructure
//! dependencies.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
