//! # Infrastructure Layer
//!
//! Adapters for external systems. Currently only persistence.

pub mod persistence;
