//! # Domain Entities
//!
//! ## Entities
//!
//! - [`Market`]: A farmers market with address and coordinates
//! - [`Vendor`]: A vendor selling at markets
//! - [`MarketVendor`]: Join record linking one market to one vendor

pub mod market;
pub mod market_vendor;
pub mod vendor;

pub use market::{Market, MarketAttributes};
pub use market_vendor::MarketVendor;
pub use vendor::{Vendor, VendorAttributes, VendorPatch};
