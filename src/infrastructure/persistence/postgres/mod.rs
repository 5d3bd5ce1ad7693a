//! # PostgreSQL Repositories
//!
//! PostgreSQL implementations of the repository traits using sqlx.
//!
//! The expected schema lives in `migrations/0001_create_markets_and_vendors.sql`.

pub mod market_repository;
pub mod market_vendor_repository;
pub mod vendor_repository;

pub use market_repository::PostgresMarketRepository;
pub use market_vendor_repository::PostgresMarketVendorRepository;
pub use vendor_repository::PostgresVendorRepository;

use crate::infrastructure::persistence::traits::RepositoryError;

/// Maps a sqlx error to a repository error.
///
/// Pool and I/O failures are connection errors; everything else is a query error.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::connection(err.to_string())
        }
        other => RepositoryError::query(other.to_string()),
    }
}

/// Returns true if the error is a unique constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Converts a count column to `u64`, treating negatives as zero.
pub(crate) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
