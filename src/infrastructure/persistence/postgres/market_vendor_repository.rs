//! # PostgreSQL Market Vendor Repository
//!
//! PostgreSQL implementation of [`MarketVendorRepository`] using sqlx.
//!
//! Pair uniqueness is enforced by the `market_vendors_pair_key` constraint.
//! Inserts use `ON CONFLICT DO NOTHING`, so the duplicate check and the
//! insert are a single statement.

use super::{is_unique_violation, map_sqlx_error, to_count};
use crate::domain::entities::MarketVendor;
use crate::domain::value_objects::{MarketId, MarketVendorId, VendorId};
use crate::infrastructure::persistence::traits::{
    MarketVendorRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of [`MarketVendorRepository`].
#[derive(Debug, Clone)]
pub struct PostgresMarketVendorRepository {
    pool: PgPool,
}

impl PostgresMarketVendorRepository {
    /// Creates a new PostgreSQL link repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn duplicate(market_id: MarketId, vendor_id: VendorId) -> RepositoryError {
    RepositoryError::duplicate(
        "MarketVendor",
        format!("market_id={market_id}, vendor_id={vendor_id}"),
    )
}

#[async_trait]
impl MarketVendorRepository for PostgresMarketVendorRepository {
    async fn insert(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<MarketVendor> {
        let row: Option<MarketVendorRow> = sqlx::query_as(
            r#"
            INSERT INTO market_vendors (market_id, vendor_id)
            VALUES ($1, $2)
            ON CONFLICT (market_id, vendor_id) DO NOTHING
            RETURNING id, market_id, vendor_id, created_at
            "#,
        )
        .bind(market_id.get())
        .bind(vendor_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate(market_id, vendor_id)
            } else {
                map_sqlx_error(e)
            }
        })?;

        row.map(MarketVendor::from)
            .ok_or_else(|| duplicate(market_id, vendor_id))
    }

    async fn find_by_pair(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<Option<MarketVendor>> {
        let row: Option<MarketVendorRow> = sqlx::query_as(
            r#"
            SELECT id, market_id, vendor_id, created_at
            FROM market_vendors
            WHERE market_id = $1 AND vendor_id = $2
            "#,
        )
        .bind(market_id.get())
        .bind(vendor_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(MarketVendor::from))
    }

    async fn delete_by_pair(
        &self,
        market_id: MarketId,
        vendor_id: VendorId,
    ) -> RepositoryResult<bool> {
        let result =
            sqlx::query("DELETE FROM market_vendors WHERE market_id = $1 AND vendor_id = $2")
                .bind(market_id.get())
                .bind(vendor_id.get())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_vendor(&self, vendor_id: VendorId) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM market_vendors WHERE vendor_id = $1")
            .bind(vendor_id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn vendor_ids_for_market(&self, market_id: MarketId) -> RepositoryResult<Vec<VendorId>> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT vendor_id FROM market_vendors WHERE market_id = $1 ORDER BY vendor_id ASC",
        )
        .bind(market_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|(id,)| VendorId::new(id)).collect())
    }

    async fn count_for_market(&self, market_id: MarketId) -> RepositoryResult<u64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM market_vendors WHERE market_id = $1")
                .bind(market_id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(to_count(count))
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM market_vendors")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(to_count(count))
    }
}

/// Row type for link queries.
#[derive(Debug, sqlx::FromRow)]
struct MarketVendorRow {
    id: i64,
    market_id: i64,
    vendor_id: i64,
    created_at: DateTime<Utc>,
}

impl From<MarketVendorRow> for MarketVendor {
    fn from(row: MarketVendorRow) -> Self {
        MarketVendor::from_parts(
            MarketVendorId::new(row.id),
            MarketId::new(row.market_id),
            VendorId::new(row.vendor_id),
            row.created_at,
        )
    }
}
