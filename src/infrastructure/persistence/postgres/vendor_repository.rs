//! # PostgreSQL Vendor Repository
//!
//! PostgreSQL implementation of [`VendorRepository`] using sqlx.

use super::{map_sqlx_error, to_count};
use crate::domain::entities::{Vendor, VendorAttributes};
use crate::domain::value_objects::VendorId;
use crate::infrastructure::persistence::traits::{
    RepositoryError, RepositoryResult, VendorRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// PostgreSQL implementation of [`VendorRepository`].
#[derive(Debug, Clone)]
pub struct PostgresVendorRepository {
    pool: PgPool,
}

impl PostgresVendorRepository {
    /// Creates a new PostgreSQL vendor repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VendorRepository for PostgresVendorRepository {
    async fn insert(&self, attributes: &VendorAttributes) -> RepositoryResult<Vendor> {
        let row: VendorRow = sqlx::query_as(
            r#"
            INSERT INTO vendors (name, description, contact_name, contact_phone, credit_accepted)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, contact_name, contact_phone, credit_accepted,
                      created_at, updated_at
            "#,
        )
        .bind(&attributes.name)
        .bind(&attributes.description)
        .bind(&attributes.contact_name)
        .bind(&attributes.contact_phone)
        .bind(attributes.credit_accepted)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get(&self, id: VendorId) -> RepositoryResult<Option<Vendor>> {
        let row: Option<VendorRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, contact_name, contact_phone, credit_accepted,
                   created_at, updated_at
            FROM vendors
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Vendor::from))
    }

    async fn get_many(&self, ids: &[VendorId]) -> RepositoryResult<Vec<Vendor>> {
        let raw_ids: Vec<i64> = ids.iter().map(VendorId::get).collect();

        let rows: Vec<VendorRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, contact_name, contact_phone, credit_accepted,
                   created_at, updated_at
            FROM vendors
            WHERE id = ANY($1)
            ORDER BY id ASC
            "#,
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Vendor::from).collect())
    }

    async fn update(
        &self,
        id: VendorId,
        attributes: &VendorAttributes,
    ) -> RepositoryResult<Vendor> {
        let row: Option<VendorRow> = sqlx::query_as(
            r#"
            UPDATE vendors
            SET name = $2, description = $3, contact_name = $4, contact_phone = $5,
                credit_accepted = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, contact_name, contact_phone, credit_accepted,
                      created_at, updated_at
            "#,
        )
        .bind(id.get())
        .bind(&attributes.name)
        .bind(&attributes.description)
        .bind(&attributes.contact_name)
        .bind(&attributes.contact_phone)
        .bind(attributes.credit_accepted)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Vendor::from)
            .ok_or_else(|| RepositoryError::not_found("Vendor", id.to_string()))
    }

    async fn delete(&self, id: VendorId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(to_count(count))
    }
}

/// Row type for vendor queries.
#[derive(Debug, sqlx::FromRow)]
struct VendorRow {
    id: i64,
    name: String,
    description: String,
    contact_name: String,
    contact_phone: String,
    credit_accepted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        Vendor::from_parts(
            VendorId::new(row.id),
            VendorAttributes {
                name: row.name,
                description: row.description,
                contact_name: row.contact_name,
                contact_phone: row.contact_phone,
                credit_accepted: row.credit_accepted,
            },
            row.created_at,
            row.updated_at,
        )
    }
}
