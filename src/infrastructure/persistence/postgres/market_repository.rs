//! # PostgreSQL Market Repository
//!
//! PostgreSQL implementation of [`MarketRepository`] using sqlx.
//!
//! Search filters become `ILIKE` predicates joined with `AND`. Wildcard
//! characters in the search value are escaped so the value is matched
//! literally.

use super::{map_sqlx_error, to_count};
use crate::domain::entities::{Market, MarketAttributes};
use crate::domain::value_objects::{MarketId, SearchCriteria, SearchField};
use crate::infrastructure::persistence::traits::{MarketRepository, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

const SELECT_MARKETS: &str = "SELECT id, name, street, city, county, state, zip, lat, lon, \
                              created_at, updated_at FROM markets";

/// PostgreSQL implementation of [`MarketRepository`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use market_api::infrastructure::persistence::postgres::PostgresMarketRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresMarketRepository::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMarketRepository {
    pool: PgPool,
}

impl PostgresMarketRepository {
    /// Creates a new PostgreSQL market repository.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Returns the column backing a search field.
fn column(field: SearchField) -> &'static str {
    match field {
        SearchField::Name => "name",
        SearchField::City => "city",
        SearchField::State => "state",
    }
}

/// Builds an `ILIKE` pattern matching `value` anywhere in the column.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl MarketRepository for PostgresMarketRepository {
    async fn insert(&self, attributes: &MarketAttributes) -> RepositoryResult<Market> {
        let row: MarketRow = sqlx::query_as(
            r#"
            INSERT INTO markets (name, street, city, county, state, zip, lat, lon)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, street, city, county, state, zip, lat, lon,
                      created_at, updated_at
            "#,
        )
        .bind(&attributes.name)
        .bind(&attributes.street)
        .bind(&attributes.city)
        .bind(&attributes.county)
        .bind(&attributes.state)
        .bind(&attributes.zip)
        .bind(&attributes.lat)
        .bind(&attributes.lon)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get(&self, id: MarketId) -> RepositoryResult<Option<Market>> {
        let row: Option<MarketRow> = sqlx::query_as(&format!("{SELECT_MARKETS} WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Market::from))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Market>> {
        let rows: Vec<MarketRow> = sqlx::query_as(&format!("{SELECT_MARKETS} ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Market::from).collect())
    }

    async fn find_matching(&self, criteria: &SearchCriteria) -> RepositoryResult<Vec<Market>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_MARKETS);
        let mut separator = " WHERE ";
        for filter in criteria.filters() {
            builder
                .push(separator)
                .push(column(filter.field()))
                .push(" ILIKE ")
                .push_bind(contains_pattern(filter.value()));
            separator = " AND ";
        }
        builder.push(" ORDER BY id ASC");

        let rows: Vec<MarketRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Market::from).collect())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM markets")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(to_count(count))
    }
}

/// Row type for market queries.
#[derive(Debug, sqlx::FromRow)]
struct MarketRow {
    id: i64,
    name: String,
    street: String,
    city: String,
    county: String,
    state: String,
    zip: String,
    lat: String,
    lon: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MarketRow> for Market {
    fn from(row: MarketRow) -> Self {
        Market::from_parts(
            MarketId::new(row.id),
            MarketAttributes {
                name: row.name,
                street: row.street,
                city: row.city,
                county: row.county,
                state: row.state,
                zip: row.zip,
                lat: row.lat,
                lon: row.lon,
            },
            row.created_at,
            row.updated_at,
        )
    }
}
