//! # REST Handlers
//!
//! Request handlers, shared state and the JSON:API-style documents returned
//! by the market and vendor endpoints.
//!
//! Successful responses wrap their payload in `{"data": ...}`. Each resource
//! carries a string `id`, a `type` and an `attributes` object.

use crate::api::rest::error::ApiError;
use crate::application::error::ApplicationError;
use crate::application::services::{
    AssociationManager, MarketService, MarketSummary, VendorService,
};
use crate::domain::DomainError;
use crate::domain::entities::{MarketVendor, Vendor, VendorPatch};
use crate::domain::value_objects::{MarketId, VendorId};
use crate::infrastructure::persistence::in_memory::{
    InMemoryMarketRepository, InMemoryMarketVendorRepository, InMemoryVendorRepository,
};
use crate::infrastructure::persistence::postgres::{
    PostgresMarketRepository, PostgresMarketVendorRepository, PostgresVendorRepository,
};
use crate::infrastructure::persistence::{
    MarketRepository, MarketVendorRepository, VendorRepository,
};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// Application State
// ============================================================================

/// Shared state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Market reads and search.
    pub markets: MarketService,
    /// Vendor CRUD.
    pub vendors: VendorService,
    /// Market-vendor links.
    pub associations: AssociationManager,
}

impl AppState {
    /// Wires the services over the given repositories.
    #[must_use]
    pub fn new(
        markets: Arc<dyn MarketRepository>,
        vendors: Arc<dyn VendorRepository>,
        links: Arc<dyn MarketVendorRepository>,
    ) -> Self {
        let associations = AssociationManager::new(
            Arc::clone(&markets),
            Arc::clone(&vendors),
            Arc::clone(&links),
        );
        Self {
            markets: MarketService::new(markets, associations.clone()),
            vendors: VendorService::new(vendors, links),
            associations,
        }
    }

    /// State backed by empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryMarketRepository::new()),
            Arc::new(InMemoryVendorRepository::new()),
            Arc::new(InMemoryMarketVendorRepository::new()),
        )
    }

    /// State backed by PostgreSQL.
    #[must_use]
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PostgresMarketRepository::new(pool.clone())),
            Arc::new(PostgresVendorRepository::new(pool.clone())),
            Arc::new(PostgresMarketVendorRepository::new(pool)),
        )
    }
}

// ============================================================================
// Documents
// ============================================================================

/// Top-level success document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document<T> {
    /// Primary data.
    pub data: T,
}

impl<T> Document<T> {
    /// Wraps `data`.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A typed resource object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource<A> {
    /// Identifier, rendered as a string.
    pub id: String,
    /// Resource type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource attributes.
    pub attributes: A,
}

impl<A> Resource<A> {
    fn new(id: impl ToString, kind: &str, attributes: A) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            attributes,
        }
    }
}

/// Market attributes as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketResponse {
    /// Market name.
    pub name: String,
    /// Street address.
    pub street: String,
    /// City.
    pub city: String,
    /// County.
    pub county: String,
    /// State.
    pub state: String,
    /// Postal code.
    pub zip: String,
    /// Latitude.
    pub lat: String,
    /// Longitude.
    pub lon: String,
    /// Number of linked vendors.
    pub vendor_count: u64,
}

impl From<MarketSummary> for Resource<MarketResponse> {
    fn from(summary: MarketSummary) -> Self {
        let MarketSummary {
            market,
            vendor_count,
        } = summary;
        let attributes = market.attributes().clone();
        Resource::new(
            market.id(),
            "market",
            MarketResponse {
                name: attributes.name,
                street: attributes.street,
                city: attributes.city,
                county: attributes.county,
                state: attributes.state,
                zip: attributes.zip,
                lat: attributes.lat,
                lon: attributes.lon,
                vendor_count,
            },
        )
    }
}

/// Vendor attributes as rendered to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorResponse {
    /// Vendor name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Contact person.
    pub contact_name: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Whether credit is accepted.
    pub credit_accepted: bool,
}

impl From<Vendor> for Resource<VendorResponse> {
    fn from(vendor: Vendor) -> Self {
        let attributes = vendor.attributes().clone();
        Resource::new(
            vendor.id(),
            "vendor",
            VendorResponse {
                name: attributes.name,
                description: attributes.description,
                contact_name: attributes.contact_name,
                contact_phone: attributes.contact_phone,
                credit_accepted: attributes.credit_accepted,
            },
        )
    }
}

/// Link attributes as rendered to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketVendorResponse {
    /// Linked market.
    pub market_id: MarketId,
    /// Linked vendor.
    pub vendor_id: VendorId,
}

impl From<MarketVendor> for Resource<MarketVendorResponse> {
    fn from(link: MarketVendor) -> Self {
        Resource::new(
            link.id(),
            "market_vendor",
            MarketVendorResponse {
                market_id: link.market_id(),
                vendor_id: link.vendor_id(),
            },
        )
    }
}

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

// ============================================================================
// Request Bodies
// ============================================================================

/// Vendor fields accepted on create and update.
///
/// `credit_accepted` is kept as raw JSON so a non-boolean can be reported as a
/// validation failure instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VendorParams {
    /// Vendor name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Contact person.
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Whether credit is accepted.
    #[serde(default)]
    pub credit_accepted: Option<serde_json::Value>,
}

impl TryFrom<VendorParams> for VendorPatch {
    type Error = DomainError;

    fn try_from(params: VendorParams) -> Result<Self, Self::Error> {
        let credit_accepted = match params.credit_accepted {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Bool(accepted)) => Some(accepted),
            Some(_) => {
                return Err(DomainError::validation([
                    "Credit accepted must be true or false",
                ]));
            }
        };
        Ok(Self {
            name: params.name,
            description: params.description,
            contact_name: params.contact_name,
            contact_phone: params.contact_phone,
            credit_accepted,
        })
    }
}

/// Vendor request body, either `{"vendor": {...}}` or the bare fields.
///
/// The shape is chosen by the presence of the `vendor` key, so a mistyped
/// field inside `vendor` is a parse error rather than an empty patch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct VendorBody(VendorParams);

impl TryFrom<serde_json::Value> for VendorBody {
    type Error = serde_json::Error;

    fn try_from(mut value: serde_json::Value) -> Result<Self, Self::Error> {
        let params = match value.as_object_mut().and_then(|body| body.remove("vendor")) {
            Some(vendor) => serde_json::from_value(vendor)?,
            None => serde_json::from_value(value)?,
        };
        Ok(Self(params))
    }
}

impl VendorBody {
    fn into_patch(self) -> Result<VendorPatch, ApiError> {
        VendorPatch::try_from(self.0).map_err(|e| ApiError::from(ApplicationError::from(e)))
    }
}

/// Accepts an id as a JSON integer or a numeric string.
fn lenient_id<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<i64>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(T::from(id))),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse::<i64>()
            .map(|id| Some(T::from(id)))
            .map_err(|_| {
                D::Error::custom(format!("invalid id `{text}`, expected an integer"))
            }),
    }
}

/// Link identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MarketVendorParams {
    /// Market to link.
    #[serde(default, deserialize_with = "lenient_id")]
    pub market_id: Option<MarketId>,
    /// Vendor to link.
    #[serde(default, deserialize_with = "lenient_id")]
    pub vendor_id: Option<VendorId>,
}

impl MarketVendorParams {
    /// Ids for a new link. A missing id is reported as a missing record.
    fn for_create(self) -> Result<(MarketId, VendorId), ApiError> {
        let market_id = self
            .market_id
            .ok_or_else(|| ApiError::not_found("Validation failed: Market must exist"))?;
        let vendor_id = self
            .vendor_id
            .ok_or_else(|| ApiError::not_found("Validation failed: Vendor must exist"))?;
        Ok((market_id, vendor_id))
    }

    /// Ids of an existing link. A missing id means no link can match.
    fn for_delete(self) -> Result<(MarketId, VendorId), ApiError> {
        match (self.market_id, self.vendor_id) {
            (Some(market_id), Some(vendor_id)) => Ok((market_id, vendor_id)),
            (market_id, vendor_id) => Err(ApiError::not_found(format!(
                "Couldn't find MarketVendor with market_id={} and vendor_id={}",
                market_id.map(|id| id.to_string()).unwrap_or_default(),
                vendor_id.map(|id| id.to_string()).unwrap_or_default(),
            ))),
        }
    }
}

/// Link request body: `{"market_vendor": {"market_id": 1, "vendor_id": 2}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MarketVendorBody {
    /// The link identifiers.
    #[serde(default)]
    pub market_vendor: Option<MarketVendorParams>,
}

impl MarketVendorBody {
    fn into_params(self) -> Result<MarketVendorParams, ApiError> {
        self.market_vendor
            .filter(|p| p.market_id.is_some() || p.vendor_id.is_some())
            .ok_or_else(|| ApiError::missing_param("market_vendor"))
    }
}

/// Reads a link body.
///
/// Ids of the wrong type are reported as such; any other unreadable body is
/// the missing `market_vendor` param.
fn link_body(
    body: Result<Json<MarketVendorBody>, JsonRejection>,
) -> Result<MarketVendorParams, ApiError> {
    match body {
        Ok(Json(body)) => body.into_params(),
        Err(rejection @ JsonRejection::JsonDataError(_)) => Err(rejection.into()),
        Err(_) => Err(ApiError::missing_param("market_vendor")),
    }
}

/// Parses a path identifier, treating a malformed one as an unknown record.
fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApplicationError::not_found(resource, raw).into())
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/v0/health`
#[allow(clippy::unused_async)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/v0/markets`
pub async fn list_markets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Document<Vec<Resource<MarketResponse>>>>, ApiError> {
    let markets = state.markets.list().await?;
    Ok(Json(Document::new(
        markets.into_iter().map(Resource::from).collect(),
    )))
}

/// `GET /api/v0/markets/{id}`
pub async fn get_market(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Document<Resource<MarketResponse>>>, ApiError> {
    let id: MarketId = parse_id(&id, "Market")?;
    let market = state.markets.get(id).await?;
    Ok(Json(Document::new(market.into())))
}

/// `GET /api/v0/markets/search?name=&city=&state=`
pub async fn search_markets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Document<Vec<Resource<MarketResponse>>>>, ApiError> {
    debug!(params = params.len(), "market search requested");
    let markets = state.markets.search(params).await?;
    Ok(Json(Document::new(
        markets.into_iter().map(Resource::from).collect(),
    )))
}

/// `GET /api/v0/markets/{id}/vendors`
pub async fn list_market_vendors(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Document<Vec<Resource<VendorResponse>>>>, ApiError> {
    let id: MarketId = parse_id(&id, "Market")?;
    let vendors = state.associations.vendors_for_market(id).await?;
    Ok(Json(Document::new(
        vendors.into_iter().map(Resource::from).collect(),
    )))
}

/// `GET /api/v0/vendors/{id}`
pub async fn get_vendor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Document<Resource<VendorResponse>>>, ApiError> {
    let id: VendorId = parse_id(&id, "Vendor")?;
    let vendor = state.vendors.get(id).await?;
    Ok(Json(Document::new(vendor.into())))
}

/// `POST /api/v0/vendors`
pub async fn create_vendor(
    State(state): State<Arc<AppState>>,
    body: Result<Json<VendorBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Document<Resource<VendorResponse>>>), ApiError> {
    let Json(body) = body?;
    let vendor = state.vendors.create(body.into_patch()?).await?;
    Ok((StatusCode::CREATED, Json(Document::new(vendor.into()))))
}

/// `PATCH /api/v0/vendors/{id}`
pub async fn update_vendor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<VendorBody>, JsonRejection>,
) -> Result<Json<Document<Resource<VendorResponse>>>, ApiError> {
    let id: VendorId = parse_id(&id, "Vendor")?;
    let Json(body) = body?;
    let vendor = state.vendors.update(id, body.into_patch()?).await?;
    Ok(Json(Document::new(vendor.into())))
}

/// `DELETE /api/v0/vendors/{id}`
pub async fn delete_vendor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: VendorId = parse_id(&id, "Vendor")?;
    state.vendors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/v0/market_vendors`
pub async fn create_market_vendor(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MarketVendorBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Document<Resource<MarketVendorResponse>>>), ApiError> {
    let (market_id, vendor_id) = link_body(body)?.for_create()?;
    let link = state.associations.create_link(market_id, vendor_id).await?;
    Ok((StatusCode::CREATED, Json(Document::new(link.into()))))
}

/// `DELETE /api/v0/market_vendors`
pub async fn delete_market_vendor(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MarketVendorBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let (market_id, vendor_id) = link_body(body)?.for_delete()?;
    state.associations.delete_link(market_id, vendor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown routes.
#[allow(clippy::unused_async)]
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vendor_body_accepts_wrapped_and_bare() {
        let wrapped: VendorBody =
            serde_json::from_value(json!({"vendor": {"name": "Buzzy Bees"}})).unwrap();
        let bare: VendorBody = serde_json::from_value(json!({"name": "Buzzy Bees"})).unwrap();

        let wrapped = wrapped.into_patch().unwrap();
        let bare = bare.into_patch().unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.name.as_deref(), Some("Buzzy Bees"));
    }

    #[test]
    fn credit_accepted_must_be_boolean() {
        let body: VendorBody =
            serde_json::from_value(json!({"vendor": {"credit_accepted": "yes"}})).unwrap();
        let err = body.into_patch().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.details(),
            "Validation failed: Credit accepted must be true or false"
        );
    }

    #[test]
    fn null_credit_accepted_is_absent() {
        let body: VendorBody =
            serde_json::from_value(json!({"credit_accepted": null})).unwrap();
        assert_eq!(body.into_patch().unwrap().credit_accepted, None);
    }

    #[test]
    fn missing_link_params_are_rejected() {
        let body: MarketVendorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            body.into_params().unwrap_err().details(),
            "param is missing or the value is empty: market_vendor"
        );

        let body: MarketVendorBody =
            serde_json::from_value(json!({"market_vendor": {}})).unwrap();
        assert_eq!(
            body.into_params().unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn link_without_market_id_reports_missing_market() {
        let body: MarketVendorBody =
            serde_json::from_value(json!({"market_vendor": {"vendor_id": 3}})).unwrap();
        let err = body.into_params().unwrap().for_create().unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details(), "Validation failed: Market must exist");
    }

    #[test]
    fn unlink_without_vendor_id_reports_missing_link() {
        let body: MarketVendorBody =
            serde_json::from_value(json!({"market_vendor": {"market_id": 3}})).unwrap();
        let err = body.into_params().unwrap().for_delete().unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.details(),
            "Couldn't find MarketVendor with market_id=3 and vendor_id="
        );
    }

    #[test]
    fn link_ids_accept_numeric_strings() {
        let body: MarketVendorBody = serde_json::from_value(
            json!({"market_vendor": {"market_id": "12", "vendor_id": 7}}),
        )
        .unwrap();
        let pair = body.into_params().unwrap().for_create().unwrap();
        assert_eq!(pair, (MarketId::new(12), VendorId::new(7)));
    }

    #[test]
    fn non_numeric_link_id_is_a_parse_error() {
        let result = serde_json::from_value::<MarketVendorBody>(
            json!({"market_vendor": {"market_id": "twelve", "vendor_id": 7}}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn mistyped_field_inside_vendor_is_a_parse_error() {
        let result = serde_json::from_value::<VendorBody>(
            json!({"vendor": {"name": "Renamed", "contact_phone": 5551234}}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn malformed_path_id_is_not_found() {
        let err = parse_id::<MarketId>("abc", "Market").unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details(), "Couldn't find Market with 'id'=abc");
    }

    #[test]
    fn market_vendor_resource_shape() {
        let link = MarketVendor::from_parts(
            crate::domain::value_objects::MarketVendorId::new(7),
            MarketId::new(1),
            VendorId::new(2),
            chrono::Utc::now(),
        );
        let json = serde_json::to_value(Resource::from(link)).unwrap();
        assert_eq!(
            json,
            json!({"id": "7", "type": "market_vendor", "attributes": {"market_id": 1, "vendor_id": 2}})
        );
    }
}
