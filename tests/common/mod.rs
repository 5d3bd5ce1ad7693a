//! Shared helpers for the HTTP integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use market_api::api::rest::{AppState, create_router};
use market_api::domain::entities::{Market, MarketAttributes, Vendor, VendorPatch};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A router over in-memory storage plus direct access to its services.
pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let state = Arc::new(AppState::in_memory());
        let router = create_router(Arc::clone(&state));
        Self { state, router }
    }

    pub async fn market(&self, name: &str, city: &str, state: &str) -> Market {
        self.state
            .markets
            .create(MarketAttributes {
                name: name.to_string(),
                street: "123 Main St".to_string(),
                city: city.to_string(),
                county: "Alachua".to_string(),
                state: state.to_string(),
                zip: "32601".to_string(),
                lat: "29.6516".to_string(),
                lon: "-82.3248".to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn vendor(&self, name: &str) -> Vendor {
        self.state
            .vendors
            .create(VendorPatch {
                name: Some(name.to_string()),
                description: Some("Local honey".to_string()),
                contact_name: Some("Berry Ann".to_string()),
                contact_phone: Some("(555) 555-5555".to_string()),
                credit_accepted: Some(true),
            })
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, body: Option<Value>) -> TestResponse {
        self.send(Method::DELETE, uri, body).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            body: bytes.to_vec(),
        }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    /// The single error detail of an error response.
    pub fn error_detail(&self) -> String {
        self.json()["errors"][0]["details"]
            .as_str()
            .unwrap()
            .to_string()
    }
}
