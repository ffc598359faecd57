//! HTTP front door: a health probe and a JSON validation endpoint.
//!
//! | Route | Method | Body |
//! |-------|--------|------|
//! | `/health` | any | plain-text banner |
//! | `/vatid/validate` | `POST` | `{"vat_number": "DE302210417"}` → `{"valid": true}` |

mod config;
mod error;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{any, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::validator::{STATUS_VALID, VatIdChecker};

pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::ApiError;

/// Banner returned by the health probe.
pub const HEALTH_BANNER: &str = "German VATID Validator Microservice\n";

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<dyn VatIdChecker>,
}

impl AppState {
    pub fn new(checker: Arc<dyn VatIdChecker>) -> Self {
        Self { checker }
    }
}

/// Request body of `/vatid/validate`.
#[derive(Debug, Deserialize)]
pub struct VatPost {
    pub vat_number: String,
}

/// Response body of `/vatid/validate`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VatPostResponse {
    pub valid: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", any(health))
        .route(
            "/vatid/validate",
            post(validate_vat_id).fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    HEALTH_BANNER
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn validate_vat_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<VatPostResponse>, ApiError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "application/json");
    if !is_json {
        return Err(ApiError::UnsupportedContentType);
    }

    let post: VatPost =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    if post.vat_number.replace(' ', "").is_empty() {
        return Err(ApiError::MissingVatNumber);
    }

    // Fires if the client goes away and this future is dropped.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let status = state.checker.validate_vat_id(&cancel, &post.vat_number).await?;

    Ok(Json(VatPostResponse {
        valid: status == STATUS_VALID,
    }))
}
