use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::vies::RegistryError;

/// Errors returned by the HTTP front door, rendered as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP method not supported")]
    MethodNotAllowed,

    #[error("content-type: only json is supported")]
    UnsupportedContentType,

    #[error("vat_number not provided")]
    MissingVatNumber,

    #[error("{0}")]
    InvalidBody(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedContentType | Self::MissingVatNumber => StatusCode::BAD_REQUEST,
            Self::InvalidBody(_) | Self::Registry(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Registry(e) = &self {
            error!(error = %e, "VAT ID validation failed");
        }
        (self.status(), format!("{self}\n")).into_response()
    }
}
