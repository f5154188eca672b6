//! API error handling.
//!
//! Maps the service error taxonomy onto HTTP statuses and the exact JSON
//! envelopes clients rely on. Conflict payloads carry the contested
//! name/address/owner; everything internal collapses to a plain server
//! error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use registrar_core::error::RegistrarError;

/// API error: a status code plus the exact response body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiError {
    /// Creates an error with an explicit body.
    pub fn new(status: StatusCode, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<RegistrarError> for ApiError {
    fn from(err: RegistrarError) -> Self {
        match &err {
            RegistrarError::InvalidName(_) => Self::new(
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": "invalid name" }),
            ),
            RegistrarError::InvalidAddress(_) => {
                Self::new(StatusCode::BAD_REQUEST, json!({ "success": false }))
            }
            RegistrarError::IncompleteCredentials(_) | RegistrarError::NameTaken(_) => Self::new(
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": err.to_string() }),
            ),
            RegistrarError::SignatureRejected => Self::new(
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": err.to_string() }),
            ),
            RegistrarError::AddressTaken { name, addr } => Self::new(
                StatusCode::FORBIDDEN,
                json!({
                    "success": false,
                    "name": name.as_str(),
                    "addr": addr.to_hex_string(),
                }),
            ),
            RegistrarError::AddressMismatch { owner, addr } => Self::new(
                StatusCode::FORBIDDEN,
                json!({
                    "success": false,
                    "owner": owner.to_hex_string(),
                    "addr": addr.to_hex_string(),
                }),
            ),
            RegistrarError::OwnerMismatch { owner } => Self::new(
                StatusCode::FORBIDDEN,
                json!({ "success": false, "owner": owner.to_hex_string() }),
            ),
            RegistrarError::NameNotRegistered | RegistrarError::AddressNotRegistered => {
                Self::new(StatusCode::NOT_FOUND, json!({ "error": err.to_string() }))
            }
            _ => {
                tracing::error!(error = %err, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "server error" }),
                )
            }
        }
    }
}
