//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /name/:name
pub async fn lookup_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<NameResponse>> {
    let record = state.query.lookup_name(&name).await?;
    Ok(Json(NameResponse::from(record)))
}

/// GET /name/:name/publickey
pub async fn lookup_public_key(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<PublicKeyResponse>> {
    let (name, publickey) = state.query.lookup_public_key(&name).await?;
    Ok(Json(PublicKeyResponse {
        name: name.as_str().to_string(),
        publickey: BASE64.encode(publickey),
    }))
}

/// GET /name/:name/signature
pub async fn lookup_signature(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<SignatureResponse>> {
    let (name, signature) = state.query.lookup_signature(&name).await?;
    Ok(Json(SignatureResponse {
        name: name.as_str().to_string(),
        signature: BASE64.encode(signature),
    }))
}

/// GET /name/:name/owner
pub async fn lookup_owner(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<OwnerResponse>> {
    let (name, owner) = state.query.lookup_owner(&name).await?;
    Ok(Json(OwnerResponse {
        name: name.as_str().to_string(),
        owner: owner.to_hex_string(),
    }))
}

/// GET /addr/:addr
pub async fn lookup_address(
    State(state): State<Arc<AppState>>,
    Path(addr): Path<String>,
) -> Result<Json<AddressResponse>> {
    let name = state.query.lookup_address(&addr).await?;
    Ok(Json(AddressResponse {
        name: name.as_str().to_string(),
    }))
}

/// POST /name/:name
pub async fn register_name(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<RegisterResponse>> {
    state.coordinator.register(&name, body.into()).await?;
    Ok(Json(RegisterResponse { success: true }))
}
