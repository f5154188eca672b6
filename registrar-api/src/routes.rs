//! API route configuration.

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Name lookups and registration
        .route(
            "/name/:name",
            get(handlers::lookup_name).post(handlers::register_name),
        )
        .route("/name/:name/publickey", get(handlers::lookup_public_key))
        .route("/name/:name/signature", get(handlers::lookup_signature))
        .route("/name/:name/owner", get(handlers::lookup_owner))
        // Reverse lookup
        .route("/addr/:addr", get(handlers::lookup_address))
        .with_state(state)
}
