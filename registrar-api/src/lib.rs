//! # Registrar API Server
//!
//! The HTTP boundary of the name registry service.
//!
//! ## Endpoints
//!
//! - `GET /name/:name` - Resolve a name to its record
//! - `GET /name/:name/publickey` - Fetch the registered public key
//! - `GET /name/:name/signature` - Fetch the registered signature
//! - `GET /name/:name/owner` - Fetch the owning account
//! - `GET /addr/:addr` - Reverse-resolve an address
//! - `POST /name/:name` - Register a name
//!
//! ## Example
//!
//! ```rust,ignore
//! use registrar_api::{ApiServer, AppState};
//!
//! let server = ApiServer::new(state);
//! server.run(([0, 0, 0, 0], 8080).into()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for the name registry.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server over an already-wired service context.
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        create_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Runs the plain HTTP listener.
    pub async fn run(&self, addr: SocketAddr) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("name registry listening on {}", addr);

        axum::serve(listener, self.router()).await
    }

    /// Runs the TLS-terminated listener.
    ///
    /// The private key, certificate, and certificate chain are loaded once
    /// at startup; leaf and chain are concatenated into the presented
    /// PEM bundle.
    pub async fn run_tls(
        &self,
        addr: SocketAddr,
        key: impl AsRef<Path>,
        cert: impl AsRef<Path>,
        chain: impl AsRef<Path>,
    ) -> std::io::Result<()> {
        let mut cert_pem = tokio::fs::read(cert).await?;
        cert_pem.extend_from_slice(&tokio::fs::read(chain).await?);
        let key_pem = tokio::fs::read(key).await?;
        let tls = RustlsConfig::from_pem(cert_pem, key_pem).await?;

        info!("name registry listening on {} (TLS)", addr);

        axum_server::bind_rustls(addr, tls)
            .serve(self.router().into_make_service())
            .await
    }
}
