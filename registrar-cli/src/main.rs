//! Registrar daemon
//!
//! Serves the name registry HTTP API over a ledger node, with an optional
//! TLS listener and an optional cache seed import.

mod config;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use registrar_api::{ApiServer, AppState};
use registrar_cache::NameCache;
use registrar_core::traits::LedgerGateway;
use registrar_ledger::{ConsensusWatcher, RegistryClient, RpcClient};

/// Ledger-backed name registry daemon
#[derive(Parser)]
#[command(name = "registrard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed export to preload into the cache before serving
    names_file: Option<PathBuf>,

    /// Ledger node JSON-RPC URL
    #[arg(long, env = "LEDGER_RPC_URL", default_value = "http://localhost:8545")]
    rpc_url: String,

    /// File holding the transacting identity address
    #[arg(long, default_value = "identity.txt")]
    identity_file: PathBuf,

    /// File holding the deployed registry contract address
    #[arg(long, default_value = "contractAddress.txt")]
    contract_file: PathBuf,

    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// HTTP listen port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Also serve a TLS-terminated listener
    #[arg(long)]
    https: bool,

    /// TLS listen port
    #[arg(long, default_value = "443")]
    https_port: u16,

    /// TLS private key (PEM)
    #[arg(long, default_value = "/etc/ssl/private/registrar.key")]
    tls_key: PathBuf,

    /// TLS certificate (PEM)
    #[arg(long, default_value = "/etc/ssl/certs/registrar.pem")]
    tls_cert: PathBuf,

    /// TLS certificate chain (PEM)
    #[arg(long, default_value = "/etc/ssl/certs/registrar-chain.pem")]
    tls_chain: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("loading configuration");

    let identity = config::read_address_file(&cli.identity_file)
        .context("transacting identity unavailable")?;
    let contract = config::read_address_file(&cli.contract_file)
        .context("registry contract address unavailable")?;

    let cache = Arc::new(NameCache::new());
    if let Some(path) = &cli.names_file {
        let records = config::load_seed_records(path)
            .with_context(|| format!("seed import from {} failed", path.display()))?;
        info!(count = records.len(), "populating cache from seed export");
        cache.load(records);
    }

    let registry = RegistryClient::new(RpcClient::new(&cli.rpc_url), contract, identity);

    registry
        .ensure_deployed()
        .await
        .context("registry contract probe failed")?;

    match registry.identity_balance().await {
        Ok(balance) => info!(identity = %identity, %balance, "transacting identity ready"),
        Err(e) => warn!(error = %e, "could not fetch identity balance"),
    }

    let gateway: Arc<dyn LedgerGateway> = Arc::new(registry);
    let server = ApiServer::new(AppState::new(gateway, cache, ConsensusWatcher::new()));

    let http_addr = SocketAddr::new(cli.bind, cli.port);
    if cli.https {
        let https_addr = SocketAddr::new(cli.bind, cli.https_port);
        tokio::try_join!(
            server.run(http_addr),
            server.run_tls(https_addr, &cli.tls_key, &cli.tls_cert, &cli.tls_chain),
        )?;
    } else {
        server.run(http_addr).await?;
    }

    Ok(())
}
