//! App state: the service context wired once at startup.

use std::sync::Arc;

use registrar_cache::NameCache;
use registrar_core::traits::LedgerGateway;
use registrar_ledger::ConsensusWatcher;
use registrar_service::{QueryService, RegistrationCoordinator};

/// Everything a request handler needs, constructed once at startup and
/// passed explicitly — no process-wide mutable globals.
pub struct AppState {
    /// Read path.
    pub query: QueryService,
    /// Write path.
    pub coordinator: RegistrationCoordinator,
}

impl AppState {
    /// Wires the read and write paths over one gateway, cache, and watcher.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        cache: Arc<NameCache>,
        watcher: ConsensusWatcher,
    ) -> Self {
        Self {
            query: QueryService::new(gateway.clone(), cache.clone()),
            coordinator: RegistrationCoordinator::new(gateway, cache, watcher),
        }
    }
}
