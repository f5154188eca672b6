//! Write path: the multi-step registration protocol.

use std::sync::Arc;

use tracing::info;

use registrar_cache::NameCache;
use registrar_core::error::{RegistrarError, Result};
use registrar_core::traits::LedgerGateway;
use registrar_core::types::{Address, Name, Record, TxHandle};
use registrar_crypto::verify_name_signature;
use registrar_ledger::watcher::{ConsensusWatcher, WatchOutcome};

/// One inbound registration request, as received at the boundary.
#[derive(Clone, Debug)]
pub struct RegistrationRequest {
    /// Address the name should resolve to.
    pub addr: String,
    /// Account that will own the name.
    pub owner: String,
    /// Base64 Ed25519 public key; present iff `signature` is.
    pub publickey: Option<String>,
    /// Base64 signature over the name bytes; present iff `publickey` is.
    pub signature: Option<String>,
}

/// Successful end of the client-visible part of the protocol.
///
/// Either way the caller sees plain success; confirmation of a submitted
/// reservation is the watcher's private concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A reservation transaction was accepted by the ledger.
    Submitted(TxHandle),
    /// The exact `(name, owner, addr)` triple is already registered.
    AlreadyRegistered,
}

/// Write-path coordinator.
///
/// Drives a registration through validation, conflict detection,
/// transaction submission and the optimistic cache write, then hands the
/// transaction handle to the consensus watcher and returns without waiting
/// for confirmation.
pub struct RegistrationCoordinator {
    gateway: Arc<dyn LedgerGateway>,
    cache: Arc<NameCache>,
    watcher: ConsensusWatcher,
}

impl RegistrationCoordinator {
    /// Creates the write path over a gateway, its sibling cache, and a watcher.
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        cache: Arc<NameCache>,
        watcher: ConsensusWatcher,
    ) -> Self {
        Self {
            gateway,
            cache,
            watcher,
        }
    }

    /// Runs the registration protocol for `raw_name`.
    ///
    /// Validation and authorization failures are terminal and never
    /// retried. Ledger transport errors surface to the caller as server
    /// errors — the write path has no cache fallback.
    pub async fn register(
        &self,
        raw_name: &str,
        request: RegistrationRequest,
    ) -> Result<RegistrationOutcome> {
        let addr = Address::normalize(&request.addr)?;
        let owner = Address::normalize(&request.owner)?;
        let name = Name::parse(raw_name)?;

        // Best-effort fast path only: concurrent registrations may still
        // race past this check; the ledger arbitrates below. A cached entry
        // for the same target falls through so re-registering an identical
        // binding stays idempotent.
        if let Some(cached) = self.cache.get_by_name(&name) {
            if cached.addr != addr {
                return Err(RegistrarError::NameTaken(name));
            }
        }

        let credentials = match (&request.publickey, &request.signature) {
            (None, None) => None,
            (Some(publickey), Some(signature)) => {
                Some(verify_name_signature(&name, publickey, signature)?)
            }
            (Some(_), None) => return Err(RegistrarError::IncompleteCredentials("signature")),
            (None, Some(_)) => return Err(RegistrarError::IncompleteCredentials("publickey")),
        };

        info!(%name, %addr, %owner, "registration request");

        match self.gateway.query_owner(&name).await? {
            None => self.submit(name, owner, addr, credentials).await,
            Some(current) if current == owner => self.check_idempotent(name, current, addr).await,
            Some(current) => Err(RegistrarError::OwnerMismatch { owner: current }),
        }
    }

    /// The name is unowned: check the target address, submit, respond
    /// optimistically, and let the watcher confirm in the background.
    async fn submit(
        &self,
        name: Name,
        owner: Address,
        addr: Address,
        credentials: Option<(Vec<u8>, Vec<u8>)>,
    ) -> Result<RegistrationOutcome> {
        if let Some(existing) = self.gateway.query_name_of(&addr).await? {
            info!(%addr, name = %existing, "address already registered");
            return Err(RegistrarError::AddressTaken {
                name: existing,
                addr,
            });
        }

        let (publickey, signature) = credentials.clone().unwrap_or_default();
        let tx = self
            .gateway
            .submit_reservation(&name, &owner, &addr, &publickey, &signature)
            .await?;

        let record = match credentials {
            Some((publickey, signature)) => {
                Record::signed(name.clone(), addr, publickey, signature)
            }
            None => Record::unsigned(name.clone(), addr),
        };
        self.cache.put(record);

        info!(%name, %addr, tx = %tx, "reservation accepted, confirming in background");

        let watched_name = name.clone();
        self.watcher.spawn(
            self.gateway.clone(),
            tx.clone(),
            Box::new(move |outcome| {
                if let WatchOutcome::Confirmed { .. } = outcome {
                    info!(name = %watched_name, %addr, "registration complete");
                }
            }),
        );

        Ok(RegistrationOutcome::Submitted(tx))
    }

    /// The caller already owns the name: success iff the bound address
    /// matches the requested one.
    async fn check_idempotent(
        &self,
        name: Name,
        owner: Address,
        addr: Address,
    ) -> Result<RegistrationOutcome> {
        match self.gateway.query_address(&name).await? {
            Some(registered) if registered == addr => Ok(RegistrationOutcome::AlreadyRegistered),
            _ => Err(RegistrarError::AddressMismatch { owner, addr }),
        }
    }
}
