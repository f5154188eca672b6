//! Common traits for the name registry.
//!
//! The [`LedgerGateway`] trait is the capability set the core consumes from
//! the distributed ledger. Implementations might use:
//! - A JSON-RPC client against a live node (production)
//! - An in-memory fake (tests)

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Address, Name, TxHandle};

/// Capability set over the on-ledger registry contract.
///
/// Every query resolves to `Ok(Some(_))`, `Ok(None)` when the ledger holds
/// the all-zero "absent" sentinel, or `Err` on a transport failure. A
/// transport failure means "unknown", never "absent" — callers must fall
/// back to their cache rather than report not-found.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Resolves a name to its registered address.
    async fn query_address(&self, name: &Name) -> Result<Option<Address>>;

    /// Fetches the public key registered with a name.
    async fn query_public_key(&self, name: &Name) -> Result<Option<Vec<u8>>>;

    /// Fetches the signature registered with a name.
    async fn query_signature(&self, name: &Name) -> Result<Option<Vec<u8>>>;

    /// Fetches the owning account of a name.
    async fn query_owner(&self, name: &Name) -> Result<Option<Address>>;

    /// Reverse-resolves an address to the name registered for it.
    async fn query_name_of(&self, addr: &Address) -> Result<Option<Name>>;

    /// Submits a reservation transaction binding `name` to `addr` for `owner`.
    ///
    /// Empty `publickey`/`signature` submit the unsigned-registration
    /// sentinel. Returns as soon as the node accepts the transaction;
    /// inclusion is confirmed separately via [`Self::transaction_included`].
    async fn submit_reservation(
        &self,
        name: &Name,
        owner: &Address,
        addr: &Address,
        publickey: &[u8],
        signature: &[u8],
    ) -> Result<TxHandle>;

    /// Returns true once the transaction is included in the ledger history.
    async fn transaction_included(&self, tx: &TxHandle) -> Result<bool>;
}
