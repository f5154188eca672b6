//! In-memory ledger gateway.
//!
//! Fast, thread-safe implementation of the gateway capability set,
//! suitable for development, testing, and single-process demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use registrar_core::error::{RegistrarError, Result};
use registrar_core::traits::LedgerGateway;
use registrar_core::types::{Address, Name, TxHandle};

#[derive(Clone)]
struct Entry {
    addr: Address,
    owner: Address,
    publickey: Vec<u8>,
    signature: Vec<u8>,
}

/// In-memory [`LedgerGateway`].
///
/// Reservations take effect on submission; `transaction_included` answers
/// true for every issued handle. `fail_transport` makes every call fail
/// the way an unreachable node would, for exercising fallback paths.
#[derive(Default)]
pub struct MemoryLedger {
    by_name: RwLock<HashMap<Name, Entry>>,
    by_addr: RwLock<HashMap<Address, Name>>,
    next_tx: AtomicU64,
    fail_transport: AtomicBool,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a transport error.
    pub fn set_fail_transport(&self, fail: bool) {
        self.fail_transport.store(fail, Ordering::SeqCst);
    }

    /// Registers a binding directly, bypassing the reservation protocol.
    pub fn seed(&self, name: Name, owner: Address, addr: Address) {
        self.by_addr.write().insert(addr, name.clone());
        self.by_name.write().insert(
            name,
            Entry {
                addr,
                owner,
                publickey: Vec::new(),
                signature: Vec::new(),
            },
        );
    }

    fn check_transport(&self) -> Result<()> {
        if self.fail_transport.load(Ordering::SeqCst) {
            return Err(RegistrarError::Transport("ledger unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerGateway for MemoryLedger {
    async fn query_address(&self, name: &Name) -> Result<Option<Address>> {
        self.check_transport()?;
        Ok(self.by_name.read().get(name).map(|e| e.addr))
    }

    async fn query_public_key(&self, name: &Name) -> Result<Option<Vec<u8>>> {
        self.check_transport()?;
        Ok(self
            .by_name
            .read()
            .get(name)
            .filter(|e| !e.publickey.is_empty())
            .map(|e| e.publickey.clone()))
    }

    async fn query_signature(&self, name: &Name) -> Result<Option<Vec<u8>>> {
        self.check_transport()?;
        Ok(self
            .by_name
            .read()
            .get(name)
            .filter(|e| !e.signature.is_empty())
            .map(|e| e.signature.clone()))
    }

    async fn query_owner(&self, name: &Name) -> Result<Option<Address>> {
        self.check_transport()?;
        Ok(self.by_name.read().get(name).map(|e| e.owner))
    }

    async fn query_name_of(&self, addr: &Address) -> Result<Option<Name>> {
        self.check_transport()?;
        Ok(self.by_addr.read().get(addr).cloned())
    }

    async fn submit_reservation(
        &self,
        name: &Name,
        owner: &Address,
        addr: &Address,
        publickey: &[u8],
        signature: &[u8],
    ) -> Result<TxHandle> {
        self.check_transport()?;

        self.by_addr.write().insert(*addr, name.clone());
        self.by_name.write().insert(
            name.clone(),
            Entry {
                addr: *addr,
                owner: *owner,
                publickey: publickey.to_vec(),
                signature: signature.to_vec(),
            },
        );

        let n = self.next_tx.fetch_add(1, Ordering::SeqCst);
        Ok(TxHandle::new(format!("0x{n:064x}")))
    }

    async fn transaction_included(&self, _tx: &TxHandle) -> Result<bool> {
        self.check_transport()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_reserve_then_query() {
        let ledger = MemoryLedger::new();
        let owner = Address::from_array([0x0D; 20]);
        let addr = Address::from_array([0xAA; 20]);

        let tx = ledger
            .submit_reservation(&name("alice"), &owner, &addr, &[1; 32], &[2; 64])
            .await
            .unwrap();

        assert!(ledger.transaction_included(&tx).await.unwrap());
        assert_eq!(ledger.query_address(&name("alice")).await.unwrap(), Some(addr));
        assert_eq!(ledger.query_owner(&name("alice")).await.unwrap(), Some(owner));
        assert_eq!(
            ledger.query_name_of(&addr).await.unwrap().unwrap(),
            name("alice")
        );
        assert_eq!(
            ledger.query_public_key(&name("alice")).await.unwrap(),
            Some(vec![1; 32])
        );
    }

    #[tokio::test]
    async fn test_empty_credentials_read_as_absent() {
        let ledger = MemoryLedger::new();
        ledger.seed(
            name("bob"),
            Address::from_array([0x0D; 20]),
            Address::from_array([0xBB; 20]),
        );

        assert!(ledger.query_public_key(&name("bob")).await.unwrap().is_none());
        assert!(ledger.query_signature(&name("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fail_transport() {
        let ledger = MemoryLedger::new();
        ledger.set_fail_transport(true);

        assert!(ledger.query_address(&name("alice")).await.unwrap_err().is_transport());
    }
}
