//! Read path: resolve names and addresses, ledger first, cache as fallback.

use std::sync::Arc;

use tracing::{debug, warn};

use registrar_cache::NameCache;
use registrar_core::error::{RegistrarError, Result};
use registrar_core::traits::LedgerGateway;
use registrar_core::types::{Address, Name, Record};

/// Read-path service.
///
/// Every lookup consults the ledger first. The cache answers only when the
/// ledger says "absent" or cannot be reached — a stale cached record beats
/// a spurious not-found, but never beats a live ledger answer.
pub struct QueryService {
    gateway: Arc<dyn LedgerGateway>,
    cache: Arc<NameCache>,
}

impl QueryService {
    /// Creates the read path over a gateway and its sibling cache.
    pub fn new(gateway: Arc<dyn LedgerGateway>, cache: Arc<NameCache>) -> Self {
        Self { gateway, cache }
    }

    /// Resolves a name to its full record.
    ///
    /// Sub-fields are assembled in strict sequence: address, then public
    /// key, then (only if a key exists) signature. Absent sub-fields are
    /// omitted. The assembled record is written through to the cache before
    /// it is returned.
    pub async fn lookup_name(&self, raw_name: &str) -> Result<Record> {
        let name = parse_lookup_name(raw_name)?;

        let addr = match self.gateway.query_address(&name).await {
            Ok(Some(addr)) => addr,
            Ok(None) => return self.name_fallback(&name, RegistrarError::NameNotRegistered),
            Err(e) => return self.name_fallback(&name, e),
        };

        let publickey = match self.gateway.query_public_key(&name).await {
            Ok(pk) => pk,
            Err(e) => return self.name_fallback(&name, e),
        };

        let signature = match &publickey {
            Some(_) => match self.gateway.query_signature(&name).await {
                Ok(sig) => sig,
                Err(e) => return self.name_fallback(&name, e),
            },
            None => None,
        };

        let record = Record {
            name,
            addr,
            publickey,
            signature,
        };
        self.cache.put(record.clone());
        Ok(record)
    }

    /// Fetches the public key registered with a name. Direct passthrough.
    pub async fn lookup_public_key(&self, raw_name: &str) -> Result<(Name, Vec<u8>)> {
        let name = parse_lookup_name(raw_name)?;
        match self.gateway.query_public_key(&name).await? {
            Some(publickey) => Ok((name, publickey)),
            None => Err(RegistrarError::NameNotRegistered),
        }
    }

    /// Fetches the signature registered with a name. Direct passthrough.
    pub async fn lookup_signature(&self, raw_name: &str) -> Result<(Name, Vec<u8>)> {
        let name = parse_lookup_name(raw_name)?;
        match self.gateway.query_signature(&name).await? {
            Some(signature) => Ok((name, signature)),
            None => Err(RegistrarError::NameNotRegistered),
        }
    }

    /// Fetches the owning account of a name. Direct passthrough.
    pub async fn lookup_owner(&self, raw_name: &str) -> Result<(Name, Address)> {
        let name = parse_lookup_name(raw_name)?;
        match self.gateway.query_owner(&name).await? {
            Some(owner) => Ok((name, owner)),
            None => Err(RegistrarError::NameNotRegistered),
        }
    }

    /// Reverse lookup: resolves an address to its registered name.
    ///
    /// The zero address is rejected before touching the ledger. A live
    /// answer needs no cache write; the address-indexed cache only fills
    /// in when the ledger is silent.
    pub async fn lookup_address(&self, raw_addr: &str) -> Result<Name> {
        let addr = Address::normalize(raw_addr)?;

        match self.gateway.query_name_of(&addr).await {
            Ok(Some(name)) => Ok(name),
            Ok(None) => self.addr_fallback(&addr, RegistrarError::AddressNotRegistered),
            Err(e) => self.addr_fallback(&addr, e),
        }
    }

    fn name_fallback(&self, name: &Name, err: RegistrarError) -> Result<Record> {
        match self.cache.get_by_name(name) {
            Some(record) => {
                if err.is_transport() {
                    warn!(%name, error = %err, "ledger unavailable, serving cached record");
                } else {
                    debug!(%name, "ledger has no record, serving cached record");
                }
                Ok((*record).clone())
            }
            None => Err(err),
        }
    }

    fn addr_fallback(&self, addr: &Address, err: RegistrarError) -> Result<Name> {
        match self.cache.get_by_addr(addr) {
            Some(record) => {
                if err.is_transport() {
                    warn!(%addr, error = %err, "ledger unavailable, serving cached name");
                }
                Ok(record.name.clone())
            }
            None => Err(err),
        }
    }
}

/// On the read path an invalid name cannot be registered, so it is simply
/// not found — never a validation error.
fn parse_lookup_name(raw: &str) -> Result<Name> {
    Name::parse(raw).map_err(|_| RegistrarError::NameNotRegistered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_ledger::MemoryLedger;

    fn name(s: &str) -> Name {
        Name::parse(s).unwrap()
    }

    fn service() -> (Arc<MemoryLedger>, Arc<NameCache>, QueryService) {
        let ledger = Arc::new(MemoryLedger::new());
        let cache = Arc::new(NameCache::new());
        let query = QueryService::new(ledger.clone(), cache.clone());
        (ledger, cache, query)
    }

    #[tokio::test]
    async fn test_lookup_name_assembles_record_and_caches() {
        let (ledger, cache, query) = service();
        let addr = Address::from_array([0xAA; 20]);
        ledger
            .submit_reservation(
                &name("alice"),
                &Address::from_array([0x0D; 20]),
                &addr,
                &[1; 32],
                &[2; 64],
            )
            .await
            .unwrap();

        let record = query.lookup_name("alice").await.unwrap();
        assert_eq!(record.addr, addr);
        assert_eq!(record.publickey, Some(vec![1; 32]));
        assert_eq!(record.signature, Some(vec![2; 64]));

        // Write-through happened before the response.
        assert!(cache.get_by_name(&name("alice")).is_some());
        assert!(cache.get_by_addr(&addr).is_some());
    }

    #[tokio::test]
    async fn test_lookup_name_omits_absent_credentials() {
        let (ledger, _, query) = service();
        ledger.seed(
            name("bob"),
            Address::from_array([0x0D; 20]),
            Address::from_array([0xBB; 20]),
        );

        let record = query.lookup_name("bob").await.unwrap();
        assert!(record.publickey.is_none());
        assert!(record.signature.is_none());
    }

    #[tokio::test]
    async fn test_lookup_name_absent_everywhere_is_not_found() {
        let (_, _, query) = service();
        assert!(matches!(
            query.lookup_name("ghost").await,
            Err(RegistrarError::NameNotRegistered)
        ));
    }

    #[tokio::test]
    async fn test_invalid_name_is_not_found() {
        let (_, _, query) = service();
        assert!(matches!(
            query.lookup_name("NOT-a-valid-NAME").await,
            Err(RegistrarError::NameNotRegistered)
        ));
    }

    #[tokio::test]
    async fn test_transport_error_falls_back_to_cache() {
        let (ledger, cache, query) = service();
        cache.put(Record::unsigned(
            name("alice"),
            Address::from_array([0xAA; 20]),
        ));
        ledger.set_fail_transport(true);

        let record = query.lookup_name("alice").await.unwrap();
        assert_eq!(record.addr, Address::from_array([0xAA; 20]));
    }

    #[tokio::test]
    async fn test_transport_error_without_cache_propagates() {
        let (ledger, _, query) = service();
        ledger.set_fail_transport(true);

        assert!(query.lookup_name("alice").await.unwrap_err().is_transport());
    }

    #[tokio::test]
    async fn test_ledger_absent_with_cache_entry_serves_cache() {
        let (_, cache, query) = service();
        cache.put(Record::unsigned(
            name("pending"),
            Address::from_array([0xCC; 20]),
        ));

        // Ledger has nothing (e.g. optimistic entry not yet confirmed).
        let record = query.lookup_name("pending").await.unwrap();
        assert_eq!(record.addr, Address::from_array([0xCC; 20]));
    }

    #[tokio::test]
    async fn test_lookup_public_key_passthrough_not_found() {
        let (ledger, _, query) = service();
        ledger.seed(
            name("bob"),
            Address::from_array([0x0D; 20]),
            Address::from_array([0xBB; 20]),
        );

        // Unsigned registration: key endpoint answers 404 even though the
        // name itself resolves.
        assert!(matches!(
            query.lookup_public_key("bob").await,
            Err(RegistrarError::NameNotRegistered)
        ));
    }

    #[tokio::test]
    async fn test_lookup_owner() {
        let (ledger, _, query) = service();
        let owner = Address::from_array([0x0D; 20]);
        ledger.seed(name("bob"), owner, Address::from_array([0xBB; 20]));

        let (_, got) = query.lookup_owner("bob").await.unwrap();
        assert_eq!(got, owner);
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let (ledger, _, query) = service();
        let addr = Address::from_array([0xBB; 20]);
        ledger.seed(name("bob"), Address::from_array([0x0D; 20]), addr);

        let got = query.lookup_address(&addr.to_hex_string()).await.unwrap();
        assert_eq!(got, name("bob"));
    }

    #[tokio::test]
    async fn test_reverse_lookup_rejects_zero_address() {
        let (_, _, query) = service();
        assert!(matches!(
            query
                .lookup_address("0x0000000000000000000000000000000000000000")
                .await,
            Err(RegistrarError::InvalidAddress(_))
        ));
    }

    #[tokio::test]
    async fn test_reverse_lookup_falls_back_to_cache() {
        let (ledger, cache, query) = service();
        let addr = Address::from_array([0xEE; 20]);
        cache.put(Record::unsigned(name("cached"), addr));
        ledger.set_fail_transport(true);

        let got = query.lookup_address(&addr.to_hex_string()).await.unwrap();
        assert_eq!(got, name("cached"));
    }
}
