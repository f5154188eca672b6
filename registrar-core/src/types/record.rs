//! Name→address binding records and transaction handles.

use super::{Address, Name};

/// One name→address binding, as served to clients and mirrored in the cache.
///
/// Credentials come in pairs: `publickey` and `signature` are either both
/// present (the signature verifies over the name) or both absent (legacy
/// unsigned registration, stored on the ledger as zero-length sentinels).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// The registered name.
    pub name: Name,
    /// The address the name resolves to.
    pub addr: Address,
    /// Ed25519 public key, absent for unsigned registrations.
    pub publickey: Option<Vec<u8>>,
    /// Signature over the name bytes, absent for unsigned registrations.
    pub signature: Option<Vec<u8>>,
}

impl Record {
    /// Creates an unsigned record.
    pub fn unsigned(name: Name, addr: Address) -> Self {
        Self {
            name,
            addr,
            publickey: None,
            signature: None,
        }
    }

    /// Creates a signed record.
    pub fn signed(name: Name, addr: Address, publickey: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            name,
            addr,
            publickey: Some(publickey),
            signature: Some(signature),
        }
    }

    /// Returns true when the credential pair is present.
    pub fn has_credentials(&self) -> bool {
        self.publickey.is_some() && self.signature.is_some()
    }
}

/// Opaque handle for a submitted reservation transaction.
///
/// Returned by [`crate::traits::LedgerGateway::submit_reservation`] and
/// consumed exactly once by the consensus watcher.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TxHandle(String);

impl TxHandle {
    /// Wraps a raw transaction hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Returns the raw transaction hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TxHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> Address {
        Address::from_array([0xAB; 20])
    }

    #[test]
    fn test_unsigned_record() {
        let rec = Record::unsigned(Name::parse("alice").unwrap(), addr());
        assert!(!rec.has_credentials());
        assert!(rec.publickey.is_none());
    }

    #[test]
    fn test_signed_record() {
        let rec = Record::signed(
            Name::parse("alice").unwrap(),
            addr(),
            vec![1; 32],
            vec![2; 64],
        );
        assert!(rec.has_credentials());
    }

    #[test]
    fn test_tx_handle_display() {
        let tx = TxHandle::new("0xdeadbeef");
        assert_eq!(tx.to_string(), "0xdeadbeef");
        assert_eq!(tx.as_str(), "0xdeadbeef");
    }
}
