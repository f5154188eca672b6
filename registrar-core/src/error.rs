//! Error types for the name registry service.
//!
//! This module provides the service-wide error taxonomy using `thiserror`.
//! The HTTP boundary maps each group onto a status code; everything below
//! the boundary works in terms of these variants.

use thiserror::Error;

use crate::types::{Address, Name};

/// Result type alias using [`RegistrarError`].
pub type Result<T> = std::result::Result<T, RegistrarError>;

/// Main error type for all registry operations.
#[derive(Debug, Error)]
pub enum RegistrarError {
    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS (400)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Name fails the `^[a-z0-9_-]{3,32}$` rule.
    #[error("invalid name")]
    InvalidName(String),

    /// Address is malformed or the zero value.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Exactly one of public key / signature was supplied.
    #[error("{0} not found or invalid")]
    IncompleteCredentials(&'static str),

    // ═══════════════════════════════════════════════════════════════════════════
    // AUTHORIZATION ERRORS (401)
    // ═══════════════════════════════════════════════════════════════════════════

    /// Both credentials present but the signature does not verify over the name.
    #[error("signature verification failed")]
    SignatureRejected,

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFLICT ERRORS (400 fast-path / 403)
    // ═══════════════════════════════════════════════════════════════════════════

    /// The cache already holds this name (best-effort fast path).
    #[error("name already registered")]
    NameTaken(Name),

    /// The requested address is already registered under another name.
    #[error("address {addr} already registered with name {name}")]
    AddressTaken {
        /// Name currently holding the address.
        name: Name,
        /// The contested address.
        addr: Address,
    },

    /// The name is owned by the caller but bound to a different address.
    #[error("name is bound to a different address")]
    AddressMismatch {
        /// On-ledger owner of the name.
        owner: Address,
        /// The address requested by the caller.
        addr: Address,
    },

    /// The name is owned by someone else.
    #[error("name is owned by {owner}")]
    OwnerMismatch {
        /// On-ledger owner of the name.
        owner: Address,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // NOT FOUND ERRORS (404)
    // ═══════════════════════════════════════════════════════════════════════════

    /// The name resolves to nothing on the ledger and is absent from the cache.
    #[error("name not registered")]
    NameNotRegistered,

    /// The address reverse-resolves to nothing on the ledger or cache.
    #[error("address not registered")]
    AddressNotRegistered,

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS (500)
    // ═══════════════════════════════════════════════════════════════════════════

    /// The ledger node could not be reached or returned a malformed answer.
    ///
    /// Never interpreted as "absent": callers with a cache fall back to it,
    /// everyone else reports a server error.
    #[error("ledger transport error: {0}")]
    Transport(String),

    /// No contract code at the configured registry address.
    #[error("no registry contract at {0}")]
    ContractMissing(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // BOUNDARY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Startup configuration problem (bad file, bad flag combination).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid hex encoding.
    #[error("invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}

impl RegistrarError {
    /// Returns true for malformed-input errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RegistrarError::InvalidName(_)
                | RegistrarError::InvalidAddress(_)
                | RegistrarError::IncompleteCredentials(_)
        )
    }

    /// Returns true for ownership/address conflicts, including the cache fast path.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            RegistrarError::NameTaken(_)
                | RegistrarError::AddressTaken { .. }
                | RegistrarError::AddressMismatch { .. }
                | RegistrarError::OwnerMismatch { .. }
        )
    }

    /// Returns true when the ledger answer is unknown rather than negative.
    pub fn is_transport(&self) -> bool {
        matches!(self, RegistrarError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RegistrarError::InvalidName("AL".into());
        assert_eq!(err.to_string(), "invalid name");

        let err = RegistrarError::Transport("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_classification() {
        assert!(RegistrarError::InvalidName("x".into()).is_validation());
        assert!(RegistrarError::IncompleteCredentials("publickey").is_validation());
        assert!(!RegistrarError::NameNotRegistered.is_validation());

        assert!(RegistrarError::NameTaken(Name::parse("alice").unwrap()).is_conflict());
        assert!(RegistrarError::Transport("boom".into()).is_transport());
        assert!(!RegistrarError::Transport("boom".into()).is_conflict());
    }
}
