//! # Registrar Cryptography
//!
//! The asymmetric-signature verification capability consumed by the
//! registration protocol.
//!
//! Clients registering a signed name submit an Ed25519 public key and a
//! signature over the raw name bytes, both base64-encoded on the wire.
//! Everything here is verification-side; key generation and signing live
//! with the clients (the [`sign_name`] helper exists for tests).
//!
//! ## Example
//!
//! ```rust,ignore
//! use registrar_crypto::verify_name_signature;
//!
//! let name = Name::parse("alice")?;
//! verify_name_signature(&name, publickey_b64, signature_b64)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

use registrar_core::constants::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE};
use registrar_core::error::{RegistrarError, Result};
use registrar_core::types::Name;

/// Decodes a base64 public key into its raw 32 bytes.
///
/// Rejects anything that is not exactly [`PUBLIC_KEY_SIZE`] bytes once
/// decoded; an undecodable key can never verify, so the caller treats the
/// failure as an authorization error, not a validation error.
pub fn decode_public_key(publickey_b64: &str) -> Result<[u8; PUBLIC_KEY_SIZE]> {
    let bytes = BASE64
        .decode(publickey_b64.trim())
        .map_err(|_| RegistrarError::SignatureRejected)?;
    bytes
        .try_into()
        .map_err(|_| RegistrarError::SignatureRejected)
}

/// Decodes a base64 signature into its raw 64 bytes.
pub fn decode_signature(signature_b64: &str) -> Result<[u8; SIGNATURE_SIZE]> {
    let bytes = BASE64
        .decode(signature_b64.trim())
        .map_err(|_| RegistrarError::SignatureRejected)?;
    bytes
        .try_into()
        .map_err(|_| RegistrarError::SignatureRejected)
}

/// Verifies a base64 credential pair over the raw name bytes.
///
/// Returns the decoded `(publickey, signature)` bytes on success, ready to
/// be stored on the ledger. Any decode or verification failure maps to
/// [`RegistrarError::SignatureRejected`].
pub fn verify_name_signature(
    name: &Name,
    publickey_b64: &str,
    signature_b64: &str,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let publickey = decode_public_key(publickey_b64)?;
    let signature = decode_signature(signature_b64)?;

    let key = VerifyingKey::from_bytes(&publickey).map_err(|_| RegistrarError::SignatureRejected)?;
    let sig = Signature::from_bytes(&signature);
    key.verify(name.as_str().as_bytes(), &sig)
        .map_err(|_| RegistrarError::SignatureRejected)?;

    Ok((publickey.to_vec(), signature.to_vec()))
}

/// Signs a name and returns the base64 `(publickey, signature)` pair.
///
/// Test-side counterpart of [`verify_name_signature`].
pub fn sign_name(name: &Name, signing_key: &ed25519_dalek::SigningKey) -> (String, String) {
    use ed25519_dalek::Signer;

    let signature = signing_key.sign(name.as_str().as_bytes());
    (
        BASE64.encode(signing_key.verifying_key().to_bytes()),
        BASE64.encode(signature.to_bytes()),
    )
}
