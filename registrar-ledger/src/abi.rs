//! Minimal ABI encoding for the registrar contract.
//!
//! The contract surface is small and fixed, so calls are encoded by hand:
//! a Keccak-256 derived 4-byte selector, 32-byte static words, and the
//! offset/length layout for dynamic `bytes` arguments.

use sha3::{Digest, Keccak256};

use registrar_core::constants::WORD_SIZE;
use registrar_core::error::{RegistrarError, Result};

/// Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// First 4 bytes of the Keccak-256 of a function signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Encodes a single-word call: `selector || word`.
pub fn encode_query(signature: &str, word: [u8; WORD_SIZE]) -> String {
    let mut data = Vec::with_capacity(4 + WORD_SIZE);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&word);
    format!("0x{}", hex::encode(data))
}

/// Encodes the reservation call
/// `reserveFor(bytes32,address,address,bytes,bytes)`.
///
/// Head: three static words plus two offsets; tail: length-prefixed,
/// zero-padded credential bytes. Empty credentials encode as zero-length
/// `bytes`, the unsigned-registration sentinel.
pub fn encode_reserve_for(
    signature: &str,
    name_word: [u8; WORD_SIZE],
    owner_word: [u8; WORD_SIZE],
    addr_word: [u8; WORD_SIZE],
    publickey: &[u8],
    sig: &[u8],
) -> String {
    let head_size = 5 * WORD_SIZE;
    let publickey_tail = padded_len(publickey.len()) + WORD_SIZE;

    let mut data = Vec::new();
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(&name_word);
    data.extend_from_slice(&owner_word);
    data.extend_from_slice(&addr_word);
    data.extend_from_slice(&usize_word(head_size));
    data.extend_from_slice(&usize_word(head_size + publickey_tail));
    append_bytes(&mut data, publickey);
    append_bytes(&mut data, sig);

    format!("0x{}", hex::encode(data))
}

/// Decodes a 32-byte static word from an `eth_call` result.
pub fn decode_word(result: &str) -> Result<[u8; WORD_SIZE]> {
    let bytes = decode_hex(result)?;
    if bytes.is_empty() {
        // Nodes answer "0x" for calls into missing state; treat as the
        // zero word so callers see the "absent" sentinel.
        return Ok([0u8; WORD_SIZE]);
    }
    if bytes.len() < WORD_SIZE {
        return Err(RegistrarError::Transport(format!(
            "short word: {} bytes",
            bytes.len()
        )));
    }
    let mut word = [0u8; WORD_SIZE];
    word.copy_from_slice(&bytes[..WORD_SIZE]);
    Ok(word)
}

/// Decodes a dynamic `bytes` return value.
///
/// Returns `None` for an empty result, a zero-length payload, or an
/// all-zero payload — all of which the contract uses as "absent".
pub fn decode_bytes(result: &str) -> Result<Option<Vec<u8>>> {
    let bytes = decode_hex(result)?;
    if bytes.len() < 2 * WORD_SIZE {
        return Ok(None);
    }

    let len = word_to_usize(&bytes[WORD_SIZE..2 * WORD_SIZE])?;
    if len == 0 || bytes.len() < 2 * WORD_SIZE + len {
        return Ok(None);
    }

    let payload = bytes[2 * WORD_SIZE..2 * WORD_SIZE + len].to_vec();
    if payload.iter().all(|&b| b == 0) {
        return Ok(None);
    }
    Ok(Some(payload))
}

fn decode_hex(result: &str) -> Result<Vec<u8>> {
    let s = result.strip_prefix("0x").unwrap_or(result);
    // "0x0" and friends are odd-length; pad to keep hex happy.
    if s.len() % 2 == 1 {
        let padded = format!("0{s}");
        return hex::decode(padded).map_err(RegistrarError::from);
    }
    hex::decode(s).map_err(RegistrarError::from)
}

fn usize_word(value: usize) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn word_to_usize(word: &[u8]) -> Result<usize> {
    if word[..WORD_SIZE - 8].iter().any(|&b| b != 0) {
        return Err(RegistrarError::Transport("oversized length word".into()));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[WORD_SIZE - 8..]);
    Ok(u64::from_be_bytes(buf) as usize)
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_SIZE) * WORD_SIZE
}

fn append_bytes(data: &mut Vec<u8>, payload: &[u8]) {
    data.extend_from_slice(&usize_word(payload.len()));
    data.extend_from_slice(payload);
    data.resize(data.len() + padded_len(payload.len()) - payload.len(), 0);
}
