//! Ledger address type.

use crate::constants::{ADDRESS_SCHEME_PREFIX, ADDRESS_SIZE, WORD_SIZE};
use crate::error::{RegistrarError, Result};

/// A 20-byte ledger address.
///
/// The all-zero value is the ledger's "absent" sentinel and is never a valid
/// registration target; [`Address::normalize`] rejects it outright.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_SIZE],
}

impl Address {
    /// Creates an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_SIZE {
            return Err(RegistrarError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_SIZE,
                bytes.len()
            )));
        }

        let mut arr = [0u8; ADDRESS_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates from a fixed-size array.
    pub fn from_array(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses from a hex string, with or without `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }

    /// Normalizes an inbound address string.
    ///
    /// Trims whitespace, strips the `ring:` scheme prefix, accepts the hex
    /// form with or without `0x`, lowercases, and rejects both malformed
    /// input and the zero value.
    pub fn normalize(raw: &str) -> Result<Self> {
        let s = raw.trim();
        let s = s.strip_prefix(ADDRESS_SCHEME_PREFIX).unwrap_or(s);
        let addr = Self::from_hex(&s.to_ascii_lowercase())
            .map_err(|_| RegistrarError::InvalidAddress(raw.to_string()))?;
        if addr.is_zero() {
            return Err(RegistrarError::InvalidAddress(raw.to_string()));
        }
        Ok(addr)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the lowercase hex string with `0x` prefix.
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// Encodes the address as a left-zero-padded 32-byte contract word.
    pub fn to_word(&self) -> [u8; WORD_SIZE] {
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - ADDRESS_SIZE..].copy_from_slice(&self.bytes);
        word
    }

    /// Decodes an address from the last 20 bytes of a contract word.
    ///
    /// Returns `None` for the all-zero word (the "absent" sentinel).
    pub fn from_word(word: &[u8; WORD_SIZE]) -> Option<Self> {
        let mut arr = [0u8; ADDRESS_SIZE];
        arr.copy_from_slice(&word[WORD_SIZE - ADDRESS_SIZE..]);
        let addr = Self { bytes: arr };
        if addr.is_zero() {
            None
        } else {
            Some(addr)
        }
    }

    /// Returns the zero address.
    pub fn zero() -> Self {
        Self {
            bytes: [0u8; ADDRESS_SIZE],
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_hex_string())
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ADDR: &str = "0xaabbccddeeff00112233445566778899aabbccdd";

    #[test_case("0xaabbccddeeff00112233445566778899aabbccdd"; "plain")]
    #[test_case("aabbccddeeff00112233445566778899aabbccdd"; "no prefix")]
    #[test_case("ring:0xaabbccddeeff00112233445566778899aabbccdd"; "scheme prefix")]
    #[test_case("  0xAABBCCDDEEFF00112233445566778899AABBCCDD  "; "uppercase padded")]
    fn test_normalize_accepts(raw: &str) {
        assert_eq!(Address::normalize(raw).unwrap().to_hex_string(), ADDR);
    }

    #[test_case(""; "empty")]
    #[test_case("0x1234"; "too short")]
    #[test_case("not-an-address"; "junk")]
    #[test_case("0x0000000000000000000000000000000000000000"; "zero")]
    #[test_case("ring:0x0000000000000000000000000000000000000000"; "zero with scheme")]
    fn test_normalize_rejects(raw: &str) {
        assert!(matches!(
            Address::normalize(raw),
            Err(RegistrarError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_word_roundtrip() {
        let addr = Address::from_hex(ADDR).unwrap();
        let word = addr.to_word();
        assert!(word[..12].iter().all(|&b| b == 0));
        assert_eq!(Address::from_word(&word).unwrap(), addr);
    }

    #[test]
    fn test_zero_word_is_absent() {
        assert!(Address::from_word(&[0u8; 32]).is_none());
    }

    #[test]
    fn test_display() {
        let addr = Address::from_hex(ADDR).unwrap();
        assert_eq!(addr.to_string(), ADDR);
        assert_eq!(addr.to_string().len(), 42); // "0x" + 40 hex chars
    }
}
