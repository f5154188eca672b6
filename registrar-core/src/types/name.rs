//! Validated registrable names.

use crate::constants::{NAME_MAX_LEN, NAME_MIN_LEN, WORD_SIZE};
use crate::error::{RegistrarError, Result};

/// A registrable name: 3 to 32 characters from `[a-z0-9_-]`.
///
/// Construction goes through [`Name::parse`], so a held value is always
/// well-formed. A name always fits a single 32-byte contract word.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Parses and validates a raw name.
    pub fn parse(raw: &str) -> Result<Self> {
        if is_valid_name(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(RegistrarError::InvalidName(raw.to_string()))
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encodes the name as a right-zero-padded 32-byte contract word.
    pub fn to_word(&self) -> [u8; WORD_SIZE] {
        let mut word = [0u8; WORD_SIZE];
        word[..self.0.len()].copy_from_slice(self.0.as_bytes());
        word
    }

    /// Decodes a name from a 32-byte contract word.
    ///
    /// Returns `None` for the all-zero word (the ledger's "absent" sentinel);
    /// any other word must decode to a valid name.
    pub fn from_word(word: &[u8; WORD_SIZE]) -> Result<Option<Self>> {
        let len = word.iter().position(|&b| b == 0).unwrap_or(WORD_SIZE);
        if len == 0 {
            return Ok(None);
        }
        let s = std::str::from_utf8(&word[..len])
            .map_err(|_| RegistrarError::InvalidName(hex::encode(word)))?;
        Self::parse(s).map(Some)
    }
}

/// Checks a raw string against the name rule `^[a-z0-9_-]{3,32}$`.
pub fn is_valid_name(raw: &str) -> bool {
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&raw.len())
        && raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
