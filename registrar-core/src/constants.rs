//! Protocol constants for the name registry.

// ═══════════════════════════════════════════════════════════════════════════════
// NAME CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Minimum length of a registrable name.
pub const NAME_MIN_LEN: usize = 3;

/// Maximum length of a registrable name.
///
/// Chosen so any valid name fits a single 32-byte contract word.
pub const NAME_MAX_LEN: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// LEDGER CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a ledger address in bytes (20 bytes = 160 bits).
pub const ADDRESS_SIZE: usize = 20;

/// Size of a contract ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Scheme prefix accepted (and stripped) on inbound addresses.
pub const ADDRESS_SCHEME_PREFIX: &str = "ring:";

// ═══════════════════════════════════════════════════════════════════════════════
// CONFIRMATION POLLING
// ═══════════════════════════════════════════════════════════════════════════════

/// Reference interval between transaction-inclusion polls, in milliseconds.
pub const CONFIRMATION_POLL_INTERVAL_MS: u64 = 2500;

/// Reference number of inclusion polls before a submission is declared timed out.
pub const CONFIRMATION_MAX_ATTEMPTS: u32 = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// CREDENTIAL SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;
