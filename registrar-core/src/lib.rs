//! # Registrar Core
//!
//! Core types, errors, and traits for the ledger-backed name registry service.
//!
//! This crate provides the foundational building blocks used by all other registrar crates:
//!
//! - **Types**: Validated domain models for names, addresses, records, and transaction handles
//! - **Errors**: The service-wide error taxonomy with context
//! - **Constants**: Protocol constants and sizes
//! - **Traits**: The [`LedgerGateway`] capability set over the distributed ledger
//!
//! ## Example
//!
//! ```rust
//! use registrar_core::{Name, Address};
//!
//! let name = Name::parse("alice").unwrap();
//! let addr = Address::normalize("ring:0xAABBCCDDEEFF00112233445566778899AABBCCDD").unwrap();
//! assert_eq!(addr.to_hex_string(), "0xaabbccddeeff00112233445566778899aabbccdd");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{RegistrarError, Result};
pub use traits::*;
pub use types::*;
