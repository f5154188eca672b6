//! # Registrar Cache
//!
//! In-memory bidirectional store of name↔record, used as the optimistic and
//! fallback source beside the authoritative ledger.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;

pub use cache::NameCache;
