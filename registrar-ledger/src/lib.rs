//! # Registrar Ledger
//!
//! The boundary adapter between the registry service and the distributed
//! ledger: a JSON-RPC client, a minimal ABI layer for the registrar
//! contract, the [`LedgerGateway`](registrar_core::LedgerGateway)
//! implementation, and the [`ConsensusWatcher`] that confirms submitted
//! reservations in the background.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod abi;
pub mod memory;
pub mod registry;
pub mod rpc;
pub mod watcher;

pub use memory::MemoryLedger;
pub use registry::RegistryClient;
pub use rpc::RpcClient;
pub use watcher::{CompletionCallback, ConsensusWatcher, WatchOutcome};
