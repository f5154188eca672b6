//! # Registrar Service
//!
//! The core of the name registry: the read path ([`QueryService`]) that
//! reconciles the authoritative ledger with the local cache, and the write
//! path ([`RegistrationCoordinator`]) that drives the multi-step
//! registration protocol — validation, conflict detection, transaction
//! submission, optimistic response, background confirmation.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod query;
mod registration;

pub use query::QueryService;
pub use registration::{RegistrationCoordinator, RegistrationOutcome, RegistrationRequest};
