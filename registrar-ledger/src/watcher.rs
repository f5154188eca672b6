//! Background confirmation of submitted reservations.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use registrar_core::constants::{CONFIRMATION_MAX_ATTEMPTS, CONFIRMATION_POLL_INTERVAL_MS};
use registrar_core::traits::LedgerGateway;
use registrar_core::types::TxHandle;

/// Terminal result of watching one transaction.
///
/// A watch starts pending and ends in exactly one of these states; both are
/// logged and handed to the completion callback, never to the HTTP caller,
/// who already received an optimistic response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The transaction was observed in the ledger history.
    Confirmed {
        /// Number of polls it took.
        attempts: u32,
    },
    /// The retry budget ran out before the transaction was observed.
    TimedOut,
}

/// Callback invoked exactly once with the terminal outcome.
pub type CompletionCallback = Box<dyn FnOnce(&WatchOutcome) + Send>;

/// Polls the ledger to confirm a submitted transaction, bounded retries.
///
/// This is the service's core asynchrony contract: client-visible success
/// precedes ledger-confirmed success, and the gap is this watcher's private
/// concern.
#[derive(Clone, Debug)]
pub struct ConsensusWatcher {
    interval: Duration,
    max_attempts: u32,
}

impl ConsensusWatcher {
    /// Creates a watcher with the reference timing (2.5 s cadence, 5 attempts).
    pub fn new() -> Self {
        Self {
            interval: Duration::from_millis(CONFIRMATION_POLL_INTERVAL_MS),
            max_attempts: CONFIRMATION_MAX_ATTEMPTS,
        }
    }

    /// Creates a watcher with custom timing.
    pub fn with_timing(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// Spawns a fire-and-forget watch for one transaction handle.
    ///
    /// A poll error is logged and consumes an attempt; it does not abort the
    /// watch. The returned handle is only awaited by tests.
    pub fn spawn(
        &self,
        gateway: Arc<dyn LedgerGateway>,
        tx: TxHandle,
        on_complete: CompletionCallback,
    ) -> JoinHandle<WatchOutcome> {
        let interval = self.interval;
        let max_attempts = self.max_attempts;

        tokio::spawn(async move {
            let mut attempts = 0;
            let outcome = loop {
                tokio::time::sleep(interval).await;
                attempts += 1;

                match gateway.transaction_included(&tx).await {
                    Ok(true) => break WatchOutcome::Confirmed { attempts },
                    Ok(false) => {}
                    Err(e) => warn!(tx = %tx, error = %e, "inclusion poll failed"),
                }

                if attempts >= max_attempts {
                    break WatchOutcome::TimedOut;
                }
            };

            match outcome {
                WatchOutcome::Confirmed { .. } => {
                    info!(tx = %tx, attempts, "transaction confirmed");
                }
                WatchOutcome::TimedOut => {
                    warn!(tx = %tx, attempts, "transaction timeout");
                }
            }

            on_complete(&outcome);
            outcome
        })
    }
}

impl Default for ConsensusWatcher {
    fn default() -> Self {
        Self::new()
    }
}
